use std::path::PathBuf;

use anyhow::{Context, Result};
use dqv::{DistributionInfo, QualityGraph};
use fairsharing::{write_table, MetadataRecord};
use tracing::{error, info};

use crate::pipeline::Pipeline;

/// What one preliminary-statistics run produced.
#[derive(Debug)]
pub struct PrelimOutcome {
    pub record: MetadataRecord,
    /// `None` when serializing the graph failed.
    pub graph_file: Option<PathBuf>,
    pub table_file: Option<PathBuf>,
}

/// Base name for a page's output files: the last path segment of its URL.
pub fn url_file_stem(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

impl Pipeline {
    /// Scrape `url`, write its DQV graph and, when `write_csv` is set, a one-row table.
    pub async fn preliminary_statistics(&self, url: &str, write_csv: bool) -> Result<PrelimOutcome> {
        let markup = self
            .pages
            .fetch(url)
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;
        let record = self
            .extractor
            .extract(url, &markup)
            .with_context(|| format!("Failed to extract metadata from {url}"))?;

        let dataset_id = record.dataset_id();
        let graph = QualityGraph::build(&self.definitions, &dataset_id, Some(&record), &DistributionInfo::default())
            .with_context(|| format!("Failed to build quality graph for {url}"))?;

        let stem = match url_file_stem(url) {
            "" => dataset_id.as_str(),
            s => s,
        };

        let graph_path = self
            .output_dir
            .join(format!("{stem}_rdf.{}", self.rdf_format.file_extension()));
        let graph_file = match graph.serialize(&graph_path, self.rdf_format) {
            Ok(()) => {
                info!(url=%url, path=%graph_path.display(), triples=graph.len(), "preliminary statistics written");
                Some(graph_path)
            }
            Err(e) => {
                error!(url=%url, "failed to write quality graph: {e}");
                None
            }
        };

        let table_file = if write_csv {
            let table_path = self.output_dir.join(format!("{stem}.csv"));
            write_table(std::slice::from_ref(&record), &table_path)
                .with_context(|| format!("Failed to write {}", table_path.display()))?;
            Some(table_path)
        } else {
            None
        };

        Ok(PrelimOutcome { record, graph_file, table_file })
    }
}
