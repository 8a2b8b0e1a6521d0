use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dqv::{RdfFormat, VocabularyDefinitions};
use fairsharing::{write_table, FairsharingExtractor, HttpPageFetcher, MetadataExtractor, PageSource};
use graphdb::{GraphDbClient, RepositoryClient};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::validator::{RdfUnitValidator, Validator};

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunRequest {
    /// Preliminary statistics for `url` and/or computational metrics for `dataset`.
    Single { url: Option<String>, dataset: Option<PathBuf> },
    /// Every row of a `<url>,<dataset path>` list.
    Batch { list: PathBuf },
}

impl RunRequest {
    /// A batch list wins over single inputs. `None` when nothing was given.
    pub fn from_args(url: Option<String>, dataset: Option<PathBuf>, list: Option<PathBuf>) -> Option<Self> {
        match (url, dataset, list) {
            (_, _, Some(list)) => Some(Self::Batch { list }),
            (None, None, None) => None,
            (url, dataset, None) => Some(Self::Single { url, dataset }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub preliminary: usize,
    pub computational: usize,
    pub failures: usize,
}

/// One row of a batch list; blank halves are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchItem {
    pub url: Option<String>,
    pub dataset: Option<PathBuf>,
}

/// Read a batch list. Rows without exactly two fields are ignored; bytes that
/// are not UTF-8 are replaced so a bad row never hides the rows around it.
pub fn read_batch(path: &Path) -> Result<Vec<BatchItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open batch list {}", path.display()))?;

    let mut items = Vec::new();
    for (i, row) in reader.byte_records().enumerate() {
        let row = row.with_context(|| format!("Failed to read batch list {}", path.display()))?;
        if row.len() != 2 {
            warn!(row = i + 1, fields = row.len(), "skipping batch row without exactly two fields");
            continue;
        }
        if std::str::from_utf8(row.as_slice()).is_err() {
            warn!(row = i + 1, "batch row is not valid UTF-8, replacing invalid bytes");
        }
        let non_blank = |field: &[u8]| {
            Some(String::from_utf8_lossy(field).trim().to_string()).filter(|s| !s.is_empty())
        };
        items.push(BatchItem {
            url: non_blank(&row[0]),
            dataset: non_blank(&row[1]).map(PathBuf::from),
        });
    }
    Ok(items)
}

pub struct Pipeline {
    pub(crate) pages: Box<dyn PageSource>,
    pub(crate) extractor: Box<dyn MetadataExtractor>,
    pub(crate) validator: Box<dyn Validator>,
    pub(crate) repository: Box<dyn RepositoryClient>,
    pub(crate) definitions: VocabularyDefinitions,
    pub(crate) output_dir: PathBuf,
    pub(crate) rdf_format: RdfFormat,
}

impl Pipeline {
    pub fn new(
        cfg: &AppConfig,
        pages: Box<dyn PageSource>,
        extractor: Box<dyn MetadataExtractor>,
        validator: Box<dyn Validator>,
        repository: Box<dyn RepositoryClient>,
    ) -> Result<Self> {
        let definitions = VocabularyDefinitions::load(&cfg.resource_dir)
            .with_context(|| format!("Failed to load vocabulary definitions from {}", cfg.resource_dir.display()))?;
        Ok(Self {
            pages,
            extractor,
            validator,
            repository,
            definitions,
            output_dir: cfg.output_dir.clone(),
            rdf_format: cfg.rdf_format,
        })
    }

    /// Wire the HTTP fetcher, FAIRsharing extractor, RDFUnit and GraphDB.
    pub fn from_config(cfg: &AppConfig, client: reqwest::Client) -> Result<Self> {
        let extractor = FairsharingExtractor::new().context("Failed to compile page selectors")?;
        Self::new(
            cfg,
            Box::new(HttpPageFetcher::with_client(client.clone())),
            Box::new(extractor),
            Box::new(RdfUnitValidator::from_config(cfg)),
            Box::new(GraphDbClient::with_client(cfg.graphdb_url.clone(), client)),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn run(&self, request: &RunRequest) -> Result<RunSummary> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", self.output_dir.display()))?;

        match request {
            RunRequest::Single { url, dataset } => self.run_single(url.as_deref(), dataset.as_deref()).await,
            RunRequest::Batch { list } => self.run_batch(list).await,
        }
    }

    /// Errors propagate; preliminary statistics run before computational metrics.
    async fn run_single(&self, url: Option<&str>, dataset: Option<&Path>) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        if let Some(url) = url {
            self.preliminary_statistics(url, true).await?;
            summary.preliminary += 1;
        }
        if let Some(dataset) = dataset {
            self.computational_metrics(dataset).await?;
            summary.computational += 1;
        }
        Ok(summary)
    }

    /// Each half of each row stands alone: failures are logged and counted.
    async fn run_batch(&self, list: &Path) -> Result<RunSummary> {
        let items = read_batch(list)?;
        info!(list=%list.display(), rows=items.len(), "batch: starting");

        let mut summary = RunSummary::default();
        let mut records = Vec::new();

        for item in &items {
            if let Some(url) = &item.url {
                match self.preliminary_statistics(url, false).await {
                    Ok(outcome) => {
                        summary.preliminary += 1;
                        records.push(outcome.record);
                    }
                    Err(e) => {
                        summary.failures += 1;
                        error!(url=%url, "preliminary statistics failed: {e:#}");
                    }
                }
            }

            if let Some(dataset) = &item.dataset {
                if !dataset.exists() {
                    warn!(dataset=%dataset.display(), "dataset file not found, skipping");
                    continue;
                }
                match self.computational_metrics(dataset).await {
                    Ok(_) => summary.computational += 1,
                    Err(e) => {
                        summary.failures += 1;
                        error!(dataset=%dataset.display(), "computational metrics failed: {e:#}");
                    }
                }
            }
        }

        let table = self.output_dir.join(batch_table_name(chrono::Local::now()));
        write_table(&records, &table).with_context(|| format!("Failed to write {}", table.display()))?;
        info!(
            table=%table.display(),
            preliminary = summary.preliminary,
            computational = summary.computational,
            failures = summary.failures,
            "batch: done"
        );
        Ok(summary)
    }
}

/// `prelim_stats_<local time to the second>.csv`
pub fn batch_table_name<Tz>(now: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("prelim_stats_{}.csv", now.format("%Y-%m-%dT%H:%M:%S"))
}
