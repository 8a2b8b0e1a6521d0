//! Data Quality Vocabulary graphs
//!
//! Turns scraped catalog metadata into a W3C DQV / DCAT graph: one dataset
//! node, one distribution node and a quality measurement per scraped fact.

pub mod vocab;
pub mod io;
mod types;
mod sequence;

pub use types::{DistributionInfo, Measurement, MeasurementId, Metric, DISTRIBUTION_SUFFIX, MEDIA_TYPE};
pub use sequence::MeasurementSequence;
pub use oxrdfio::RdfFormat;

use std::path::{Path, PathBuf};

use fairsharing::MetadataRecord;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Graph, Literal, NamedNode, NamedNodeRef, Term, Triple};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DqvError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("RDF parse error: {0}")]
    Parse(String),

    #[error("failed to serialize graph to {path}: {reason}")]
    Serialization { path: PathBuf, reason: String },

    #[error("invalid IRI {iri}: {reason}")]
    InvalidIri { iri: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DqvError>;

/// File holding the metric/dimension/category definitions every graph starts from.
pub const DEFINITIONS_FILE: &str = "dqv_definitions.ttl";

/// Fixed vocabulary-definition triples, loaded once and copied into each graph.
#[derive(Clone, Debug)]
pub struct VocabularyDefinitions {
    graph: Graph,
}

impl VocabularyDefinitions {
    /// Load [`DEFINITIONS_FILE`] from `resource_dir`.
    pub fn load(resource_dir: &Path) -> Result<Self> {
        let path = resource_dir.join(DEFINITIONS_FILE);
        let graph = io::read_graph(&path, RdfFormat::Turtle)?;
        debug!(path=%path.display(), triples=graph.len(), "loaded vocabulary definitions");
        Ok(Self { graph })
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self { graph }
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

/// Quality graph for a single dataset.
pub struct QualityGraph {
    graph: Graph,
    dataset: NamedNode,
    distribution: NamedNode,
    sequence: MeasurementSequence,
    measurements: Vec<Measurement>,
}

impl QualityGraph {
    /// Start a graph from the definitions and add the dataset and
    /// distribution nodes for `dataset_id`.
    pub fn new(definitions: &VocabularyDefinitions, dataset_id: &str) -> Result<Self> {
        let dataset = local_node(dataset_id)?;
        let distribution = local_node(&format!("{dataset_id}{DISTRIBUTION_SUFFIX}"))?;

        let mut g = Self {
            graph: definitions.graph.clone(),
            dataset,
            distribution,
            sequence: MeasurementSequence::new(),
            measurements: Vec::new(),
        };

        let dataset = g.dataset.clone();
        let distribution = g.distribution.clone();

        g.add(&dataset, rdf::TYPE, vocab::dcat::DATASET.into_owned());
        g.add(&dataset, vocab::dcat::DISTRIBUTION, distribution.clone());

        g.add(&distribution, rdf::TYPE, vocab::dcat::DISTRIBUTION_CLASS.into_owned());
        g.add(&distribution, vocab::dcat::MEDIA_TYPE, Literal::new_simple_literal(MEDIA_TYPE));

        Ok(g)
    }

    /// Build the complete graph for one dataset.
    ///
    /// Measurement ids follow call order: licensing first, then every scope
    /// and data type, then every terminology artifact.
    pub fn build(
        definitions: &VocabularyDefinitions,
        dataset_id: &str,
        metadata: Option<&MetadataRecord>,
        distribution: &DistributionInfo,
    ) -> Result<Self> {
        info!(dataset_id=%dataset_id, "converting preliminary statistics to W3C DQV");

        let mut g = Self::new(definitions, dataset_id)?;

        if let Some(url) = &distribution.download_url {
            g.add_download_url(url)?;
        }
        if let Some(size) = distribution.byte_size {
            g.add_byte_size(size);
        }
        if let Some(md) = metadata {
            g.add_metadata(md);
        }
        Ok(g)
    }

    /// Title on both nodes; the dataset's copy carries a language tag.
    pub fn add_title(&mut self, title: &str) {
        if title.is_empty() {
            return;
        }
        let dataset = self.dataset.clone();
        let distribution = self.distribution.clone();
        self.add(
            &dataset,
            vocab::dcterms::TITLE,
            Literal::new_language_tagged_literal_unchecked(title, "en"),
        );
        self.add(&distribution, vocab::dcterms::TITLE, Literal::new_simple_literal(title));
    }

    pub fn add_download_url(&mut self, url: &str) -> Result<()> {
        if url.is_empty() {
            return Ok(());
        }
        let node = NamedNode::new(url).map_err(|e| DqvError::InvalidIri {
            iri: url.to_string(),
            reason: e.to_string(),
        })?;
        let distribution = self.distribution.clone();
        self.add(&distribution, vocab::dcat::DOWNLOAD_URL, node);
        Ok(())
    }

    /// Negative sizes mean "unknown" and are not recorded.
    pub fn add_byte_size(&mut self, byte_size: i64) {
        if byte_size < 0 {
            debug!(byte_size, "skipping negative byte size");
            return;
        }
        let distribution = self.distribution.clone();
        self.add(
            &distribution,
            vocab::dcat::BYTE_SIZE,
            Literal::new_typed_literal(byte_size.to_string(), xsd::DECIMAL),
        );
    }

    pub fn add_licensing_metric(&mut self, license: &str) -> Option<MeasurementId> {
        if license.is_empty() {
            return None;
        }
        Some(self.add_measurement(Metric::Licensing, license))
    }

    pub fn add_scopes_and_data_types(&mut self, entries: &[String]) -> Vec<MeasurementId> {
        entries
            .iter()
            .map(|e| self.add_measurement(Metric::ScopeAndDatatypes, e))
            .collect()
    }

    pub fn add_terminology_artifacts(&mut self, entries: &[String]) -> Vec<MeasurementId> {
        entries
            .iter()
            .map(|e| self.add_measurement(Metric::TerminologyArtifacts, e))
            .collect()
    }

    /// Title, licensing, scopes and data types, terminology artifacts.
    pub fn add_metadata(&mut self, md: &MetadataRecord) {
        self.add_title(&md.title);

        if !md.license_groups.is_empty() {
            self.add_licensing_metric(&md.license_string());
        }

        self.add_scopes_and_data_types(&md.scope_and_data_types);
        self.add_terminology_artifacts(&md.terminology_artifacts);
    }

    /// Write the graph to `path` in `format`.
    pub fn serialize(&self, path: &Path, format: RdfFormat) -> Result<()> {
        io::write_graph(&self.graph, path, format)?;
        info!(path=%path.display(), "preliminary statistics in W3C DQV written");
        Ok(())
    }

    /// Triples of a serialized graph file.
    pub fn read_triples(path: &Path, format: RdfFormat) -> Result<Graph> {
        io::read_graph(path, format)
    }

    pub fn triples(&self) -> &Graph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn dataset(&self) -> &NamedNode {
        &self.dataset
    }

    pub fn distribution(&self) -> &NamedNode {
        &self.distribution
    }

    /// Measurements in the order they were added.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn measurements_of(&self, metric: Metric) -> impl Iterator<Item = &Measurement> + '_ {
        self.measurements.iter().filter(move |m| m.metric == metric)
    }

    fn add_measurement(&mut self, metric: Metric, value: &str) -> MeasurementId {
        let id = self.sequence.next_id();
        // ids are `measurementNNNN`, always a valid IRI suffix
        let node = NamedNode::new_unchecked(format!("{}{id}", vocab::ncats::NS));
        let metric_node = NamedNode::new_unchecked(metric.iri());
        let distribution = self.distribution.clone();

        self.add(&node, rdf::TYPE, vocab::dqv::QUALITY_MEASUREMENT.into_owned());
        self.add(&node, vocab::dqv::COMPUTED_ON, distribution.clone());
        self.add(&distribution, vocab::dqv::HAS_QUALITY_MEASUREMENT, node.clone());
        self.add(&node, vocab::dqv::IS_MEASUREMENT_OF, metric_node);
        self.add(
            &node,
            vocab::dqv::VALUE,
            Literal::new_typed_literal(value, xsd::STRING),
        );

        self.measurements.push(Measurement {
            id,
            metric,
            value: value.to_string(),
        });
        id
    }

    fn add(&mut self, subject: &NamedNode, predicate: NamedNodeRef<'_>, object: impl Into<Term>) {
        self.graph
            .insert(&Triple::new(subject.clone(), predicate.into_owned(), object));
    }
}

fn local_node(local: &str) -> Result<NamedNode> {
    let iri = format!("{}{local}", vocab::ncats::NS);
    NamedNode::new(iri.clone()).map_err(|e| DqvError::InvalidIri {
        iri,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairsharing::LicenseGroup;

    fn definitions() -> VocabularyDefinitions {
        VocabularyDefinitions::from_graph(Graph::new())
    }

    #[test]
    fn test_new_graph_has_dataset_and_distribution() {
        let g = QualityGraph::new(&definitions(), "myDataset").unwrap();
        assert_eq!(g.dataset().as_str(), "http://ncats.nih.gov/myDataset");
        assert_eq!(g.distribution().as_str(), "http://ncats.nih.gov/myDatasetDistribution");
        // two types, the link and the media type
        assert_eq!(g.len(), 4);
        assert!(g.measurements().is_empty());
    }

    #[test]
    fn test_invalid_dataset_id() {
        let err = QualityGraph::new(&definitions(), "has space").err().unwrap();
        assert!(matches!(err, DqvError::InvalidIri { .. }));
    }

    #[test]
    fn test_empty_title_and_url_are_skipped() {
        let mut g = QualityGraph::new(&definitions(), "d").unwrap();
        g.add_title("");
        g.add_download_url("").unwrap();
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn test_byte_size_only_when_non_negative() {
        let mut g = QualityGraph::new(&definitions(), "d").unwrap();
        g.add_byte_size(-1);
        assert_eq!(g.len(), 4);
        g.add_byte_size(0);
        assert_eq!(g.len(), 5);
    }

    #[test]
    fn test_licensing_first_then_scopes_then_terminology() {
        let md = MetadataRecord::new(
            "u",
            "T",
            vec!["a".into(), "b".into()],
            vec!["c".into()],
            vec![LicenseGroup::new("Data use", vec!["CC0".into()])],
        );
        let g = QualityGraph::build(&definitions(), "d", Some(&md), &DistributionInfo::default()).unwrap();

        let got: Vec<(String, Metric, &str)> = g
            .measurements()
            .iter()
            .map(|m| (m.id.to_string(), m.metric, m.value.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("measurement0001".to_string(), Metric::Licensing, "Data use = {CC0}"),
                ("measurement0002".to_string(), Metric::ScopeAndDatatypes, "a"),
                ("measurement0003".to_string(), Metric::ScopeAndDatatypes, "b"),
                ("measurement0004".to_string(), Metric::TerminologyArtifacts, "c"),
            ]
        );
    }
}
