//! Core types for quality graphs

use std::fmt;

use crate::vocab;

/// Media type recorded on every distribution, whatever the source format.
pub const MEDIA_TYPE: &str = "application/rdf";

/// Suffix appended to a dataset id to name its distribution node.
pub const DISTRIBUTION_SUFFIX: &str = "Distribution";

/// Metrics a measurement can be a measurement of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Licensing,
    ScopeAndDatatypes,
    TerminologyArtifacts,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Licensing, Metric::ScopeAndDatatypes, Metric::TerminologyArtifacts];

    pub fn local_name(self) -> &'static str {
        match self {
            Metric::Licensing => "licensingMetric",
            Metric::ScopeAndDatatypes => "scopeAndDatatypesMetric",
            Metric::TerminologyArtifacts => "terminologyArtifactsMetric",
        }
    }

    pub fn iri(self) -> String {
        format!("{}{}", vocab::ncats::NS, self.local_name())
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        let local = iri.strip_prefix(vocab::ncats::NS)?;
        Self::ALL.into_iter().find(|m| m.local_name() == local)
    }
}

/// Sequence number of a measurement within one graph. Displays as
/// `measurement0001`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeasurementId(pub u32);

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "measurement{:04}", self.0)
    }
}

/// One measurement added to a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measurement {
    pub id: MeasurementId,
    pub metric: Metric,
    pub value: String,
}

/// Optional facts about the dataset's distribution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistributionInfo {
    pub download_url: Option<String>,   // skipped when empty
    pub byte_size: Option<i64>,         // skipped when negative
}
