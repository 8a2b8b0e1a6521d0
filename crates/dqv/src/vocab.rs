//! Vocabulary IRIs used by quality graphs.
//!
//! - `ncats` - local namespace for datasets, measurements and metrics
//! - `dcat` - W3C Data Catalog Vocabulary (http://www.w3.org/ns/dcat#)
//! - `dqv` - W3C Data Quality Vocabulary (http://www.w3.org/ns/dqv#)
//! - `dcterms` - DCMI terms (http://purl.org/dc/terms/)
//!
//! `rdf` and `xsd` terms come from [`oxrdf::vocab`].

use oxrdf::NamedNodeRef;

/// Prefixes written at the top of serialized graphs.
pub const PREFIXES: [(&str, &str); 6] = [
    ("ncats", ncats::NS),
    ("dcat", dcat::NS),
    ("dqv", dqv::NS),
    ("dcterms", dcterms::NS),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

pub mod ncats {
    pub const NS: &str = "http://ncats.nih.gov/";
}

pub mod dcat {
    use super::NamedNodeRef;

    pub const NS: &str = "http://www.w3.org/ns/dcat#";

    pub const DATASET: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#Dataset");
    pub const DISTRIBUTION_CLASS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#Distribution");

    /// dcat:distribution (dataset -> distribution)
    pub const DISTRIBUTION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#distribution");
    pub const MEDIA_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#mediaType");
    pub const DOWNLOAD_URL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#downloadURL");
    pub const BYTE_SIZE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#byteSize");
}

pub mod dqv {
    use super::NamedNodeRef;

    pub const NS: &str = "http://www.w3.org/ns/dqv#";

    pub const QUALITY_MEASUREMENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dqv#QualityMeasurement");
    pub const COMPUTED_ON: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dqv#computedOn");
    pub const HAS_QUALITY_MEASUREMENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dqv#hasQualityMeasurement");
    pub const IS_MEASUREMENT_OF: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dqv#isMeasurementOf");
    pub const VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dqv#value");
}

pub mod dcterms {
    use super::NamedNodeRef;

    pub const NS: &str = "http://purl.org/dc/terms/";

    pub const TITLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
}
