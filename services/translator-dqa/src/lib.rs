//! Data quality assessment for linked-open datasets.
//!
//! Two stages: preliminary statistics scraped from a FAIRsharing.org record
//! and written as a DQV graph, and computational metrics produced by RDFUnit
//! and loaded into a GraphDB repository.

pub mod config;
pub mod validator;
pub mod pipeline;
mod prelim;
mod computational;

pub use config::AppConfig;
pub use pipeline::{read_batch, BatchItem, Pipeline, RunRequest, RunSummary};
pub use prelim::{url_file_stem, PrelimOutcome};
pub use computational::{repository_title, ComputationalOutcome};
pub use validator::{RdfUnitValidator, ValidationTarget, Validator, ValidatorError};
