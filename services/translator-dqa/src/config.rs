use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dqv::RdfFormat;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub validator_jar: PathBuf,
    pub java: String,
    pub graphdb_url: String,
    pub output_dir: PathBuf,
    pub resource_dir: PathBuf,
    pub verbose: bool,
    pub rdf_format: RdfFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            validator_jar: PathBuf::from("RDFUnit/rdfunit-validate.jar"),
            java: "java".to_string(),
            graphdb_url: "http://localhost:7200/".to_string(),
            output_dir: PathBuf::from("Output"),
            resource_dir: PathBuf::from("resources"),
            verbose: true,
            rdf_format: RdfFormat::Turtle,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let cfg = Self::from_env_unchecked();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Environment values without sanity checks, for callers that still
    /// apply overrides and call [`AppConfig::validate`] afterwards.
    pub fn from_env_unchecked() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults. Not validated.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let validator_jar = lookup("DQA_VALIDATOR_JAR")
            .map(PathBuf::from)
            .unwrap_or(defaults.validator_jar);
        let java = lookup("DQA_JAVA").unwrap_or(defaults.java);
        let graphdb_url = lookup("DQA_GRAPHDB_URL").unwrap_or(defaults.graphdb_url);
        let output_dir = lookup("DQA_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let resource_dir = lookup("DQA_RESOURCE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.resource_dir);
        let verbose = lookup("DQA_VERBOSE")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.verbose);

        Self {
            validator_jar,
            java,
            graphdb_url,
            output_dir,
            resource_dir,
            verbose,
            rdf_format: defaults.rdf_format,
        }
    }

    /// Sanity checks (fail fast, fail loud).
    pub fn validate(&self) -> Result<()> {
        if !self.graphdb_url.starts_with("http://") && !self.graphdb_url.starts_with("https://") {
            bail!("DQA_GRAPHDB_URL must start with http:// or https://");
        }
        if self.java.trim().is_empty() {
            bail!("DQA_JAVA must not be empty");
        }
        Ok(())
    }

    /// Directory the validator runs in; its reports land in `results/` below it.
    pub fn validator_work_dir(&self) -> PathBuf {
        match self.validator_jar.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim(), "1" | "true" | "TRUE" | "True" | "yes" | "YES")
}

/// Resolve `--format` values such as `ttl`, `nt` or `rdf`.
pub fn parse_rdf_format(name: &str) -> Result<RdfFormat> {
    dqv::io::format_from_name(name).with_context(|| format!("Unknown RDF format: {name}"))
}
