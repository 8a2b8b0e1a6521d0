use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use translator_dqa::config::{parse_rdf_format, AppConfig};
use translator_dqa::{Pipeline, RunRequest};

const EXAMPLES: &str = "\
Examples:

Single data set, preliminary statistics only:
  translator-dqa -f https://fairsharing.org/biodbcore-000340

Single data set, computational metrics only:
  translator-dqa -d /home/user/data/data.ttl

Single data set, preliminary and computational metrics:
  translator-dqa -f https://fairsharing.org/biodbcore-000340 -d /home/user/data/data.ttl

Multiple data sets defined in a CSV file:
  translator-dqa -m /home/user/data/multiple_data_sets.csv";

/// Data quality analysis for linked-open datasets. Gathers preliminary data
/// quality statistics and/or computational metrics on data sets.
#[derive(Parser, Debug)]
#[command(name = "translator-dqa", version, after_help = EXAMPLES)]
struct Cli {
    /// FAIRsharing.org URL for preliminary statistics
    #[arg(short = 'f', value_name = "URL")]
    fair_url: Option<String>,

    /// Path to data file for computational metrics
    #[arg(short = 'd', value_name = "PATH")]
    file_data: Option<PathBuf>,

    /// CSV file defining multiple data sets, one `[FAIRsharing.org URL],[data set file]`
    /// per line. Either half may be empty. When given, -f and -d are ignored.
    #[arg(short = 'm', value_name = "CSV")]
    file_multi: Option<PathBuf>,

    /// Output directory [env: DQA_OUTPUT_DIR]
    #[arg(long = "output", value_name = "DIR")]
    output: Option<PathBuf>,

    /// Directory holding the vocabulary definitions [env: DQA_RESOURCE_DIR]
    #[arg(long = "resources", value_name = "DIR")]
    resources: Option<PathBuf>,

    /// GraphDB base URL [env: DQA_GRAPHDB_URL]
    #[arg(long = "graphdb", value_name = "URL")]
    graphdb: Option<String>,

    /// RDFUnit validator jar [env: DQA_VALIDATOR_JAR]
    #[arg(long = "validator", value_name = "JAR")]
    validator: Option<PathBuf>,

    /// Log progress messages
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Serialization of the quality graphs (ttl, nt, rdf, ...)
    #[arg(long = "format", value_name = "FORMAT")]
    format: Option<String>,
}

impl Cli {
    fn apply(&self, cfg: &mut AppConfig) -> Result<()> {
        if let Some(dir) = &self.output {
            cfg.output_dir = dir.clone();
        }
        if let Some(dir) = &self.resources {
            cfg.resource_dir = dir.clone();
        }
        if let Some(url) = &self.graphdb {
            cfg.graphdb_url = url.clone();
        }
        if let Some(jar) = &self.validator {
            cfg.validator_jar = jar.clone();
        }
        if self.verbose {
            cfg.verbose = true;
        }
        if let Some(name) = &self.format {
            cfg.rdf_format = parse_rdf_format(name)?;
        }
        cfg.validate()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    // flags may repair a bad environment value, so validate after overrides
    let mut cfg = AppConfig::from_env_unchecked();
    cli.apply(&mut cfg)?;

    let default_level = if cfg.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let Some(request) = RunRequest::from_args(cli.fair_url.clone(), cli.file_data.clone(), cli.file_multi.clone())
    else {
        Cli::command()
            .error(clap::error::ErrorKind::MissingRequiredArgument, "one of -f, -d or -m is required")
            .exit();
    };

    let client = reqwest::Client::builder()
        .user_agent(concat!("translator-dqa/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    let pipeline = Pipeline::from_config(&cfg, client)?;

    let summary = pipeline.run(&request).await?;
    info!(
        output=%pipeline.output_dir().display(),
        summary=%serde_json::to_string(&summary)?,
        "translator-dqa: finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "translator-dqa",
            "-d",
            "/data/kegg.ttl",
            "--output",
            "/tmp/dqa",
            "--graphdb",
            "http://graphdb:7200",
            "--format",
            "nt",
        ]);
        let mut cfg = AppConfig::default();
        cli.apply(&mut cfg).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/dqa"));
        assert_eq!(cfg.graphdb_url, "http://graphdb:7200");
        assert_eq!(cfg.rdf_format, dqv::RdfFormat::NTriples);
        assert_eq!(cli.file_data, Some(PathBuf::from("/data/kegg.ttl")));
    }

    #[test]
    fn test_flag_overrides_invalid_env_value() {
        let env = |key: &str| (key == "DQA_GRAPHDB_URL").then(|| "localhost:7200".to_string());
        let mut cfg = AppConfig::from_lookup(env);
        assert!(cfg.validate().is_err());

        let cli = Cli::parse_from(["translator-dqa", "-f", "u", "--graphdb", "http://graphdb:7200/"]);
        cli.apply(&mut cfg).unwrap();
        assert_eq!(cfg.graphdb_url, "http://graphdb:7200/");
    }

    #[test]
    fn test_bad_graphdb_flag_is_rejected() {
        let cli = Cli::parse_from(["translator-dqa", "-f", "u", "--graphdb", "graphdb:7200"]);
        assert!(cli.apply(&mut AppConfig::default()).is_err());
    }
}
