//! RDFUnit as an external validation process.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::SystemTime;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("validator exited with {status}")]
    Exit { status: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("validator wrote no report under {dir}")]
    NoReport { dir: PathBuf },
}

pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Optional inputs for one validation run.
#[derive(Clone, Debug, Default)]
pub struct ValidationTarget<'a> {
    pub endpoint: Option<&'a str>,
    pub graph: Option<&'a str>,
    pub schema: Option<&'a str>,
}

#[async_trait]
pub trait Validator: Send + Sync {
    /// Validate `dataset` and return the path of the report it produced.
    async fn run_validation(&self, dataset: &Path, target: ValidationTarget<'_>) -> Result<PathBuf>;
}

pub struct RdfUnitValidator {
    java: String,
    jar: PathBuf,
    work_dir: PathBuf,
}

impl RdfUnitValidator {
    pub fn new(java: impl Into<String>, jar: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            jar: jar.into(),
            work_dir: work_dir.into(),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(cfg.java.clone(), cfg.validator_jar.clone(), cfg.validator_work_dir())
    }

    pub fn results_dir(&self) -> PathBuf {
        self.work_dir.join("results")
    }

    /// Arguments after the launcher: `-jar <jar> -d <dataset> [-e] [-g] [-s] -r aggregate -o ttl -f <work dir>`.
    pub fn args(&self, dataset: &Path, target: &ValidationTarget<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-jar".into(), self.jar.clone().into(), "-d".into(), dataset.into()];
        let optional = [("-e", target.endpoint), ("-g", target.graph), ("-s", target.schema)];
        for (flag, value) in optional {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                args.push(flag.into());
                args.push(v.into());
            }
        }
        args.extend(["-r", "aggregate", "-o", "ttl", "-f"].map(OsString::from));
        args.push(self.work_dir.clone().into());
        args
    }
}

#[async_trait]
impl Validator for RdfUnitValidator {
    async fn run_validation(&self, dataset: &Path, target: ValidationTarget<'_>) -> Result<PathBuf> {
        info!(dataset=%dataset.display(), "rdfunit: validating");

        let results = self.results_dir();
        let before = report_times(&results).await?;

        let mut cmd = Command::new(&self.java);
        cmd.args(self.args(dataset, &target));
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| ValidatorError::Spawn {
            program: self.java.clone(),
            source,
        })?;

        let mut streams = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            streams.push(tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(source = "stdout", "rdfunit: {line}");
                }
            }));
        }
        if let Some(stderr) = child.stderr.take() {
            streams.push(tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(source = "stderr", "rdfunit: {line}");
                }
            }));
        }

        let status = child.wait().await.map_err(|source| ValidatorError::Spawn {
            program: self.java.clone(),
            source,
        })?;
        for s in streams {
            let _ = s.await;
        }

        if !status.success() {
            warn!(dataset=%dataset.display(), %status, "rdfunit: validation failed");
            return Err(ValidatorError::Exit { status: status.to_string() });
        }

        let after = report_times(&results).await?;
        let report = newest_written(&before, after).ok_or(ValidatorError::NoReport { dir: results })?;
        info!(report=%report.display(), "rdfunit: report written");
        Ok(report)
    }
}

/// Modification times of every `.ttl` file directly under `dir`. A missing dir is empty.
async fn report_times(dir: &Path) -> Result<HashMap<PathBuf, SystemTime>> {
    let io_err = |source: std::io::Error| ValidatorError::Io { path: dir.to_path_buf(), source };

    let mut times = HashMap::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(times),
        Err(e) => return Err(io_err(e)),
    };
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("ttl") {
            continue;
        }
        let meta = entry.metadata().await.map_err(io_err)?;
        if meta.is_file() {
            times.insert(path, meta.modified().map_err(io_err)?);
        }
    }
    Ok(times)
}

/// The most recently modified report that is new or changed since `before`.
fn newest_written(
    before: &HashMap<PathBuf, SystemTime>,
    after: HashMap<PathBuf, SystemTime>,
) -> Option<PathBuf> {
    after
        .into_iter()
        .filter(|(path, modified)| before.get(path) != Some(modified))
        .max_by_key(|(_, modified)| *modified)
        .map(|(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_args_minimal() {
        let v = RdfUnitValidator::new("java", "RDFUnit/rdfunit-validate.jar", "RDFUnit");
        let args = v.args(Path::new("/data/kegg.ttl"), &ValidationTarget::default());
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "-jar", "RDFUnit/rdfunit-validate.jar", "-d", "/data/kegg.ttl",
                "-r", "aggregate", "-o", "ttl", "-f", "RDFUnit",
            ]
        );
    }

    #[test]
    fn test_args_with_endpoint_graph_schema() {
        let v = RdfUnitValidator::new("java", "v.jar", "w");
        let target = ValidationTarget {
            endpoint: Some("http://localhost:7200/sparql"),
            graph: Some("http://example.org/g"),
            schema: Some(""),
        };
        let args: Vec<String> = v
            .args(Path::new("d.ttl"), &target)
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(&args[4..8], ["-e", "http://localhost:7200/sparql", "-g", "http://example.org/g"]);
        assert!(!args.contains(&"-s".to_string()));
    }

    #[test]
    fn test_newest_written_ignores_stale_reports() {
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let t1 = t0 + Duration::from_secs(5);
        let t2 = t0 + Duration::from_secs(9);

        let before = HashMap::from([(PathBuf::from("old.ttl"), t0), (PathBuf::from("rerun.ttl"), t0)]);
        let after = HashMap::from([
            (PathBuf::from("old.ttl"), t0),
            (PathBuf::from("rerun.ttl"), t1),
            (PathBuf::from("new.ttl"), t2),
        ]);
        assert_eq!(newest_written(&before, after), Some(PathBuf::from("new.ttl")));

        let unchanged = HashMap::from([(PathBuf::from("old.ttl"), t0)]);
        assert_eq!(newest_written(&HashMap::from([(PathBuf::from("old.ttl"), t0)]), unchanged), None);
    }

    #[tokio::test]
    async fn test_missing_results_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let times = report_times(&dir.path().join("results")).await.unwrap();
        assert!(times.is_empty());
    }
}
