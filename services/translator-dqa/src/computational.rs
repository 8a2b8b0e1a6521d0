use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use graphdb::sanitize_repo_id;
use tracing::info;

use crate::pipeline::Pipeline;
use crate::validator::ValidationTarget;

#[derive(Debug)]
pub struct ComputationalOutcome {
    pub report: PathBuf,
    pub repo_id: String,
}

/// Title of the repository holding a dataset's computational metrics.
pub fn repository_title(file_name: &str) -> String {
    format!("{file_name} - Data Quality Computational Metrics")
}

impl Pipeline {
    /// Validate `dataset`, then replace its repository with the fresh report.
    ///
    /// The import is only started; GraphDB may keep loading after this returns.
    pub async fn computational_metrics(&self, dataset: &Path) -> Result<ComputationalOutcome> {
        let file_name = dataset
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Dataset path has no file name: {}", dataset.display()))?;

        let report = self
            .validator
            .run_validation(dataset, ValidationTarget::default())
            .await
            .with_context(|| format!("Validation failed for {}", dataset.display()))?;
        let report = absolute(report)?;

        let repo_id = sanitize_repo_id(&file_name);
        let data_url = format!("file://{}", report.display());

        self.repository
            .delete_repository(&repo_id)
            .await
            .with_context(|| format!("Failed to delete repository {repo_id}"))?;
        self.repository
            .create_repository(&repo_id, &repository_title(&file_name))
            .await
            .with_context(|| format!("Failed to create repository {repo_id}"))?;
        self.repository
            .import_from_url(&repo_id, &data_url)
            .await
            .with_context(|| format!("Failed to start import into {repo_id}"))?;

        info!(dataset=%dataset.display(), repo_id=%repo_id, "computational metrics submitted");
        Ok(ComputationalOutcome { report, repo_id })
    }
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    Ok(cwd.join(path))
}
