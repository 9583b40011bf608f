//! Opening a generated report in the system browser
//!
//! There is no platform detection. Each open command is tried in turn and the
//! first one that exits successfully wins.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{ViewerError, ViewerResult};

/// One way of handing a file to the desktop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenStrategy {
    /// Label used in the failure summary
    pub system_name: String,
    pub program: String,
    /// Arguments placed before the file path
    pub args: Vec<String>,
}

impl OpenStrategy {
    pub fn new(system_name: &str, program: &str, args: &[&str]) -> Self {
        Self {
            system_name: system_name.to_string(),
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Windows, then MacOS, then Linux
    pub fn platform_defaults() -> Vec<Self> {
        vec![
            Self::new("Windows", "cmd", &["/C", "start", ""]),
            Self::new("MacOS", "open", &[]),
            Self::new("Linux", "xdg-open", &[]),
        ]
    }

    /// Run the command and describe the failure, if any
    async fn attempt(&self, file: &Path) -> Option<String> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(file)
            .status()
            .await;

        match status {
            Ok(status) if status.success() => None,
            Ok(status) => Some(match status.code() {
                Some(code) => format!("{} -> {}", self.system_name, code),
                None => format!("{} -> terminated by signal", self.system_name),
            }),
            Err(e) => Some(format!("{} -> {}", self.system_name, e)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportViewer {
    strategies: Vec<OpenStrategy>,
}

impl Default for ReportViewer {
    fn default() -> Self {
        Self::with_strategies(OpenStrategy::platform_defaults())
    }
}

impl ReportViewer {
    pub fn with_strategies(strategies: Vec<OpenStrategy>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[OpenStrategy] {
        &self.strategies
    }

    /// Open a local HTML file
    ///
    /// The path is validated before any command runs.
    ///
    /// # Errors
    ///
    /// `LocalHtmlInvalid` for a path that does not end in `.html` or is not
    /// an existing file, `LaunchFailed` with every attempt's outcome if no
    /// strategy succeeded.
    pub async fn open(&self, file: &Path) -> ViewerResult<()> {
        validate(file)?;

        let mut attempts = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            debug!("Opening {} with {}", file.display(), strategy.program);
            match strategy.attempt(file).await {
                None => {
                    info!("Opened {} ({})", file.display(), strategy.system_name);
                    return Ok(());
                }
                Some(failure) => {
                    warn!("Open attempt failed: {}", failure);
                    attempts.push(failure);
                }
            }
        }

        Err(ViewerError::LaunchFailed {
            file: file.to_path_buf(),
            attempts,
        })
    }
}

fn validate(file: &Path) -> ViewerResult<()> {
    let invalid = |reason: &str| ViewerError::LocalHtmlInvalid {
        file: PathBuf::from(file),
        reason: reason.to_string(),
    };

    if !file.to_string_lossy().ends_with(".html") {
        return Err(invalid("must end with \".html\""));
    }
    if !file.is_file() {
        return Err(invalid("must exist"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn unreachable_strategy() -> OpenStrategy {
        OpenStrategy::new("Nowhere", "radar-viewer-no-such-program", &[])
    }

    #[tokio::test]
    async fn test_rejects_non_html_before_launching() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("report.txt");
        std::fs::write(&path, "<html></html>").unwrap();

        let viewer = ReportViewer::with_strategies(vec![unreachable_strategy()]);
        let result = viewer.open(&path).await;

        match result {
            Err(ViewerError::LocalHtmlInvalid { reason, .. }) => {
                assert!(reason.contains(".html"));
            }
            other => panic!("Expected LocalHtmlInvalid, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejects_missing_file() {
        let temp_dir = tempdir().unwrap();
        let viewer = ReportViewer::with_strategies(vec![unreachable_strategy()]);

        let result = viewer.open(&temp_dir.path().join("event_log.html")).await;
        assert!(matches!(result, Err(ViewerError::LocalHtmlInvalid { .. })));
    }

    #[tokio::test]
    async fn test_collects_every_failed_attempt() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("event_log.html");
        std::fs::write(&path, "<html></html>").unwrap();

        let viewer = ReportViewer::with_strategies(vec![
            unreachable_strategy(),
            OpenStrategy::new("Other", "radar-viewer-missing-too", &["--flag"]),
        ]);
        let error = viewer.open(&path).await.unwrap_err();

        match &error {
            ViewerError::LaunchFailed { attempts, .. } => {
                assert_eq!(attempts.len(), 2);
                assert!(attempts[0].starts_with("Nowhere -> "));
                assert!(attempts[1].starts_with("Other -> "));
            }
            other => panic!("Expected LaunchFailed, got {:?}", other),
        }
        assert!(error.to_string().contains("open failed. Exit codes:"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_first_success_wins() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("event_log.html");
        std::fs::write(&path, "<html></html>").unwrap();

        let viewer = ReportViewer::with_strategies(vec![
            OpenStrategy::new("Failing", "false", &[]),
            OpenStrategy::new("Working", "true", &[]),
            unreachable_strategy(),
        ]);
        assert!(viewer.open(&path).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_code_is_reported() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("event_log.html");
        std::fs::write(&path, "<html></html>").unwrap();

        let viewer = ReportViewer::with_strategies(vec![OpenStrategy::new("Failing", "false", &[])]);
        match viewer.open(&path).await {
            Err(ViewerError::LaunchFailed { attempts, .. }) => {
                assert_eq!(attempts, vec!["Failing -> 1".to_string()]);
            }
            other => panic!("Expected LaunchFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_platform_defaults_order() {
        let names: Vec<String> = ReportViewer::default()
            .strategies()
            .iter()
            .map(|s| s.system_name.clone())
            .collect();
        assert_eq!(names, vec!["Windows", "MacOS", "Linux"]);
    }
}
