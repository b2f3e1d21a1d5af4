use std::fmt;
use std::path::{Path, PathBuf};

/// Crash record for one failed file analysis: the failing path, tool and
/// platform identification, and the failure cause. Written to the diagnostic
/// sink so users can attach it to bug reports.
#[derive(Debug, Clone)]
pub struct CrashReport {
    pub path: PathBuf,
    pub tool_version: &'static str,
    pub platform: String,
    pub cause: String,
}

impl CrashReport {
    #[must_use]
    pub fn new(path: &Path, cause: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            tool_version: env!("CARGO_PKG_VERSION"),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
            cause: cause.into(),
        }
    }
}

impl fmt::Display for CrashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Analyzing '{}' led to an unexpected failure.",
            self.path.display()
        )?;
        writeln!(
            f,
            "Running treelint '{}' on '{}'.",
            self.tool_version, self.platform
        )?;
        writeln!(f, "Please create an issue and report this failure.")?;
        write!(f, "Cause: {}", self.cause)
    }
}

/// Write-only stream receiving crash reports.
///
/// Invoked from the merge step after the parallel batch completes.
pub trait DiagnosticSink: Send + Sync {
    fn crash(&self, report: &CrashReport);
}

/// Default sink: prints crash reports to stderr.
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn crash(&self, report: &CrashReport) {
        eprintln!("\n{report}");
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
