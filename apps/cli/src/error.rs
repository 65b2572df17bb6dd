use heat_lifecycle::DispatchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl HookError {
    /// Returns an actionable suggestion for the error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            HookError::Config(_) => Some(
                "Check TOP_DIR (or pass --top-dir) and ENABLED_SERVICES in the stack environment."
                    .to_string(),
            ),
            HookError::Dispatch(e) => Some(format!(
                "Inspect the output of '{}' above; re-run this phase once the cause is fixed.",
                e.action
            )),
        }
    }

    pub fn render(&self) {
        eprintln!("\n{} {}", console::style("Error:").red().bold(), self);
        if let HookError::Dispatch(e) = self {
            eprintln!("{} {:#}", console::style("  cause:").dim(), e.source);
        }
        if let Some(s) = self.suggestion() {
            eprintln!("{} {}", console::style("  help:").dim(), s);
        }
    }
}
