use anyhow::{Context, Result};
use async_trait::async_trait;
use heat_lifecycle::{ActionKind, LifecycleActions};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Sources the function library and runs one of its functions. Both are
/// passed as positional arguments so the path never needs quoting inside
/// the script itself.
const HOOK_SCRIPT: &str = "set -o errexit\nsource \"$1\"\n\"$2\"";

/// Production [`LifecycleActions`]: each action sources the framework's
/// shell function library and invokes the identically named function.
/// Stdout is inherited so install logs stream to the operator; stderr is
/// captured for error reporting.
pub struct ShellHooks {
    library: PathBuf,
}

impl ShellHooks {
    /// `top_dir` is the framework checkout; the function library lives at
    /// `<top_dir>/lib/heat`.
    pub fn new(top_dir: impl AsRef<Path>) -> Self {
        Self {
            library: top_dir.as_ref().join("lib").join("heat"),
        }
    }

    pub fn library(&self) -> &Path {
        &self.library
    }

    async fn invoke(&self, kind: ActionKind) -> Result<()> {
        let function = kind.function_name();

        tracing::debug!(%function, library = %self.library.display(), "invoking hook function");

        // Stdout stays inherited so install logs stream to the operator;
        // stderr is captured so a failure can carry the collaborator's
        // message in the error.
        let child = Command::new("bash")
            .arg("-c")
            .arg(HOOK_SCRIPT)
            .arg("heat-plugin")
            .arg(&self.library)
            .arg(function)
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn bash for {function}"))?;

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("failed to wait for {function}"))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                anyhow::bail!("{function} exited with {}", output.status);
            }
            anyhow::bail!("{function} exited with {}: {stderr}", output.status);
        }
    }
}

#[async_trait]
impl LifecycleActions for ShellHooks {
    fn announce(&self, message: &str) {
        println!("{} {}", console::style("==>").cyan().bold(), message);
    }

    async fn install_client(&self) -> Result<()> {
        self.invoke(ActionKind::InstallClient).await
    }

    async fn install_package(&self) -> Result<()> {
        self.invoke(ActionKind::InstallPackage).await
    }

    async fn install_other(&self) -> Result<()> {
        self.invoke(ActionKind::InstallOther).await
    }

    async fn configure(&self) -> Result<()> {
        self.invoke(ActionKind::Configure).await
    }

    async fn create_accounts(&self) -> Result<()> {
        self.invoke(ActionKind::CreateAccounts).await
    }

    async fn init(&self) -> Result<()> {
        self.invoke(ActionKind::Init).await
    }

    async fn start(&self) -> Result<()> {
        self.invoke(ActionKind::Start).await
    }

    async fn stop(&self) -> Result<()> {
        self.invoke(ActionKind::Stop).await
    }

    async fn cleanup(&self) -> Result<()> {
        self.invoke(ActionKind::Cleanup).await
    }

    async fn build_pip_mirror(&self) -> Result<()> {
        self.invoke(ActionKind::BuildPipMirror).await
    }
}
