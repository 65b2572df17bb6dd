use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of each opaque lifecycle action the dispatcher can invoke.
/// Carried in errors and reports so callers can name the step that ran
/// or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    InstallClient,
    InstallPackage,
    InstallOther,
    Configure,
    CreateAccounts,
    Init,
    Start,
    Stop,
    Cleanup,
    BuildPipMirror,
}

impl ActionKind {
    /// Name of the external library function this action maps to.
    pub fn function_name(self) -> &'static str {
        match self {
            ActionKind::InstallClient => "install_heatclient",
            ActionKind::InstallPackage => "install_heat",
            ActionKind::InstallOther => "install_heat_other",
            ActionKind::Configure => "configure_heat",
            ActionKind::CreateAccounts => "create_heat_accounts",
            ActionKind::Init => "init_heat",
            ActionKind::Start => "start_heat",
            ActionKind::Stop => "stop_heat",
            ActionKind::Cleanup => "cleanup_heat",
            ActionKind::BuildPipMirror => "build_heat_pip_mirror",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

/// Capability interface for the external lifecycle collaborators.
/// The dispatcher sequences these calls but implements none of them;
/// the production implementation shells out to the framework's function
/// library, tests substitute a recording double.
#[async_trait]
pub trait LifecycleActions: Send + Sync {
    /// Progress summary shown to the operator between steps.
    fn announce(&self, message: &str) {
        tracing::info!("{message}");
    }

    /// Install the client library.
    async fn install_client(&self) -> Result<()>;

    /// Install the main service package.
    async fn install_package(&self) -> Result<()>;

    /// Install auxiliary components.
    async fn install_other(&self) -> Result<()>;

    /// Write out service configuration.
    async fn configure(&self) -> Result<()>;

    /// Provision service accounts in the identity service.
    async fn create_accounts(&self) -> Result<()>;

    /// One-time initialization before first start.
    async fn init(&self) -> Result<()>;

    /// Start the service processes.
    async fn start(&self) -> Result<()>;

    /// Stop the service processes.
    async fn stop(&self) -> Result<()>;

    /// Remove artifacts left behind by install or a previous run.
    async fn cleanup(&self) -> Result<()>;

    /// Build a local pip package mirror.
    async fn build_pip_mirror(&self) -> Result<()>;
}
