use crate::actions::{ActionKind, LifecycleActions};
use crate::config::{DispatchConfig, KEYSTONE_TAG};
use crate::error::DispatchError;
use crate::phase::{Phase, SubPhase};

/// What a single dispatch invocation did, in order. Empty when the
/// phase/sub-phase pair has no entry in the table or the guard held
/// everything back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub executed: Vec<ActionKind>,
}

impl DispatchReport {
    pub fn is_noop(&self) -> bool {
        self.executed.is_empty()
    }
}

/// Run the lifecycle sequence for one phase transition.
///
/// The whole dispatch is a no-op unless one of the heat sub-services is
/// enabled. Within a matched entry the actions run sequentially, exactly
/// once, and the first failure aborts the rest of the sequence.
pub async fn run(
    phase: Phase,
    sub_phase: Option<SubPhase>,
    config: &DispatchConfig,
    actions: &dyn LifecycleActions,
) -> Result<DispatchReport, DispatchError> {
    let mut runner = Runner {
        actions,
        executed: Vec::new(),
    };

    if !config.heat_enabled() {
        tracing::debug!(%phase, "no heat sub-service enabled, skipping dispatch");
        return Ok(runner.finish());
    }

    match (phase, sub_phase) {
        (Phase::Stack, Some(SubPhase::Install)) => {
            actions.announce("Installing heat");
            runner.step(ActionKind::InstallClient).await?;
            runner.step(ActionKind::InstallPackage).await?;
            runner.step(ActionKind::InstallOther).await?;
            runner.step(ActionKind::Cleanup).await?;
        }
        (Phase::Stack, Some(SubPhase::PostConfig)) => {
            actions.announce("Configuring heat");
            runner.step(ActionKind::Configure).await?;
            if config.services.is_enabled(KEYSTONE_TAG) {
                runner.step(ActionKind::CreateAccounts).await?;
            }
        }
        (Phase::Stack, Some(SubPhase::Extra)) => {
            runner.step(ActionKind::Init).await?;
            actions.announce("Starting heat");
            runner.step(ActionKind::Start).await?;
            if config.features.build_pip_mirror {
                actions.announce("Building heat pip mirror");
                runner.step(ActionKind::BuildPipMirror).await?;
            }
        }
        // The teardown phases ignore whatever sub-phase the framework passed.
        (Phase::Unstack, _) => {
            actions.announce("Stopping heat");
            runner.step(ActionKind::Stop).await?;
        }
        (Phase::Clean, _) => {
            actions.announce("Cleaning heat");
            runner.step(ActionKind::Cleanup).await?;
        }
        (Phase::Stack, None) => {
            tracing::debug!("stack phase without a matching sub-phase, nothing to do");
        }
    }

    Ok(runner.finish())
}

struct Runner<'a> {
    actions: &'a dyn LifecycleActions,
    executed: Vec<ActionKind>,
}

impl Runner<'_> {
    async fn step(&mut self, kind: ActionKind) -> Result<(), DispatchError> {
        tracing::debug!(action = %kind, "running lifecycle action");
        let result = match kind {
            ActionKind::InstallClient => self.actions.install_client().await,
            ActionKind::InstallPackage => self.actions.install_package().await,
            ActionKind::InstallOther => self.actions.install_other().await,
            ActionKind::Configure => self.actions.configure().await,
            ActionKind::CreateAccounts => self.actions.create_accounts().await,
            ActionKind::Init => self.actions.init().await,
            ActionKind::Start => self.actions.start().await,
            ActionKind::Stop => self.actions.stop().await,
            ActionKind::Cleanup => self.actions.cleanup().await,
            ActionKind::BuildPipMirror => self.actions.build_pip_mirror().await,
        };

        match result {
            Ok(()) => {
                self.executed.push(kind);
                Ok(())
            }
            Err(source) => Err(DispatchError {
                action: kind,
                source,
            }),
        }
    }

    fn finish(self) -> DispatchReport {
        DispatchReport {
            executed: self.executed,
        }
    }
}
