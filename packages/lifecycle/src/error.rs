use crate::actions::ActionKind;
use thiserror::Error;

/// A lifecycle action failed. The dispatcher stops at the first failure;
/// `action` names the step so the caller can point the operator at it.
#[derive(Debug, Error)]
#[error("lifecycle action '{action}' failed")]
pub struct DispatchError {
    pub action: ActionKind,
    #[source]
    pub source: anyhow::Error,
}
