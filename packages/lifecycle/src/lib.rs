pub mod actions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod phase;

pub use actions::{ActionKind, LifecycleActions};
pub use config::{DispatchConfig, FeatureFlags, ServiceSet, HEAT_SERVICE_TAGS, KEYSTONE_TAG};
pub use dispatch::DispatchReport;
pub use error::DispatchError;
pub use phase::{Phase, PhaseParseError, SubPhase};
