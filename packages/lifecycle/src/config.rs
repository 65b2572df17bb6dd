use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Service tags that mark the heat sub-services. Dispatch is a no-op unless
/// at least one of these is enabled.
pub const HEAT_SERVICE_TAGS: [&str; 4] = ["h-eng", "h-api", "h-api-cfn", "h-api-cw"];

/// Tag for the identity service; gates account creation during post-config.
pub const KEYSTONE_TAG: &str = "key";

/// The set of service tags the framework has enabled for this run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSet(BTreeSet<String>);

impl ServiceSet {
    /// Parse the framework's comma-separated enabled-services string.
    /// Blank entries and surrounding whitespace are tolerated.
    pub fn from_enabled(spec: &str) -> Self {
        spec.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
    }

    pub fn is_enabled(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn any_enabled<'a>(&self, tags: impl IntoIterator<Item = &'a str>) -> bool {
        tags.into_iter().any(|tag| self.is_enabled(tag))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ServiceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Feature toggles sourced from the framework environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Build a local pip package mirror after the service starts.
    pub build_pip_mirror: bool,
}

impl FeatureFlags {
    /// The mirror flag triggers only on the exact literal `"True"`; any
    /// other value, including unset, leaves it off.
    pub fn from_mirror_value(value: Option<&str>) -> Self {
        Self {
            build_pip_mirror: value == Some("True"),
        }
    }
}

/// Everything the dispatcher reads. Built once by the caller; the dispatcher
/// itself never touches the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    pub services: ServiceSet,
    pub features: FeatureFlags,
}

impl DispatchConfig {
    /// True when any heat sub-service is enabled.
    pub fn heat_enabled(&self) -> bool {
        self.services.any_enabled(HEAT_SERVICE_TAGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn service_set_parses_comma_separated_tags() {
        let set = ServiceSet::from_enabled("key, h-eng,h-api ,,rabbit");
        assert!(set.is_enabled("h-eng"));
        assert!(set.is_enabled("h-api"));
        assert!(set.is_enabled("rabbit"));
        assert!(!set.is_enabled("h-api-cfn"));
    }

    #[test]
    fn empty_spec_enables_nothing() {
        let set = ServiceSet::from_enabled("");
        assert!(set.is_empty());
        assert!(!set.any_enabled(HEAT_SERVICE_TAGS));
    }

    #[test]
    fn heat_enabled_requires_a_heat_tag() {
        let without: DispatchConfig = DispatchConfig {
            services: ServiceSet::from_enabled("key,rabbit,mysql"),
            ..Default::default()
        };
        assert!(!without.heat_enabled());

        let with = DispatchConfig {
            services: ServiceSet::from_enabled("key,h-api-cfn"),
            ..Default::default()
        };
        assert!(with.heat_enabled());
    }

    #[test]
    fn mirror_flag_matches_only_the_exact_literal() {
        assert!(FeatureFlags::from_mirror_value(Some("True")).build_pip_mirror);
        assert!(!FeatureFlags::from_mirror_value(Some("true")).build_pip_mirror);
        assert!(!FeatureFlags::from_mirror_value(Some("TRUE")).build_pip_mirror);
        assert!(!FeatureFlags::from_mirror_value(Some("1")).build_pip_mirror);
        assert!(!FeatureFlags::from_mirror_value(None).build_pip_mirror);
    }
}
