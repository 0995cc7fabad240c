//! Feature flags and scope checks gating mutation affordances.

use serde::{Deserialize, Serialize};

/// Scopes required per operation on a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureScopes {
    pub create: Vec<String>,
    pub read: Vec<String>,
    pub update: Vec<String>,
    pub delete: Vec<String>,
}

/// Deployment-level configuration of a console feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureAccessConfig {
    pub enabled: bool,
    #[serde(alias = "disabledFeatures")]
    pub disabled_features: Vec<String>,
    pub scopes: FeatureScopes,
}

impl Default for FeatureAccessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            disabled_features: Vec::new(),
            scopes: FeatureScopes::default(),
        }
    }
}

/// Whether the caller holds every scope a feature operation requires.
///
/// `granted` is the space-separated scope string of the session. Absent
/// feature configuration or an empty requirement list means no restriction.
pub fn has_required_scopes(
    feature: Option<&FeatureAccessConfig>,
    required: &[String],
    granted: &str,
) -> bool {
    if feature.is_none() || required.is_empty() {
        return true;
    }

    required
        .iter()
        .all(|scope| granted.split_whitespace().any(|g| g == scope))
}

/// Whether a sub-feature key is enabled for a feature.
pub fn is_feature_enabled(feature: Option<&FeatureAccessConfig>, key: &str) -> bool {
    feature.is_some_and(|f| f.enabled && !f.disabled_features.iter().any(|d| d == key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_requiring(update: &[&str]) -> FeatureAccessConfig {
        FeatureAccessConfig {
            scopes: FeatureScopes {
                update: update.iter().map(|s| (*s).to_owned()).collect(),
                ..FeatureScopes::default()
            },
            ..FeatureAccessConfig::default()
        }
    }

    #[test]
    fn missing_feature_or_requirement_is_unrestricted() {
        assert!(has_required_scopes(None, &["a".into()], ""));
        let feature = feature_requiring(&[]);
        assert!(has_required_scopes(Some(&feature), &feature.scopes.update, ""));
    }

    #[test]
    fn every_required_scope_must_be_granted() {
        let feature = feature_requiring(&["internal_config_update", "internal_config_view"]);
        let required = &feature.scopes.update;

        assert!(has_required_scopes(
            Some(&feature),
            required,
            "openid internal_config_view internal_config_update"
        ));
        assert!(!has_required_scopes(
            Some(&feature),
            required,
            "openid internal_config_view"
        ));
        assert!(!has_required_scopes(
            Some(&feature),
            required,
            "internal_config_update_extra internal_config_view"
        ));
    }

    #[test]
    fn feature_enabled_respects_disabled_list() {
        let feature = FeatureAccessConfig {
            disabled_features: vec!["ORGANIZATION_UPDATE".into()],
            ..FeatureAccessConfig::default()
        };
        assert!(!is_feature_enabled(Some(&feature), "ORGANIZATION_UPDATE"));
        assert!(is_feature_enabled(Some(&feature), "ORGANIZATION_DELETE"));
        assert!(!is_feature_enabled(None, "ORGANIZATION_UPDATE"));

        let disabled = FeatureAccessConfig {
            enabled: false,
            ..FeatureAccessConfig::default()
        };
        assert!(!is_feature_enabled(Some(&disabled), "ORGANIZATION_DELETE"));
    }

    #[test]
    fn deserializes_camel_case_alias() {
        let feature: FeatureAccessConfig = serde_json::from_value(serde_json::json!({
            "disabledFeatures": ["X"],
            "scopes": {"update": ["s"]}
        }))
        .unwrap();
        assert!(feature.enabled);
        assert_eq!(feature.disabled_features, ["X"]);
        assert_eq!(feature.scopes.update, ["s"]);
    }
}
