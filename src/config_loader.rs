use crate::analysis::RiskLevel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Settings every rule section carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub enabled: bool,
    /// Replaces the level of every issue the rule emits.
    pub severity: Option<RiskLevel>,
    /// Replaces the rule's built-in disqualifier membership.
    pub disqualifying: Option<bool>,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            disqualifying: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    /// Flag input that had no scheme and was assumed to be HTTPS.
    pub penalize_missing_scheme: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    pub prefixes: Vec<String>,
}

impl Default for PrefixRuleConfig {
    fn default() -> Self {
        Self {
            settings: RuleSettings::default(),
            prefixes: strings(&[
                "login-",
                "secure-",
                "verify-",
                "account-",
                "support-",
                "help-",
                "update-",
                "confirm-",
                "alert-",
                "warning-",
                "security-",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    /// brand name -> character-substituted spellings of it
    pub brands: BTreeMap<String, Vec<String>>,
}

impl Default for SubstitutionRuleConfig {
    fn default() -> Self {
        let mut brands = BTreeMap::new();
        brands.insert(
            "paypal".to_string(),
            strings(&["payp4l", "p4ypal", "p4yp4l", "paypa1", "paypaI"]),
        );
        brands.insert(
            "amazon".to_string(),
            strings(&["amaz0n", "am4zon", "4mazon", "am4z0n"]),
        );
        brands.insert(
            "google".to_string(),
            strings(&["g00gle", "go0gle", "g0ogle", "goog1e"]),
        );
        brands.insert(
            "microsoft".to_string(),
            strings(&["micr0soft", "micros0ft", "micr0s0ft", "m1crosoft"]),
        );
        brands.insert("apple".to_string(), strings(&["app1e", "4pple", "appIe"]));
        brands.insert(
            "facebook".to_string(),
            strings(&["faceb00k", "f4cebook", "faceb0ok", "facebo0k"]),
        );
        brands.insert(
            "bankofamerica".to_string(),
            strings(&["bank0famerica", "b4nkofamerica", "bankofamer1ca"]),
        );

        Self {
            settings: RuleSettings::default(),
            brands,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainAllowlistRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    pub domains: Vec<String>,
}

impl Default for DomainAllowlistRuleConfig {
    fn default() -> Self {
        Self {
            settings: RuleSettings::default(),
            domains: strings(&[
                "google.com",
                "facebook.com",
                "amazon.com",
                "paypal.com",
                "microsoft.com",
                "apple.com",
                "github.com",
                "bankofamerica.com",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TldRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    pub tlds: Vec<String>,
}

impl Default for TldRuleConfig {
    fn default() -> Self {
        Self {
            settings: RuleSettings::default(),
            tlds: strings(&["tk", "ml", "ga", "cf", "gq", "xyz", "click", "download", "top"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortenerRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    pub domains: Vec<String>,
}

impl Default for ShortenerRuleConfig {
    fn default() -> Self {
        Self {
            settings: RuleSettings::default(),
            domains: strings(&[
                "bit.ly",
                "tinyurl.com",
                "t.co",
                "goo.gl",
                "ow.ly",
                "is.gd",
                "v.gd",
                "tiny.cc",
                "rb.gy",
                "cutt.ly",
                "shorturl.at",
                "buff.ly",
                "rebrand.ly",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    pub max_hyphens: usize,
    pub max_labels: usize,
}

impl Default for StructureRuleConfig {
    fn default() -> Self {
        Self {
            settings: RuleSettings::default(),
            max_hyphens: 2,
            max_labels: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    pub keywords: Vec<String>,
    /// Subset of keywords that push the link straight to High.
    pub severe_keywords: Vec<String>,
}

impl Default for KeywordRuleConfig {
    fn default() -> Self {
        Self {
            settings: RuleSettings::default(),
            keywords: strings(&[
                "urgent", "suspend", "verify", "confirm", "update", "secure", "alert", "warning",
                "blocked", "limited", "expired", "locked",
            ]),
            severe_keywords: strings(&["suspend", "urgent", "blocked", "expired"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    pub max_length: usize,
}

impl Default for LengthRuleConfig {
    fn default() -> Self {
        Self {
            settings: RuleSettings::default(),
            max_length: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternRuleConfig {
    #[serde(flatten)]
    pub settings: RuleSettings,
    pub patterns: Vec<NamedPattern>,
}

impl Default for PatternRuleConfig {
    fn default() -> Self {
        let patterns = [
            ("login followed by digits", r"login\d+"),
            ("secure followed by digits", r"secure\d+"),
            ("account then verify", r"account.*verify"),
            ("update then payment", r"update.*payment"),
            ("confirm then identity", r"confirm.*identity"),
        ];

        Self {
            settings: RuleSettings::default(),
            patterns: patterns
                .iter()
                .map(|(name, pattern)| NamedPattern {
                    name: name.to_string(),
                    pattern: pattern.to_string(),
                })
                .collect(),
        }
    }
}

/// Complete rule set: one section per rule category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSetConfig {
    pub protocol_rule: ProtocolRuleConfig,
    pub ip_rule: IpRuleConfig,
    pub prefix_rule: PrefixRuleConfig,
    pub substitution_rule: SubstitutionRuleConfig,
    pub domain_allowlist_rule: DomainAllowlistRuleConfig,
    pub tld_rule: TldRuleConfig,
    pub shortener_rule: ShortenerRuleConfig,
    pub structure_rule: StructureRuleConfig,
    pub keyword_rule: KeywordRuleConfig,
    pub length_rule: LengthRuleConfig,
    pub pattern_rule: PatternRuleConfig,
}

impl RuleSetConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse rule configuration YAML")
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule config file: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse rule config: {}", path.display()))?;

        log::info!("Loaded rule configuration from: {}", path.display());
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize rule configuration")
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write rule config file: {}", path.display()))
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = RuleSetConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, RuleSetConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_default_tables() {
        let yaml = "tld_rule:\n  enabled: false\nlength_rule:\n  max_length: 12\n  severity: High\n";
        let config = RuleSetConfig::from_yaml_str(yaml).unwrap();

        assert!(!config.tld_rule.settings.enabled);
        assert_eq!(config.tld_rule.tlds, TldRuleConfig::default().tlds);
        assert_eq!(config.length_rule.max_length, 12);
        assert_eq!(config.length_rule.settings.severity, Some(RiskLevel::High));
        assert!(config.length_rule.settings.enabled);
    }

    #[test]
    fn test_yaml_roundtrip_of_defaults() {
        let yaml = RuleSetConfig::default().to_yaml().unwrap();
        let parsed = RuleSetConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, RuleSetConfig::default());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/url_rules.yaml");
        let config = RuleSetConfig::load_from_file(path).unwrap();
        assert_eq!(config, RuleSetConfig::default());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = RuleSetConfig::load_from_file("/nonexistent/url_rules.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/url_rules.yaml"));
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(RuleSetConfig::from_yaml_str("tld_rule: [not, a, map]").is_err());
    }
}
