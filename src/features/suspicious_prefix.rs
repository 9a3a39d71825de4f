use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::PrefixRuleConfig;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "prefix_rule";

/// Flags hostnames built around alarm words such as `secure-` or `verify-`.
#[derive(Debug, Clone)]
pub struct SuspiciousPrefixRule {
    prefixes: Vec<String>,
}

impl Default for SuspiciousPrefixRule {
    fn default() -> Self {
        Self::from_config(&PrefixRuleConfig::default())
    }
}

impl SuspiciousPrefixRule {
    pub fn from_config(config: &PrefixRuleConfig) -> Self {
        Self {
            prefixes: config.prefixes.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    pub fn matched_prefixes<'a>(&'a self, host: &str) -> Vec<&'a str> {
        self.prefixes
            .iter()
            .filter(|prefix| host.contains(prefix.as_str()))
            .map(|prefix| prefix.as_str())
            .collect()
    }
}

impl UrlRule for SuspiciousPrefixRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        let matched = self.matched_prefixes(&url.host);
        if matched.is_empty() {
            return Vec::new();
        }

        vec![Finding::issue(
            RULE_NAME,
            RiskLevel::High,
            format!(
                "Domain uses alarm-word prefix often seen in phishing: {}",
                matched.join(", ")
            ),
        )]
    }

    fn name(&self) -> &str {
        RULE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::normalize;

    #[test]
    fn test_all_prefixes_listed() {
        let rule = SuspiciousPrefixRule::default();
        let url = normalize("https://my-bank-secure-verify-update.tk").unwrap();

        assert_eq!(rule.matched_prefixes(&url.host), vec!["secure-", "verify-"]);
        let findings = rule.evaluate(&url);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, RiskLevel::High);
        assert!(findings[0].message.contains("secure-, verify-"));
    }

    #[test]
    fn test_prefix_only_checked_in_host() {
        let rule = SuspiciousPrefixRule::default();
        assert!(rule
            .evaluate(&normalize("https://example.com/login-now").unwrap())
            .is_empty());
        assert!(rule
            .evaluate(&normalize("https://support.apple.com").unwrap())
            .is_empty());
    }
}
