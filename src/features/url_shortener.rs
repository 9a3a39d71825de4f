use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::ShortenerRuleConfig;
use crate::domain_utils::DomainUtils;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "shortener_rule";

/// Shortened links hide their destination. Nothing is resolved here; the
/// shortener host alone is the signal.
#[derive(Debug, Clone)]
pub struct UrlShortenerRule {
    shorteners: Vec<String>,
}

impl Default for UrlShortenerRule {
    fn default() -> Self {
        Self::from_config(&ShortenerRuleConfig::default())
    }
}

impl UrlShortenerRule {
    pub fn from_config(config: &ShortenerRuleConfig) -> Self {
        Self {
            shorteners: config.domains.clone(),
        }
    }

    pub fn is_shortener(&self, host: &str) -> bool {
        DomainUtils::matches_domain_list(host, &self.shorteners)
    }
}

impl UrlRule for UrlShortenerRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        if !self.is_shortener(&url.host) {
            return Vec::new();
        }

        vec![Finding::issue(
            RULE_NAME,
            RiskLevel::Medium,
            format!("Uses URL shortener ({}) that hides the real destination", url.host),
        )]
    }

    fn name(&self) -> &str {
        RULE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_shortener() {
        let rule = UrlShortenerRule::default();

        assert!(rule.is_shortener("bit.ly"));
        assert!(rule.is_shortener("tinyurl.com"));
        assert!(rule.is_shortener("t.co"));
        assert!(!rule.is_shortener("google.com"));
        assert!(!rule.is_shortener("microsoft.com"));
        assert!(!rule.is_shortener("habit.ly.example.com"));
    }
}
