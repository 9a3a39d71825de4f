use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::KeywordRuleConfig;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "keyword_rule";

/// Urgency and threat vocabulary in the path or query string.
///
/// All matched keywords are reported in a single issue. Any keyword from the
/// severe subset makes the issue High, otherwise it is Medium.
#[derive(Debug, Clone)]
pub struct UrgencyKeywordRule {
    keywords: Vec<String>,
    severe_keywords: Vec<String>,
}

impl Default for UrgencyKeywordRule {
    fn default() -> Self {
        Self::from_config(&KeywordRuleConfig::default())
    }
}

impl UrgencyKeywordRule {
    pub fn from_config(config: &KeywordRuleConfig) -> Self {
        Self {
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
            severe_keywords: config
                .severe_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    pub fn matched_keywords<'a>(&'a self, target: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|keyword| target.contains(keyword.as_str()))
            .map(|keyword| keyword.as_str())
            .collect()
    }
}

impl UrlRule for UrgencyKeywordRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        let target = url.path_and_query();
        let matched = self.matched_keywords(&target);
        if matched.is_empty() {
            return Vec::new();
        }

        let severe = matched
            .iter()
            .any(|keyword| self.severe_keywords.iter().any(|s| s.as_str() == *keyword));
        let severity = if severe {
            RiskLevel::High
        } else {
            RiskLevel::Medium
        };

        vec![Finding::issue(
            RULE_NAME,
            severity,
            format!(
                "Contains urgent or threatening keywords in path: {}",
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
    fn test_mild_keyword_is_medium() {
        let rule = UrgencyKeywordRule::default();
        let findings = rule.evaluate(&normalize("https://example.com/secure-login").unwrap());

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, RiskLevel::Medium);
        assert!(findings[0].message.ends_with("secure"));
    }

    #[test]
    fn test_severe_keyword_is_high() {
        let rule = UrgencyKeywordRule::default();
        let findings =
            rule.evaluate(&normalize("http://amaz0n.com/account-suspended").unwrap());

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, RiskLevel::High);
    }

    #[test]
    fn test_query_is_inspected_and_all_matches_listed() {
        let rule = UrgencyKeywordRule::default();
        let findings =
            rule.evaluate(&normalize("https://example.com/Update?status=LOCKED").unwrap());

        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("update, locked"));
        assert_eq!(findings[0].severity, RiskLevel::Medium);
    }

    #[test]
    fn test_host_is_not_inspected() {
        let rule = UrgencyKeywordRule::default();
        assert!(rule
            .evaluate(&normalize("https://urgent-alerts.example.com/").unwrap())
            .is_empty());
    }
}
