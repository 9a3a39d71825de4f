use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::PatternRuleConfig;
use crate::normalization::NormalizedUrl;
use anyhow::{Context, Result};
use regex::Regex;

pub const RULE_NAME: &str = "pattern_rule";

/// Whole-URL shapes common to phishing kits, e.g. `login` followed by digits
/// or `update` ... `payment`.
#[derive(Debug, Clone)]
pub struct PhishingPatternRule {
    patterns: Vec<(String, Regex)>,
}

impl PhishingPatternRule {
    pub fn from_config(config: &PatternRuleConfig) -> Result<Self> {
        let patterns = config
            .patterns
            .iter()
            .map(|named| {
                Regex::new(&format!("(?i){}", named.pattern))
                    .map(|regex| (named.name.clone(), regex))
                    .with_context(|| {
                        format!(
                            "Invalid phishing pattern '{}': {}",
                            named.name, named.pattern
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn matched_patterns(&self, url: &str) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(url))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl UrlRule for PhishingPatternRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        let matched = self.matched_patterns(&url.url);
        if matched.is_empty() {
            return Vec::new();
        }

        vec![Finding::issue(
            RULE_NAME,
            RiskLevel::High,
            format!("Matches known phishing URL pattern: {}", matched.join(", ")),
        )
        .disqualifying()]
    }

    fn name(&self) -> &str {
        RULE_NAME
    }
}
