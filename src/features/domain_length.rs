use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::LengthRuleConfig;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "length_rule";

#[derive(Debug, Clone)]
pub struct DomainLengthRule {
    max_length: usize,
}

impl Default for DomainLengthRule {
    fn default() -> Self {
        Self::from_config(&LengthRuleConfig::default())
    }
}

impl DomainLengthRule {
    pub fn from_config(config: &LengthRuleConfig) -> Self {
        Self {
            max_length: config.max_length,
        }
    }
}

impl UrlRule for DomainLengthRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        let length = url.host.chars().count();
        if length <= self.max_length {
            return Vec::new();
        }

        vec![Finding::issue(
            RULE_NAME,
            RiskLevel::Medium,
            format!("Unusually long domain name ({} characters)", length),
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
    fn test_length_boundary() {
        let rule = DomainLengthRule::default();

        // 30 characters exactly
        let at_limit = format!("https://{}.com", "a".repeat(26));
        assert!(rule.evaluate(&normalize(&at_limit).unwrap()).is_empty());

        let over = format!("https://{}.com", "a".repeat(27));
        let findings = rule.evaluate(&normalize(&over).unwrap());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("31 characters"));
    }
}
