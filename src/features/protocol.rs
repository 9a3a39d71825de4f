use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::ProtocolRuleConfig;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "protocol_rule";

/// Rewards HTTPS and flags plain HTTP.
#[derive(Debug, Clone, Default)]
pub struct ProtocolRule {
    penalize_missing_scheme: bool,
}

impl ProtocolRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ProtocolRuleConfig) -> Self {
        Self {
            penalize_missing_scheme: config.penalize_missing_scheme,
        }
    }
}

impl UrlRule for ProtocolRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        let mut findings = Vec::new();

        match url.scheme.as_str() {
            "https" => findings.push(Finding::positive(RULE_NAME, "Uses HTTPS encryption")),
            "http" => findings.push(Finding::issue(
                RULE_NAME,
                RiskLevel::High,
                "Uses HTTP instead of HTTPS (not encrypted)",
            )),
            other => findings.push(Finding::issue(
                RULE_NAME,
                RiskLevel::Medium,
                format!("Missing or unrecognized protocol ({})", other),
            )),
        }

        if self.penalize_missing_scheme && url.scheme_implied {
            findings.push(Finding::issue(
                RULE_NAME,
                RiskLevel::Medium,
                "No protocol specified (assumed HTTPS)",
            ));
        }

        findings
    }

    fn name(&self) -> &str {
        RULE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FindingKind;
    use crate::normalization::normalize;

    #[test]
    fn test_https_is_positive() {
        let findings = ProtocolRule::new().evaluate(&normalize("https://example.com").unwrap());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Positive);
    }

    #[test]
    fn test_http_is_high() {
        let findings = ProtocolRule::new().evaluate(&normalize("http://example.com").unwrap());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_issue());
        assert_eq!(findings[0].severity, RiskLevel::High);
        assert!(!findings[0].disqualifying);
    }

    #[test]
    fn test_implied_scheme_only_flagged_when_configured() {
        let url = normalize("example.com").unwrap();
        assert!(ProtocolRule::new().evaluate(&url).iter().all(|f| !f.is_issue()));

        let strict = ProtocolRule::from_config(&ProtocolRuleConfig {
            penalize_missing_scheme: true,
            ..Default::default()
        });
        let findings = strict.evaluate(&url);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1].severity, RiskLevel::Medium);

        let explicit = normalize("https://example.com").unwrap();
        assert_eq!(strict.evaluate(&explicit).len(), 1);
    }
}
