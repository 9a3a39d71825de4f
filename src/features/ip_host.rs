use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "ip_rule";

#[derive(Debug, Clone, Default)]
pub struct IpHostRule;

impl IpHostRule {
    pub fn new() -> Self {
        Self
    }
}

impl UrlRule for IpHostRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        if !url.is_ip_host {
            return Vec::new();
        }

        vec![Finding::issue(
            RULE_NAME,
            RiskLevel::High,
            format!("Uses IP address instead of domain name ({})", url.host),
        )
        .disqualifying()]
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
    fn test_ip_host_disqualifies() {
        let findings = IpHostRule::new().evaluate(&normalize("http://192.168.1.1/verify").unwrap());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, RiskLevel::High);
        assert!(findings[0].disqualifying);
        assert!(findings[0].message.contains("192.168.1.1"));
    }

    #[test]
    fn test_dotted_quad_prefix_disqualifies() {
        let rule = IpHostRule::new();
        for input in ["https://10.0.0.1.nip.io/", "http://192.168.1.1.evil.com/"] {
            let findings = rule.evaluate(&normalize(input).unwrap());
            assert_eq!(findings.len(), 1, "input: {}", input);
            assert!(findings[0].disqualifying);
        }

        let result = crate::analyze("https://10.0.0.1.nip.io/");
        assert_eq!(result.risk, RiskLevel::High);
        assert!(!result.is_legitimate);
    }

    #[test]
    fn test_domain_host_passes() {
        let rule = IpHostRule::new();
        assert!(rule.evaluate(&normalize("https://1password.com").unwrap()).is_empty());
        assert!(rule.evaluate(&normalize("https://example.com").unwrap()).is_empty());
    }
}
