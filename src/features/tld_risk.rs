use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::TldRuleConfig;
use crate::domain_utils::DomainUtils;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "tld_rule";

#[derive(Debug, Clone)]
pub struct SuspiciousTldRule {
    tlds: Vec<String>,
}

impl Default for SuspiciousTldRule {
    fn default() -> Self {
        Self::from_config(&TldRuleConfig::default())
    }
}

impl SuspiciousTldRule {
    pub fn from_config(config: &TldRuleConfig) -> Self {
        // Accept both "tk" and ".tk" in configuration
        let tlds = config
            .tlds
            .iter()
            .map(|t| t.trim_start_matches('.').to_lowercase())
            .collect();

        Self { tlds }
    }

    pub fn is_suspicious(&self, host: &str) -> bool {
        DomainUtils::extract_tld(host)
            .map(|tld| self.tlds.contains(&tld))
            .unwrap_or(false)
    }
}

impl UrlRule for SuspiciousTldRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        if url.is_ip_host || !self.is_suspicious(&url.host) {
            return Vec::new();
        }

        let tld = DomainUtils::extract_tld(&url.host).unwrap_or_default();
        vec![Finding::issue(
            RULE_NAME,
            RiskLevel::Medium,
            format!("Suspicious top-level domain (.{}) commonly abused for phishing", tld),
        )]
    }

    fn name(&self) -> &str {
        RULE_NAME
    }
}
