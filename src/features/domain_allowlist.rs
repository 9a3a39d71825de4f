use super::UrlRule;
use crate::analysis::Finding;
use crate::config_loader::DomainAllowlistRuleConfig;
use crate::domain_utils::DomainUtils;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "domain_allowlist_rule";

/// Positive signal for well-known domains and their subdomains. It never
/// clears issues raised by other rules.
#[derive(Debug, Clone)]
pub struct DomainAllowlistRule {
    domains: Vec<String>,
}

impl Default for DomainAllowlistRule {
    fn default() -> Self {
        Self::from_config(&DomainAllowlistRuleConfig::default())
    }
}

impl DomainAllowlistRule {
    pub fn from_config(config: &DomainAllowlistRuleConfig) -> Self {
        Self {
            domains: config.domains.clone(),
        }
    }
}

impl UrlRule for DomainAllowlistRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        match DomainUtils::matching_domain(&url.host, &self.domains) {
            Some(domain) => vec![Finding::positive(
                RULE_NAME,
                format!("Matches known legitimate domain ({})", domain),
            )],
            None => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        RULE_NAME
    }
}
