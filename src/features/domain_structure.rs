use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::{DomainAllowlistRuleConfig, StructureRuleConfig};
use crate::domain_utils::DomainUtils;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "structure_rule";

/// Hyphen-heavy, deeply nested and brand-hyphenated hostnames. Each check
/// reports separately.
#[derive(Debug, Clone)]
pub struct DomainStructureRule {
    max_hyphens: usize,
    max_labels: usize,
    known_domains: Vec<String>,
    // first label of each known domain, e.g. `microsoft`
    brand_stems: Vec<String>,
}

impl Default for DomainStructureRule {
    fn default() -> Self {
        Self::from_config(
            &StructureRuleConfig::default(),
            &DomainAllowlistRuleConfig::default(),
        )
    }
}

impl DomainStructureRule {
    pub fn from_config(
        config: &StructureRuleConfig,
        allowlist: &DomainAllowlistRuleConfig,
    ) -> Self {
        let mut brand_stems: Vec<String> = allowlist
            .domains
            .iter()
            .filter_map(|domain| domain.split('.').next())
            .filter(|stem| !stem.is_empty())
            .map(|stem| stem.to_lowercase())
            .collect();
        brand_stems.dedup();

        Self {
            max_hyphens: config.max_hyphens,
            max_labels: config.max_labels,
            known_domains: allowlist.domains.clone(),
            brand_stems,
        }
    }

    /// Brand stem of a known domain inside a hyphenated host that is not
    /// itself a known domain.
    fn hyphenated_brand(&self, host: &str) -> Option<&str> {
        if !host.contains('-') || DomainUtils::matches_domain_list(host, &self.known_domains) {
            return None;
        }
        self.brand_stems
            .iter()
            .find(|stem| host.contains(stem.as_str()))
            .map(|stem| stem.as_str())
    }
}

impl UrlRule for DomainStructureRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        let mut findings = Vec::new();

        let hyphens = DomainUtils::hyphen_count(&url.host);
        if hyphens > self.max_hyphens {
            findings.push(Finding::issue(
                RULE_NAME,
                RiskLevel::Medium,
                format!("Domain contains an unusual number of hyphens ({})", hyphens),
            ));
        }

        if let Some(brand) = self.hyphenated_brand(&url.host) {
            findings.push(Finding::issue(
                RULE_NAME,
                RiskLevel::Medium,
                format!(
                    "Uses hyphens in domain that may mimic legitimate sites ({})",
                    brand
                ),
            ));
        }

        let labels = DomainUtils::label_count(&url.host);
        if labels > self.max_labels {
            findings.push(Finding::issue(
                RULE_NAME,
                RiskLevel::Medium,
                format!(
                    "Has multiple subdomains which may be suspicious ({} levels)",
                    labels
                ),
            ));
        }

        findings
    }

    fn name(&self) -> &str {
        RULE_NAME
    }
}
