pub mod character_substitution;
pub mod domain_allowlist;
pub mod domain_length;
pub mod domain_structure;
pub mod ip_host;
pub mod phishing_patterns;
pub mod protocol;
pub mod suspicious_prefix;
pub mod tld_risk;
pub mod url_shortener;
pub mod urgency_keywords;

use crate::analysis::{AnalysisResult, Finding, FindingAccumulator};
use crate::config_loader::{RuleSetConfig, RuleSettings};
use crate::normalization::{self, NormalizedUrl};
use anyhow::Result;

/// One independent detection pass over a normalized URL.
pub trait UrlRule: Send + Sync {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding>;
    /// Configuration key of the rule, e.g. `tld_rule`.
    fn name(&self) -> &str;
}

struct ConfiguredRule {
    rule: Box<dyn UrlRule>,
    settings: RuleSettings,
}

impl ConfiguredRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        let mut findings = self.rule.evaluate(url);
        for finding in findings.iter_mut().filter(|f| f.is_issue()) {
            if let Some(severity) = self.settings.severity {
                finding.severity = severity;
            }
            if let Some(disqualifying) = self.settings.disqualifying {
                finding.disqualifying = disqualifying;
            }
        }
        findings
    }
}

/// Ordered rule pipeline. Every enabled rule runs on every URL; there is no
/// short-circuit.
pub struct RuleEngine {
    rules: Vec<ConfiguredRule>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Engine with the built-in rule tables.
    pub fn new() -> Self {
        Self::from_config(&RuleSetConfig::default())
            .expect("Built-in rule patterns must compile")
    }

    pub fn from_config(config: &RuleSetConfig) -> Result<Self> {
        let mut rules = Vec::new();

        push_rule(
            &mut rules,
            Box::new(protocol::ProtocolRule::from_config(&config.protocol_rule)),
            &config.protocol_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(ip_host::IpHostRule::new()),
            &config.ip_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(suspicious_prefix::SuspiciousPrefixRule::from_config(
                &config.prefix_rule,
            )),
            &config.prefix_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(character_substitution::CharacterSubstitutionRule::from_config(
                &config.substitution_rule,
            )),
            &config.substitution_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(domain_allowlist::DomainAllowlistRule::from_config(
                &config.domain_allowlist_rule,
            )),
            &config.domain_allowlist_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(tld_risk::SuspiciousTldRule::from_config(&config.tld_rule)),
            &config.tld_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(url_shortener::UrlShortenerRule::from_config(
                &config.shortener_rule,
            )),
            &config.shortener_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(domain_structure::DomainStructureRule::from_config(
                &config.structure_rule,
                &config.domain_allowlist_rule,
            )),
            &config.structure_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(urgency_keywords::UrgencyKeywordRule::from_config(
                &config.keyword_rule,
            )),
            &config.keyword_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(domain_length::DomainLengthRule::from_config(
                &config.length_rule,
            )),
            &config.length_rule.settings,
        );
        push_rule(
            &mut rules,
            Box::new(phishing_patterns::PhishingPatternRule::from_config(
                &config.pattern_rule,
            )?),
            &config.pattern_rule.settings,
        );

        Ok(Self { rules })
    }

    /// Names of the enabled rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.rule.name()).collect()
    }

    /// All findings for an already normalized URL, in rule order.
    pub fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        self.rules.iter().flat_map(|r| r.evaluate(url)).collect()
    }

    pub fn analyze(&self, raw_input: &str) -> AnalysisResult {
        let url = match normalization::normalize(raw_input) {
            Ok(url) => url,
            Err(e) => {
                let (qualified, _) = normalization::qualify(raw_input);
                log::debug!("Cannot parse {:?}: {}", qualified, e);
                return AnalysisResult::invalid(qualified);
            }
        };

        let mut accumulator = FindingAccumulator::new();
        for finding in self.evaluate(&url) {
            if finding.is_issue() {
                log::debug!(
                    "{}: {} ({}{})",
                    finding.rule,
                    finding.message,
                    finding.severity,
                    if finding.disqualifying {
                        ", disqualifying"
                    } else {
                        ""
                    }
                );
            }
            accumulator.absorb(finding);
        }

        log::debug!(
            "Analyzed {}: risk={} issues={} disqualified={}",
            url.url,
            accumulator.risk(),
            accumulator.issue_count(),
            accumulator.is_disqualified()
        );
        accumulator.finish(url.url)
    }
}

fn push_rule(rules: &mut Vec<ConfiguredRule>, rule: Box<dyn UrlRule>, settings: &RuleSettings) {
    if !settings.enabled {
        log::debug!("Rule {} disabled by configuration", rule.name());
        return;
    }
    rules.push(ConfiguredRule {
        rule,
        settings: settings.clone(),
    });
}

/// Analyze with the built-in rule set.
pub fn analyze(raw_input: &str) -> AnalysisResult {
    RuleEngine::new().analyze(raw_input)
}
