use super::UrlRule;
use crate::analysis::{Finding, RiskLevel};
use crate::config_loader::SubstitutionRuleConfig;
use crate::normalization::NormalizedUrl;

pub const RULE_NAME: &str = "substitution_rule";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandSubstitution {
    pub brand: String,
    pub spellings: Vec<String>,
}

/// Typosquatting detection: looks for known digit-for-letter spellings of
/// well-known brands anywhere in the hostname.
///
/// Spellings that contain capitals (capital I for l) only match the host as it
/// was typed; all other spellings match the lower-cased host.
#[derive(Debug, Clone)]
pub struct CharacterSubstitutionRule {
    // brand -> spellings, in brand order
    brands: Vec<(String, Vec<Spelling>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Spelling {
    text: String,
    case_sensitive: bool,
}

impl Spelling {
    fn new(raw: &str) -> Self {
        let case_sensitive = raw.chars().any(|c| c.is_uppercase());
        Self {
            text: if case_sensitive {
                raw.to_string()
            } else {
                raw.to_lowercase()
            },
            case_sensitive,
        }
    }

    fn found_in(&self, url: &NormalizedUrl) -> bool {
        if self.case_sensitive {
            url.host_as_typed.contains(self.text.as_str())
        } else {
            url.host.contains(self.text.as_str())
        }
    }
}

impl Default for CharacterSubstitutionRule {
    fn default() -> Self {
        Self::from_config(&SubstitutionRuleConfig::default())
    }
}

impl CharacterSubstitutionRule {
    pub fn from_config(config: &SubstitutionRuleConfig) -> Self {
        let brands = config
            .brands
            .iter()
            .map(|(brand, spellings)| {
                let mut parsed: Vec<Spelling> =
                    spellings.iter().map(|s| Spelling::new(s)).collect();
                parsed.dedup();
                (brand.to_lowercase(), parsed)
            })
            .collect();

        Self { brands }
    }

    /// Every brand the host imitates, with the spellings found.
    pub fn detect(&self, url: &NormalizedUrl) -> Vec<BrandSubstitution> {
        self.brands
            .iter()
            .filter_map(|(brand, spellings)| {
                let found: Vec<String> = spellings
                    .iter()
                    .filter(|spelling| spelling.found_in(url))
                    .map(|spelling| spelling.text.clone())
                    .collect();

                if found.is_empty() {
                    None
                } else {
                    Some(BrandSubstitution {
                        brand: brand.clone(),
                        spellings: found,
                    })
                }
            })
            .collect()
    }
}

impl UrlRule for CharacterSubstitutionRule {
    fn evaluate(&self, url: &NormalizedUrl) -> Vec<Finding> {
        self.detect(url)
            .into_iter()
            .map(|hit| {
                Finding::issue(
                    RULE_NAME,
                    RiskLevel::High,
                    format!(
                        "Contains suspicious character substitution mimicking '{}' ({})",
                        hit.brand,
                        hit.spellings.join(", ")
                    ),
                )
                .disqualifying()
            })
            .collect()
    }

    fn name(&self) -> &str {
        RULE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::normalize;
    use std::collections::BTreeMap;

    fn detect(rule: &CharacterSubstitutionRule, input: &str) -> Vec<BrandSubstitution> {
        rule.detect(&normalize(input).unwrap())
    }

    #[test]
    fn test_detects_paypal() {
        let rule = CharacterSubstitutionRule::default();
        let findings = rule.evaluate(&normalize("http://payp4l.com/secure-login").unwrap());

        assert_eq!(findings.len(), 1);
        assert!(findings[0].disqualifying);
        assert_eq!(findings[0].severity, RiskLevel::High);
        assert!(findings[0].message.contains("'paypal'"));
        assert!(findings[0].message.contains("payp4l"));
    }

    #[test]
    fn test_capital_i_spelling() {
        let rule = CharacterSubstitutionRule::default();
        let hits = detect(&rule, "https://security.paypaI.com");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].brand, "paypal");
        assert_eq!(hits[0].spellings, vec!["paypaI".to_string()]);

        assert_eq!(detect(&rule, "appIe-id.com")[0].brand, "apple");
    }

    #[test]
    fn test_lowercase_i_words_pass() {
        let rule = CharacterSubstitutionRule::default();
        for input in [
            "https://happiest.com",
            "https://paypaid.com",
            "https://HAPPIEST.com",
            "https://paypai.com",
        ] {
            assert!(detect(&rule, input).is_empty(), "input: {}", input);
        }
        assert!(crate::analyze("https://happiest.com").is_legitimate);
    }

    #[test]
    fn test_collects_every_brand() {
        let rule = CharacterSubstitutionRule::default();
        let hits = detect(&rule, "g00gle-amaz0n-deals.com");
        let brands: Vec<&str> = hits.iter().map(|h| h.brand.as_str()).collect();
        assert_eq!(brands, vec!["amazon", "google"]);
    }

    #[test]
    fn test_digit_spellings_ignore_case() {
        let rule = CharacterSubstitutionRule::default();
        let hits = detect(&rule, "https://AMAZ0N.com");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].spellings, vec!["amaz0n".to_string()]);
    }

    #[test]
    fn test_real_brands_pass() {
        let rule = CharacterSubstitutionRule::default();
        for host in ["paypal.com", "www.amazon.com", "docs.google.com", "microsoft.com"] {
            assert!(detect(&rule, host).is_empty(), "host: {}", host);
        }
    }

    #[test]
    fn test_custom_table() {
        let mut brands = BTreeMap::new();
        brands.insert("Netflix".to_string(), vec!["netf1ix".to_string()]);
        let rule = CharacterSubstitutionRule::from_config(&SubstitutionRuleConfig {
            brands,
            ..Default::default()
        });

        let hits = detect(&rule, "netf1ix-billing.com");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].brand, "netflix");
    }
}
