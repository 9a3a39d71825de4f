use serde::{Deserialize, Serialize};
use std::fmt;

pub const INVALID_URL_ISSUE: &str = "Invalid URL format";
pub const INVALID_URL_VERDICT: &str = "Unable to analyze this URL - the format is invalid";

pub const SAFE_VERDICT: &str = "This link appears to be safe to visit";
pub const CAUTION_VERDICT: &str = "Exercise caution - this link has some concerning features";
pub const MALICIOUS_VERDICT: &str = "This link appears to be malicious - do not visit";

pub const NO_RED_FLAGS: &str = "No obvious red flags detected";
pub const NORMAL_STRUCTURE: &str = "URL structure appears normal";

/// More issues than this makes a link non-legitimate even at Low risk.
const MAX_ISSUES_FOR_LEGITIMATE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingKind {
    Issue,
    Positive,
}

/// A single rule output attached to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub rule: String,
    pub severity: RiskLevel,
    pub disqualifying: bool,
    pub message: String,
}

impl Finding {
    pub fn issue(rule: &str, severity: RiskLevel, message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Issue,
            rule: rule.to_string(),
            severity,
            disqualifying: false,
            message: message.into(),
        }
    }

    pub fn positive(rule: &str, message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Positive,
            rule: rule.to_string(),
            severity: RiskLevel::Low,
            disqualifying: false,
            message: message.into(),
        }
    }

    pub fn disqualifying(mut self) -> Self {
        self.disqualifying = true;
        self
    }

    pub fn is_issue(&self) -> bool {
        self.kind == FindingKind::Issue
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub url: String,
    pub is_legitimate: bool,
    pub risk: RiskLevel,
    pub issues: Vec<String>,
    pub positives: Vec<String>,
    pub verdict: String,
}

impl AnalysisResult {
    /// Fixed result for input that cannot be parsed as a URL.
    pub fn invalid(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_legitimate: false,
            risk: RiskLevel::High,
            issues: vec![INVALID_URL_ISSUE.to_string()],
            positives: Vec::new(),
            verdict: INVALID_URL_VERDICT.to_string(),
        }
    }
}

pub fn verdict_for(risk: RiskLevel, is_legitimate: bool) -> &'static str {
    match risk {
        RiskLevel::Low if is_legitimate => SAFE_VERDICT,
        RiskLevel::Medium => CAUTION_VERDICT,
        _ => MALICIOUS_VERDICT,
    }
}

/// Folds rule findings into the final result.
///
/// Risk only ever moves up: each issue raises it to at least its own severity.
/// Positives never touch it.
#[derive(Debug, Default)]
pub struct FindingAccumulator {
    risk: Option<RiskLevel>,
    issues: Vec<String>,
    positives: Vec<String>,
    disqualified: bool,
}

impl FindingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, finding: Finding) {
        match finding.kind {
            FindingKind::Issue => {
                self.risk = Some(self.risk().max(finding.severity));
                self.disqualified |= finding.disqualifying;
                self.issues.push(finding.message);
            }
            FindingKind::Positive => self.positives.push(finding.message),
        }
    }

    pub fn risk(&self) -> RiskLevel {
        self.risk.unwrap_or(RiskLevel::Low)
    }

    pub fn is_disqualified(&self) -> bool {
        self.disqualified
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn finish(mut self, url: impl Into<String>) -> AnalysisResult {
        if self.issues.is_empty() {
            self.positives.push(NO_RED_FLAGS.to_string());
            self.positives.push(NORMAL_STRUCTURE.to_string());
        }

        let risk = self.risk();
        let is_legitimate = !self.disqualified
            && self.issues.len() <= MAX_ISSUES_FOR_LEGITIMATE
            && risk == RiskLevel::Low;

        AnalysisResult {
            url: url.into(),
            is_legitimate,
            risk,
            issues: self.issues,
            positives: self.positives,
            verdict: verdict_for(risk, is_legitimate).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(RiskLevel::Medium.max(RiskLevel::Low), RiskLevel::Medium);
    }

    #[test]
    fn test_empty_accumulator_is_clean() {
        let result = FindingAccumulator::new().finish("https://example.com");

        assert_eq!(result.risk, RiskLevel::Low);
        assert!(result.is_legitimate);
        assert!(result.issues.is_empty());
        assert_eq!(
            result.positives,
            vec![NO_RED_FLAGS.to_string(), NORMAL_STRUCTURE.to_string()]
        );
        assert_eq!(result.verdict, SAFE_VERDICT);
    }

    #[test]
    fn test_risk_never_lowered() {
        let mut acc = FindingAccumulator::new();
        acc.absorb(Finding::issue("a", RiskLevel::High, "high"));
        acc.absorb(Finding::issue("b", RiskLevel::Medium, "medium"));
        acc.absorb(Finding::positive("c", "fine"));

        assert_eq!(acc.risk(), RiskLevel::High);
        let result = acc.finish("u");
        assert_eq!(result.issues, vec!["high".to_string(), "medium".to_string()]);
        assert_eq!(result.positives, vec!["fine".to_string()]);
        assert_eq!(result.verdict, MALICIOUS_VERDICT);
    }

    #[test]
    fn test_disqualifier_blocks_legitimacy_at_low_risk() {
        let mut acc = FindingAccumulator::new();
        acc.absorb(Finding::issue("ip_rule", RiskLevel::Low, "ip").disqualifying());

        assert!(acc.is_disqualified());
        let result = acc.finish("u");
        assert_eq!(result.risk, RiskLevel::Low);
        assert!(!result.is_legitimate);
        assert_eq!(result.verdict, MALICIOUS_VERDICT);
    }

    #[test]
    fn test_too_many_issues_blocks_legitimacy() {
        let mut acc = FindingAccumulator::new();
        for i in 0..3 {
            acc.absorb(Finding::issue("r", RiskLevel::Low, format!("issue {}", i)));
        }
        assert_eq!(acc.issue_count(), 3);
        assert!(!acc.finish("u").is_legitimate);
    }

    #[test]
    fn test_medium_verdict() {
        let mut acc = FindingAccumulator::new();
        acc.absorb(Finding::issue("tld_rule", RiskLevel::Medium, "tld"));
        let result = acc.finish("u");

        assert!(!result.is_legitimate);
        assert_eq!(result.verdict, CAUTION_VERDICT);
    }

    #[test]
    fn test_invalid_result_shape() {
        let result = AnalysisResult::invalid("https://not a url");
        assert_eq!(result.risk, RiskLevel::High);
        assert!(!result.is_legitimate);
        assert_eq!(result.issues, vec![INVALID_URL_ISSUE.to_string()]);
        assert!(result.positives.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(AnalysisResult::invalid("x")).unwrap();
        assert_eq!(json["isLegitimate"], serde_json::Value::Bool(false));
        assert_eq!(json["risk"], serde_json::Value::String("High".to_string()));
    }
}
