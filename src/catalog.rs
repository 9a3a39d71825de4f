//! Static practice material: example links and example emails shown next to
//! the analyzer. Entries are read-only; every accessor returns fresh owned data.

use crate::analysis::AnalysisResult;
use crate::features::RuleEngine;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkCategory {
    Malicious,
    Legitimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailCategory {
    Phishing,
    Legitimate,
}

impl fmt::Display for LinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkCategory::Malicious => f.pad("malicious"),
            LinkCategory::Legitimate => f.pad("legitimate"),
        }
    }
}

impl fmt::Display for EmailCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailCategory::Phishing => f.pad("phishing"),
            EmailCategory::Legitimate => f.pad("legitimate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLink {
    pub id: u32,
    pub display_url: String,
    pub actual_url: String,
    pub category: LinkCategory,
    pub description: String,
    /// Red flags for malicious links, positive indicators for legitimate ones.
    pub indicators: Vec<String>,
    pub risk_label: String,
    pub legitimate_version: Option<String>,
}

impl ReferenceLink {
    pub fn analyze(&self, engine: &RuleEngine) -> AnalysisResult {
        engine.analyze(&self.actual_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEmail {
    pub id: u32,
    pub category: EmailCategory,
    pub subject: String,
    pub sender: String,
    pub content: String,
    pub positive_indicators: Vec<String>,
    pub negative_indicators: Vec<String>,
}

impl ReferenceEmail {
    /// `http(s)://` links in the body, in order of appearance.
    pub fn embedded_links(&self) -> Vec<String> {
        extract_links(&self.content)
    }
}

fn link_regex() -> Option<&'static Regex> {
    static LINK_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    LINK_REGEX
        .get_or_init(|| Regex::new(r#"(?i)https?://[^\s<>"']+"#).ok())
        .as_ref()
}

/// Pull `http(s)://` links out of free text, dropping trailing punctuation.
pub fn extract_links(text: &str) -> Vec<String> {
    let Some(regex) = link_regex() else {
        return Vec::new();
    };

    regex
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .trim_end_matches(['.', ',', ';', ':', '!', '?', ')'])
                .to_string()
        })
        .collect()
}

pub fn reference_links() -> Vec<ReferenceLink> {
    vec![
        ReferenceLink {
            id: 1,
            display_url: "www.payp4l.com/secure-login".to_string(),
            actual_url: "http://payp4l.com/secure-login".to_string(),
            category: LinkCategory::Malicious,
            description: "Fake PayPal login page".to_string(),
            indicators: strings(&[
                "Uses '4' instead of 'a' in PayPal",
                "HTTP instead of HTTPS",
                "Suspicious domain spelling",
                "Not the official PayPal domain",
            ]),
            risk_label: "High".to_string(),
            legitimate_version: Some("https://www.paypal.com".to_string()),
        },
        ReferenceLink {
            id: 2,
            display_url: "https://github.com/login".to_string(),
            actual_url: "https://github.com/login".to_string(),
            category: LinkCategory::Legitimate,
            description: "Official GitHub login page".to_string(),
            indicators: strings(&[
                "Correct spelling of 'github'",
                "Uses HTTPS encryption",
                "Official .com domain",
                "No suspicious characters",
            ]),
            risk_label: "Safe".to_string(),
            legitimate_version: None,
        },
        ReferenceLink {
            id: 3,
            display_url: "amaz0n.com/account-suspended".to_string(),
            actual_url: "http://amaz0n.com/account-suspended".to_string(),
            category: LinkCategory::Malicious,
            description: "Fake Amazon suspension notice".to_string(),
            indicators: strings(&[
                "Uses '0' instead of 'o' in Amazon",
                "HTTP instead of HTTPS",
                "Urgent/threatening URL path",
                "Not the official Amazon domain",
            ]),
            risk_label: "High".to_string(),
            legitimate_version: Some("https://www.amazon.com".to_string()),
        },
        ReferenceLink {
            id: 4,
            display_url: "https://docs.google.com/document/d/abc123".to_string(),
            actual_url: "https://docs.google.com/document/d/abc123".to_string(),
            category: LinkCategory::Legitimate,
            description: "Google Docs shared document".to_string(),
            indicators: strings(&[
                "Official Google subdomain",
                "Uses HTTPS encryption",
                "Consistent with Google URL structure",
                "docs.google.com is legitimate",
            ]),
            risk_label: "Safe".to_string(),
            legitimate_version: None,
        },
        ReferenceLink {
            id: 5,
            display_url: "microsoft-security-update.net/urgent".to_string(),
            actual_url: "http://microsoft-security-update.net/urgent".to_string(),
            category: LinkCategory::Malicious,
            description: "Fake Microsoft security alert".to_string(),
            indicators: strings(&[
                "Not an official Microsoft domain",
                "HTTP instead of HTTPS",
                "Urgent/fear-inducing path",
                "Hyphenated domain mimicking Microsoft",
            ]),
            risk_label: "High".to_string(),
            legitimate_version: Some("https://www.microsoft.com".to_string()),
        },
    ]
}

pub fn reference_emails() -> Vec<ReferenceEmail> {
    vec![
        ReferenceEmail {
            id: 1,
            category: EmailCategory::Legitimate,
            subject: "Your Bank Statement is Ready".to_string(),
            sender: "Bank of America <statements@bankofamerica.com>".to_string(),
            content: "Dear John Smith,

Your monthly statement for account ending in ***1234 is now available in your online banking portal.

To view your statement:
1. Log in to your account at bankofamerica.com
2. Navigate to Statements & Documents
3. Select your account statement

If you have any questions about your statement, please contact us at 1-800-432-1000.

Best regards,
Bank of America Customer Service Team"
                .to_string(),
            positive_indicators: strings(&[
                "Uses your actual name",
                "Sent from legitimate bank domain",
                "No urgent action required",
                "No suspicious links",
                "Professional formatting",
            ]),
            negative_indicators: Vec::new(),
        },
        ReferenceEmail {
            id: 2,
            category: EmailCategory::Phishing,
            subject: "URGENT: Your Account Will Be Suspended!".to_string(),
            sender: "security@bank0famerica.com".to_string(),
            content: "Dear Valued Customer,

We have detected suspicious activity on your account. Your account will be SUSPENDED in 24 hours unless you verify your information immediately.

CLICK HERE TO VERIFY YOUR ACCOUNT NOW: http://bankofamerica-security.com/verify

You must provide:
- Full Social Security Number
- Credit Card Number and CVV
- Online Banking Password

Failure to verify will result in permanent account closure.

Bank Security Team"
                .to_string(),
            positive_indicators: Vec::new(),
            negative_indicators: strings(&[
                "Generic greeting",
                "Urgent/threatening language",
                "Suspicious sender domain (0 instead of o)",
                "Requests sensitive information",
                "Suspicious external link",
                "Creates false urgency",
            ]),
        },
        ReferenceEmail {
            id: 3,
            category: EmailCategory::Legitimate,
            subject: "Welcome to Amazon Prime".to_string(),
            sender: "Amazon <no-reply@amazon.com>".to_string(),
            content: "Hello Jane,

Welcome to Amazon Prime! Your membership is now active.

Your Prime benefits include:
- FREE Two-Day Shipping on eligible items
- Prime Video streaming
- Exclusive deals and early access

Start shopping with Prime benefits at amazon.com

The Amazon Prime Team"
                .to_string(),
            positive_indicators: strings(&[
                "Personal greeting with name",
                "Legitimate Amazon domain",
                "No requests for personal information",
                "Professional appearance",
            ]),
            negative_indicators: Vec::new(),
        },
        ReferenceEmail {
            id: 4,
            category: EmailCategory::Phishing,
            subject: "Action Required: Verify Your PayPal Account".to_string(),
            sender: "PayPal Security <security@paypaI.com>".to_string(),
            content: "Dear PayPal User,

We've noticed some unusual activity on your PayPal account. To protect your account, we've temporarily limited access.

VERIFY YOUR ACCOUNT: http://paypal-verification.secure-site.com

This verification must be completed within 48 hours or your account will be permanently suspended.

PayPal Security Team"
                .to_string(),
            positive_indicators: Vec::new(),
            negative_indicators: strings(&[
                "Generic greeting",
                "Creates urgency with time limit",
                "Suspicious domain (capital I instead of l in PayPal)",
                "Threatening language about account suspension",
                "External verification link",
            ]),
        },
    ]
}

pub fn find_link(id: u32) -> Option<ReferenceLink> {
    reference_links().into_iter().find(|link| link.id == id)
}

pub fn find_email(id: u32) -> Option<ReferenceEmail> {
    reference_emails().into_iter().find(|email| email.id == id)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
