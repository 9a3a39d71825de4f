use crate::domain_utils::DomainUtils;
use url::{Host, ParseError, Url};

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// A user-supplied URL after trimming, scheme defaulting and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    /// Trimmed input with a scheme guaranteed, as shown back to the user.
    pub url: String,
    pub scheme: String,
    /// Lower-cased hostname. IPv6 literals keep their brackets.
    pub host: String,
    /// Hostname with the letter case it was typed in.
    pub host_as_typed: String,
    pub path: String,
    pub query: String,
    /// True when the input carried no `http://`/`https://` prefix.
    pub scheme_implied: bool,
    /// IP literal, or a domain that starts with a dotted quad.
    pub is_ip_host: bool,
}

impl NormalizedUrl {
    /// Lower-cased path and query, the part of the URL the keyword rule inspects.
    pub fn path_and_query(&self) -> String {
        let mut target = self.path.to_lowercase();
        if !self.query.is_empty() {
            target.push('?');
            target.push_str(&self.query.to_lowercase());
        }
        target
    }
}

/// Trim the input and prepend `https://` when no http(s) scheme is present.
///
/// Returns the qualified string and whether the scheme was implied.
pub fn qualify(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with(HTTP_PREFIX) || lower.starts_with(HTTPS_PREFIX) {
        (trimmed.to_string(), false)
    } else {
        (format!("{}{}", HTTPS_PREFIX, trimmed), true)
    }
}

pub fn normalize(raw: &str) -> Result<NormalizedUrl, ParseError> {
    let (url, scheme_implied) = qualify(raw);
    let parsed = Url::parse(&url)?;

    let (host, is_ip_host) = match parsed.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => {
            (domain.to_lowercase(), DomainUtils::starts_with_dotted_quad(domain))
        }
        Some(Host::Ipv4(addr)) => (addr.to_string(), true),
        Some(Host::Ipv6(addr)) => (format!("[{}]", addr), true),
        _ => return Err(ParseError::EmptyHost),
    };

    let host_as_typed = typed_host(&url)
        .filter(|typed| typed.eq_ignore_ascii_case(&host))
        .map(str::to_string)
        .unwrap_or_else(|| host.clone());

    Ok(NormalizedUrl {
        scheme: parsed.scheme().to_string(),
        host,
        host_as_typed,
        path: parsed.path().to_string(),
        query: parsed.query().unwrap_or_default().to_string(),
        scheme_implied,
        is_ip_host,
        url,
    })
}

/// Host portion of a qualified URL string before the parser lower-cases it.
fn typed_host(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#', '\\']).next()?;
    let host_port = authority.rsplit('@').next()?;
    if host_port.starts_with('[') {
        return host_port.split_inclusive(']').next();
    }
    host_port.split(':').next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_adds_https() {
        assert_eq!(
            qualify("  example.com  "),
            ("https://example.com".to_string(), true)
        );
        assert_eq!(
            qualify("http://example.com"),
            ("http://example.com".to_string(), false)
        );
        assert_eq!(
            qualify("HTTPS://Example.com"),
            ("HTTPS://Example.com".to_string(), false)
        );
    }

    #[test]
    fn test_normalize_parts() {
        let url = normalize("https://Docs.Google.com/document/d/abc?x=Verify").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.host, "docs.google.com");
        assert_eq!(url.path, "/document/d/abc");
        assert_eq!(url.query, "x=Verify");
        assert_eq!(url.path_and_query(), "/document/d/abc?x=verify");
        assert!(!url.scheme_implied);
        assert!(!url.is_ip_host);
    }

    #[test]
    fn test_normalize_ip_hosts() {
        let v4 = normalize("http://192.168.1.1/verify").unwrap();
        assert!(v4.is_ip_host);
        assert_eq!(v4.host, "192.168.1.1");

        let v6 = normalize("http://[::1]/").unwrap();
        assert!(v6.is_ip_host);
        assert_eq!(v6.host, "[::1]");
    }

    #[test]
    fn test_dotted_quad_domain_is_ip_host() {
        let url = normalize("https://10.0.0.1.nip.io/").unwrap();
        assert!(url.is_ip_host);
        assert_eq!(url.host, "10.0.0.1.nip.io");

        assert!(!normalize("https://1password.com").unwrap().is_ip_host);
    }

    #[test]
    fn test_host_keeps_typed_case() {
        let url = normalize("https://user@Secure.PaypaI.com:8443/login").unwrap();
        assert_eq!(url.host, "secure.paypai.com");
        assert_eq!(url.host_as_typed, "Secure.PaypaI.com");

        let v6 = normalize("http://[::1]:8080/").unwrap();
        assert_eq!(v6.host_as_typed, "[::1]");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize("not a url at all").is_err());
        assert!(normalize("").is_err());
        assert!(normalize("   ").is_err());
    }
}
