/// Minimal hostname utilities shared by the rules
pub struct DomainUtils;

impl DomainUtils {
    /// Check if host matches any in list (with hierarchy support)
    pub fn matches_domain_list(host: &str, domain_list: &[String]) -> bool {
        Self::matching_domain(host, domain_list).is_some()
    }

    /// First list entry the host equals or is a subdomain of
    pub fn matching_domain<'a>(host: &str, domain_list: &'a [String]) -> Option<&'a str> {
        let host_lower = host.to_lowercase();

        domain_list
            .iter()
            .find(|pattern| {
                let pattern_lower = pattern.to_lowercase();
                host_lower == pattern_lower || host_lower.ends_with(&format!(".{}", pattern_lower))
            })
            .map(|s| s.as_str())
    }

    /// Last dot-separated label, lower-cased
    pub fn extract_tld(host: &str) -> Option<String> {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() >= 2 {
            parts.last().map(|tld| tld.to_lowercase())
        } else {
            None
        }
    }

    pub fn label_count(host: &str) -> usize {
        host.split('.').filter(|label| !label.is_empty()).count()
    }

    pub fn hyphen_count(host: &str) -> usize {
        host.matches('-').count()
    }

    /// True when the first four labels are all digits, e.g. `10.0.0.1.nip.io`
    pub fn starts_with_dotted_quad(host: &str) -> bool {
        let labels: Vec<&str> = host.split('.').take(4).collect();
        labels.len() == 4
            && labels
                .iter()
                .all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()))
    }
}
