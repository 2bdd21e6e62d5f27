/// Domain extraction for deciding which sites the redirect applies to
use url::Url;

/// Extract the registrable domain from a URL with smart TLD handling
///
/// Algorithm:
/// 1. Parse URL to extract hostname
/// 2. Split hostname by "."
/// 3. If the last label is 2 letters AND second-to-last is "co" or "com":
///    → Return last 3 labels (e.g., "booking.co.uk", "example.com.au")
/// 4. Else:
///    → Return last 2 labels (e.g., "booking.com", "expedia.com")
/// 5. localhost and IP addresses are returned as-is
///
/// Examples:
/// - https://www.booking.com/searchresults.html → booking.com
/// - https://secure.booking.co.uk/book → booking.co.uk
pub fn extract_domain(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let hostname = extract_hostname(url)?;

    if hostname == "localhost" || is_ip_address(&hostname) {
        return Some(hostname);
    }

    let parts: Vec<&str> = hostname.split('.').collect();
    if parts.len() < 2 {
        return Some(hostname);
    }

    let tld = parts[parts.len() - 1];
    let num_parts = if parts.len() >= 3
        && tld.len() == 2
        && matches!(parts[parts.len() - 2], "co" | "com")
    {
        3
    } else {
        2
    };

    Some(parts[parts.len() - num_parts..].join("."))
}

/// True when the URL's registrable domain is `domain` (case-insensitive)
pub fn belongs_to(url: &str, domain: &str) -> bool {
    extract_domain(url).is_some_and(|found| found.eq_ignore_ascii_case(domain))
}

/// Hostname of a URL, lower-cased.
///
/// Falls back to manual stripping for scheme-less input like `booking.com/x`.
fn extract_hostname(url: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(url.trim()) {
        return parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .map(|host| host.trim_matches(|c| c == '[' || c == ']').to_lowercase());
    }

    let without_scheme = url
        .trim()
        .split_once("://")
        .map_or(url.trim(), |(_, rest)| rest);

    let hostname = without_scheme
        .split(['/', '?', '#'])
        .next()?
        .rsplit('@')
        .next()?
        .split(':')
        .next()?
        .to_lowercase();

    if hostname.is_empty() {
        None
    } else {
        Some(hostname)
    }
}

/// Check if a string looks like an IPv4 address
fn is_ip_address(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain_basic() {
        assert_eq!(extract_domain("https://www.booking.com"), Some("booking.com".to_string()));
        assert_eq!(extract_domain("https://booking.com"), Some("booking.com".to_string()));
        assert_eq!(extract_domain("http://BOOKING.com/"), Some("booking.com".to_string()));
    }

    #[test]
    fn test_extract_domain_with_path_and_query() {
        assert_eq!(
            extract_domain("https://www.booking.com/searchresults.hu.html?ss=Budapest&lang=hu"),
            Some("booking.com".to_string())
        );
    }

    #[test]
    fn test_extract_domain_country_tlds() {
        assert_eq!(extract_domain("https://secure.booking.co.uk/book"), Some("booking.co.uk".to_string()));
        assert_eq!(extract_domain("https://shop.example.com.au"), Some("example.com.au".to_string()));
    }

    #[test]
    fn test_extract_domain_special_cases() {
        assert_eq!(extract_domain("https://localhost:3000"), Some("localhost".to_string()));
        assert_eq!(extract_domain("http://127.0.0.1:8080/x"), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_extract_domain_without_scheme() {
        assert_eq!(extract_domain("www.booking.com/hotel"), Some("booking.com".to_string()));
        assert_eq!(extract_domain("not-a-url"), Some("not-a-url".to_string()));
    }

    #[test]
    fn test_extract_domain_edge_cases() {
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("https://"), None);
        assert_eq!(extract_domain("chrome://newtab/"), Some("newtab".to_string()));
    }

    #[test]
    fn test_belongs_to() {
        assert!(belongs_to("https://www.booking.com/searchresults.html?ss=x", "booking.com"));
        assert!(belongs_to("https://m.Booking.com/", "BOOKING.COM"));
        assert!(!belongs_to("https://www.google.com/search?q=booking.com", "booking.com"));
        assert!(!belongs_to("https://notbooking.com/", "booking.com"));
        assert!(!belongs_to("", "booking.com"));
    }
}
