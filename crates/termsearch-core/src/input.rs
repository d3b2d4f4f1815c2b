//! URL normalization for `open` and `tabs open`

use std::net::Ipv6Addr;
use url::{Host, Url};

/// Schemes whose URLs are opened exactly as typed.
const VERBATIM_SCHEMES: [&str; 5] = ["http", "https", "file", "about", "data"];

/// Turn an `open` argument into a URL a tab can load.
///
/// A URL with one of [`VERBATIM_SCHEMES`] is kept as typed. A bare host
/// (domain, `localhost` or IP address, with optional port and path) gets
/// `https://` in front. Anything else is rejected.
pub fn normalize_url(input: &str) -> Option<String> {
    let target = input.trim();
    if target.is_empty() || target.contains(char::is_whitespace) {
        return None;
    }

    if let Ok(url) = Url::parse(target) {
        // `http:example.com` parses, but only `http://` counts as typed out.
        let web = matches!(url.scheme(), "http" | "https");
        if VERBATIM_SCHEMES.contains(&url.scheme()) && (!web || target.contains("://")) {
            return Some(target.to_string());
        }
    }
    if target.contains("://") {
        return None;
    }

    if let Ok(ip) = target.parse::<Ipv6Addr>() {
        return Some(format!("https://[{ip}]"));
    }

    let candidate = format!("https://{target}");
    let url = Url::parse(&candidate).ok()?;
    // `mailto:me@x.test` would otherwise read as credentials for `x.test`.
    if !url.username().is_empty() || url.password().is_some() {
        return None;
    }
    let accepted = match url.host()? {
        Host::Ipv4(_) | Host::Ipv6(_) => true,
        Host::Domain(domain) => is_known_domain_shape(domain),
    };
    accepted.then_some(candidate)
}

/// `localhost`, or a dotted name ending in an alphabetic TLD of 2 to 24 letters.
fn is_known_domain_shape(domain: &str) -> bool {
    if domain == "localhost" {
        return true;
    }
    domain.rsplit_once('.').is_some_and(|(name, tld)| {
        !name.is_empty()
            && (2..=24).contains(&tld.len())
            && tld.chars().all(|c| c.is_ascii_alphabetic())
    })
}
