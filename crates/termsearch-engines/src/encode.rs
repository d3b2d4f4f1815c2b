//! Search URL construction

const PLACEHOLDER: &str = "%s";

/// Build the URL for `query` from a search `template`.
///
/// The first `%s` in the template is replaced by the encoded query; a
/// template without one gets the encoded query appended.
pub fn build_search_url(template: &str, query: &str) -> String {
    let encoded = encode_query(query);
    if template.contains(PLACEHOLDER) {
        template.replacen(PLACEHOLDER, &encoded, 1)
    } else {
        format!("{template}{encoded}")
    }
}

/// Percent-encode a query component the way `encodeURIComponent` does.
pub fn encode_query(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => result.push(byte as char),
            _ => result.push_str(&format!("%{:02X}", byte)),
        }
    }
    result
}
