//! Freeform extra-parameter extraction
//!
//! The extra-parameters string arrives as a single shell-quoted value. It
//! is split here with an explicit quote-aware tokenizer — never through a
//! shell evaluator — so a parameter like `/a:"value with spaces"` stays one
//! argument. The module also extracts the load-balancer hostname embedded
//! in the `/load-balance-info:` sub-parameter.

/// Marker introducing the terminal-services load-balancer descriptor
const LOAD_BALANCE_MARKER: &str = "/load-balance-info:";

/// Substring preceding the hostname inside the load-balancer descriptor
const PLUGIN_HOST_MARKER: &str = "Plugin.1.";

/// Splits a freeform parameter string into discrete client arguments.
///
/// Supports single and double quotes; quoted substrings may contain
/// whitespace and join the surrounding characters into one token. Token
/// order is preserved and no token is dropped — an unterminated quote
/// keeps whatever was accumulated. An empty or whitespace-only input
/// yields an empty sequence.
#[must_use]
pub fn parse_extra_params(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in raw.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

/// Extracts the load-balancer hostname from the extra-parameters string.
///
/// Looks for the `/load-balance-info:` token, then for the literal
/// `Plugin.1.` inside its descriptor; the trailing component is the
/// hostname. Returns `None` when either marker is absent — absence is
/// not an error.
#[must_use]
pub fn extract_load_balancer_host(raw: &str) -> Option<String> {
    let descriptor = parse_extra_params(raw)
        .into_iter()
        .find_map(|token| token.strip_prefix(LOAD_BALANCE_MARKER).map(str::to_string))?;
    let start = descriptor.find(PLUGIN_HOST_MARKER)? + PLUGIN_HOST_MARKER.len();
    let host = descriptor[start..].trim();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert!(parse_extra_params("").is_empty());
        assert!(parse_extra_params("   ").is_empty());
    }

    #[test]
    fn test_parse_plain_tokens() {
        assert_eq!(
            parse_extra_params("/f +clipboard /cert:ignore"),
            vec!["/f", "+clipboard", "/cert:ignore"]
        );
    }

    #[test]
    fn test_parse_quoted_spaces_stay_one_token() {
        assert_eq!(
            parse_extra_params("/a:\"x y\" /b:z"),
            vec!["/a:x y", "/b:z"]
        );
    }

    #[test]
    fn test_parse_single_quotes() {
        assert_eq!(
            parse_extra_params("/title:'my session' /f"),
            vec!["/title:my session", "/f"]
        );
    }

    #[test]
    fn test_parse_preserves_order() {
        assert_eq!(
            parse_extra_params("/c /a /b"),
            vec!["/c", "/a", "/b"]
        );
    }

    #[test]
    fn test_parse_empty_quotes_yield_empty_token() {
        assert_eq!(parse_extra_params("\"\""), vec![""]);
    }

    #[test]
    fn test_parse_unterminated_quote_keeps_remainder() {
        assert_eq!(parse_extra_params("/a:\"x y"), vec!["/a:x y"]);
    }

    #[test]
    fn test_extract_load_balancer_host() {
        let raw = "/load-balance-info:\"tsv://MS Terminal Services Plugin.1.lb01.example.com\"";
        assert_eq!(
            extract_load_balancer_host(raw),
            Some("lb01.example.com".to_string())
        );
    }

    #[test]
    fn test_extract_load_balancer_host_among_other_params() {
        let raw = "/f /load-balance-info:\"tsv://MS Terminal Services Plugin.1.lb02.internal\" /cert:ignore";
        assert_eq!(
            extract_load_balancer_host(raw),
            Some("lb02.internal".to_string())
        );
    }

    #[test]
    fn test_extract_no_marker_is_none() {
        assert_eq!(extract_load_balancer_host("/f +clipboard"), None);
        assert_eq!(extract_load_balancer_host(""), None);
    }

    #[test]
    fn test_extract_no_plugin_segment_is_none() {
        assert_eq!(
            extract_load_balancer_host("/load-balance-info:\"tsv://something else\""),
            None
        );
    }

    #[test]
    fn test_extract_empty_hostname_is_none() {
        assert_eq!(
            extract_load_balancer_host("/load-balance-info:\"tsv://MS Terminal Services Plugin.1.\""),
            None
        );
    }
}
