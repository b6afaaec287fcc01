//! Query string helpers for framed mounts

use std::collections::HashMap;

use web_sys::window;

/// Parse `?a=1&b&c=x%20y`. A key without `=` maps to an empty string; the last
/// occurrence of a repeated key wins.
pub fn parse_query(search: &str) -> HashMap<String, String> {
    let query_string = search.strip_prefix('?').unwrap_or(search);
    let mut params = HashMap::new();

    for pair in query_string.split('&').filter(|p| !p.is_empty()) {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        let decoded_value = urlencoding::decode(value)
            .unwrap_or_else(|_| value.into())
            .into_owned();
        params.insert(key.to_string(), decoded_value);
    }

    params
}

/// Query parameters of the current page.
pub fn get_query_params() -> HashMap<String, String> {
    window()
        .and_then(|w| w.location().search().ok())
        .map(|search| parse_query(&search))
        .unwrap_or_default()
}

/// Full URL of the current page, reported alongside resize messages.
pub fn current_href() -> String {
    window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let params = parse_query("?theme=dark&hideConnectionUI&tokenList=https%3A%2F%2Ftokens.example%2Flist.json");
        assert_eq!(params["theme"], "dark");
        assert_eq!(params["hideConnectionUI"], "");
        assert_eq!(params["tokenList"], "https://tokens.example/list.json");
    }

    #[test]
    fn test_empty_query() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
    }
}
