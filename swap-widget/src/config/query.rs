//! Options from URL query parameters, used when the widget runs as a framed page:
//! `https://swap.example/?theme=dark&width=400&defaultChainId=blast-sepolia`.

use std::collections::HashMap;

use shared::{tokens::parse_token_list, SupportedChainId};

use super::{Flags, RpcUrls, TokenListSource, WidgetOptions};
use crate::composition::dialog::DialogAnimation;
use crate::composition::sizing::WidgetWidth;
use crate::composition::theme::{ThemeInput, ThemeName, ThemeOverrides};
use crate::error::{Result, WidgetError};

impl WidgetOptions {
    /// Never fails: unknown keys are ignored, and a value that does not parse is logged and
    /// left at its default so the widget still mounts.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let mut options = WidgetOptions {
            locale: get("locale").map(str::to_string),
            class_name: get("className").map(str::to_string),
            width: get("width").map(WidgetWidth::parse),
            theme: get("theme").and_then(|theme| lenient("theme", parse_theme(theme))),
            token_list: get("tokenList").and_then(|list| lenient("tokenList", parse_token_list_param(list))),
            ..Default::default()
        };

        if let Some(animation) = get("dialogAnimation") {
            match DialogAnimation::parse(animation) {
                Some(animation) => options.dialog_options.animation_type = animation,
                None => log::warn!("Ignoring dialogAnimation={}, expected fade, slide or none", animation),
            }
        }
        if let Some(centered) = bool_param(params, "pageCentered") {
            options.dialog_options.page_centered = centered;
        }

        let mut flags = Flags::default();
        if let Some(value) = bool_param(params, "brandedFooter") {
            flags.branded_footer = value;
        }
        if let Some(value) = bool_param(params, "hideConnectionUI") {
            flags.hide_connection_ui = value;
        }
        if let Some(value) = bool_param(params, "permit2") {
            flags.permit2 = value;
        }
        flags.default_chain_id = get("defaultChainId").and_then(|chain| match SupportedChainId::parse(chain) {
            Some(chain) => Some(chain.id()),
            None => {
                log::warn!("Ignoring defaultChainId={}, not a supported chain", chain);
                None
            }
        });
        flags.convenience_fee = get("convenienceFee").and_then(|fee| match fee.parse() {
            Ok(fee) => Some(fee),
            Err(_) => {
                log::warn!("Ignoring convenienceFee={}, expected basis points", fee);
                None
            }
        });
        flags.router_url = get("routerUrl").map(str::to_string);
        flags.default_input_token_address = get("defaultInputTokenAddress").map(str::to_string);
        flags.default_input_amount = get("defaultInputAmount").map(str::to_string);
        flags.default_output_token_address = get("defaultOutputTokenAddress").map(str::to_string);
        flags.default_output_amount = get("defaultOutputAmount").map(str::to_string);
        flags.convenience_fee_recipient = get("convenienceFeeRecipient").map(str::to_string);

        if let Some(url) = get("jsonRpcUrl") {
            let chain_id = flags
                .default_chain_id
                .unwrap_or_else(|| SupportedChainId::BlastSepolia.id());
            options
                .json_rpc_url_map
                .insert(chain_id.to_string(), RpcUrls::One(url.to_string()));
        }

        options.flags = flags;
        options
    }
}

fn lenient<T>(key: &str, parsed: Result<T>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring {}: {}", key, err);
            None
        }
    }
}

/// A bare key (`?hideConnectionUI`) counts as `true`.
fn bool_param(params: &HashMap<String, String>, key: &str) -> Option<bool> {
    let value = params.get(key)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        other => {
            log::warn!("Ignoring {}={}, expected a boolean", key, other);
            None
        }
    }
}

fn parse_theme(value: &str) -> Result<ThemeInput> {
    match value.to_ascii_lowercase().as_str() {
        "light" => Ok(ThemeInput::Named(ThemeName::Light)),
        "dark" => Ok(ThemeInput::Named(ThemeName::Dark)),
        _ if value.starts_with('{') => {
            let overrides: ThemeOverrides = serde_json::from_str(value)?;
            Ok(ThemeInput::Custom(overrides))
        }
        _ => Err(WidgetError::Config(format!("expected light, dark or a JSON object, got {}", value))),
    }
}

/// A JSON array/document is an inline list, anything else a URL.
fn parse_token_list_param(value: &str) -> Result<TokenListSource> {
    if value.starts_with('[') || value.starts_with('{') {
        Ok(TokenListSource::Inline(parse_token_list(value)?))
    } else {
        Ok(TokenListSource::Url(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_full_query() {
        let options = WidgetOptions::from_query(&params(&[
            ("theme", "dark"),
            ("locale", "de-DE"),
            ("width", "100%"),
            ("defaultChainId", "blast-sepolia"),
            ("hideConnectionUI", ""),
            ("brandedFooter", "false"),
            ("defaultInputAmount", "1"),
            ("dialogAnimation", "none"),
            ("jsonRpcUrl", "https://sepolia.blast.io"),
        ]));

        assert_eq!(options.theme, Some(ThemeInput::Named(ThemeName::Dark)));
        assert_eq!(options.width, Some(WidgetWidth::Css("100%".to_string())));
        assert_eq!(options.flags.default_chain_id, Some(168587773));
        assert!(options.flags.hide_connection_ui);
        assert!(!options.flags.branded_footer);
        assert_eq!(options.flags.default_input_amount.as_deref(), Some("1"));
        assert_eq!(options.dialog_options.animation_type, DialogAnimation::None);
        assert_eq!(options.rpc_urls()[&168587773], vec!["https://sepolia.blast.io".to_string()]);
    }

    #[test]
    fn test_empty_query_is_default() {
        let options = WidgetOptions::from_query(&HashMap::new());
        assert_eq!(options, WidgetOptions::default());
    }

    #[test]
    fn test_token_list_param() {
        let url = WidgetOptions::from_query(&params(&[("tokenList", "https://extendedtokens.uniswap.org/")]));
        assert_eq!(
            url.token_list,
            Some(TokenListSource::Url("https://extendedtokens.uniswap.org/".to_string()))
        );

        let inline = WidgetOptions::from_query(&params(&[(
            "tokenList",
            r#"[{"chainId":1,"address":"0x3819f64f282bf135d62168C1e513280dAF905e06","symbol":"HDRN","name":"Hedron","decimals":9}]"#,
        )]));
        assert!(matches!(inline.token_list, Some(TokenListSource::Inline(ref t)) if t.len() == 1));
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let options = WidgetOptions::from_query(&params(&[
            ("defaultChainId", "11155111"),
            ("theme", "dark"),
            ("hideConnectionUI", "maybe"),
            ("brandedFooter", "off"),
            ("convenienceFee", "1%"),
            ("dialogAnimation", "spin"),
            ("tokenList", "[not json"),
        ]));

        assert_eq!(options.theme, Some(ThemeInput::Named(ThemeName::Dark)));
        assert_eq!(options.flags.default_chain_id, None);
        assert!(!options.flags.hide_connection_ui);
        assert!(!options.flags.branded_footer);
        assert_eq!(options.flags.convenience_fee, None);
        assert_eq!(options.dialog_options.animation_type, DialogAnimation::Fade);
        assert_eq!(options.token_list, None);
        assert_eq!(WidgetOptions::from_query(&params(&[("theme", "purple")])).theme, None);
    }

    #[test]
    fn test_custom_theme_json() {
        let options = WidgetOptions::from_query(&params(&[("theme", r#"{"accent":"rgba(110, 214, 243, 1)"}"#)]));
        match options.theme {
            Some(ThemeInput::Custom(o)) => assert_eq!(o.accent.as_deref(), Some("rgba(110, 214, 243, 1)")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
