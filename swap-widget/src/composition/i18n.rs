//! Internationalisation layer.
//!
//! Resolves the requested locale against the supported set and serves the handful of
//! strings the widget chrome renders itself. Catalogs for locales other than `en-US`
//! are loaded by the swap UI; until then lookups fall back to English.

use std::collections::HashMap;

pub const DEFAULT_LOCALE: &str = "en-US";

pub const SUPPORTED_LOCALES: &[&str] = &[
    "af-ZA", "ar-SA", "ca-ES", "cs-CZ", "da-DK", "de-DE", "el-GR", "en-US", "es-ES", "fi-FI",
    "fr-FR", "he-IL", "hu-HU", "id-ID", "it-IT", "ja-JP", "ko-KR", "nl-NL", "no-NO", "pl-PL",
    "pt-BR", "pt-PT", "ro-RO", "ru-RU", "sr-SP", "sv-SE", "sw-TZ", "tr-TR", "uk-UA", "vi-VN",
    "zh-CN", "zh-TW",
];

/// Message ids rendered by the widget chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    Swap,
    YouPay,
    YouReceive,
    SelectToken,
    ConnectWallet,
    ReviewSwap,
    PoweredBy,
    Settings,
    Close,
    FaultTitle,
    FaultRetry,
    LoadingTokens,
    NoTokens,
    MaxSlippage,
    TransactionDeadline,
    Auto,
    Reset,
}

fn english() -> HashMap<Message, &'static str> {
    HashMap::from([
        (Message::Swap, "Swap"),
        (Message::YouPay, "You pay"),
        (Message::YouReceive, "You receive"),
        (Message::SelectToken, "Select token"),
        (Message::ConnectWallet, "Connect wallet"),
        (Message::ReviewSwap, "Review swap"),
        (Message::PoweredBy, "Powered by the Uniswap protocol"),
        (Message::Settings, "Settings"),
        (Message::Close, "Close"),
        (Message::FaultTitle, "Something went wrong."),
        (Message::FaultRetry, "Try again"),
        (Message::LoadingTokens, "Loading tokens…"),
        (Message::NoTokens, "No tokens on this network"),
        (Message::MaxSlippage, "Max slippage"),
        (Message::TransactionDeadline, "Transaction deadline"),
        (Message::Auto, "Auto"),
        (Message::Reset, "Reset"),
    ])
}

#[derive(Debug, Clone)]
pub struct I18nScope {
    locale: &'static str,
    catalog: HashMap<Message, &'static str>,
}

impl I18nScope {
    pub fn new(requested: Option<&str>) -> Self {
        Self {
            locale: resolve_locale(requested),
            catalog: english(),
        }
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn t(&self, message: Message) -> &'static str {
        self.catalog.get(&message).copied().unwrap_or_default()
    }
}

/// Match case-insensitively, then by language prefix (`fr` → `fr-FR`).
pub fn resolve_locale(requested: Option<&str>) -> &'static str {
    let Some(requested) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
        return DEFAULT_LOCALE;
    };
    if let Some(exact) = SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|locale| locale.eq_ignore_ascii_case(requested))
    {
        return exact;
    }
    let language = requested.split(['-', '_']).next().unwrap_or(requested);
    if let Some(by_language) = SUPPORTED_LOCALES.iter().copied().find(|locale| {
        locale
            .split('-')
            .next()
            .is_some_and(|l| l.eq_ignore_ascii_case(language))
    }) {
        return by_language;
    }
    log::warn!("Unsupported locale {}, falling back to {}", requested, DEFAULT_LOCALE);
    DEFAULT_LOCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale(None), "en-US");
        assert_eq!(resolve_locale(Some("de-DE")), "de-DE");
        assert_eq!(resolve_locale(Some("pt-br")), "pt-BR");
        assert_eq!(resolve_locale(Some("fr")), "fr-FR");
        assert_eq!(resolve_locale(Some("tlh-KX")), "en-US");
        assert_eq!(resolve_locale(Some("  ")), "en-US");
    }

    #[test]
    fn test_every_message_has_english_text() {
        let scope = I18nScope::new(Some("ja-JP"));
        assert_eq!(scope.locale(), "ja-JP");
        assert_eq!(scope.t(Message::ConnectWallet), "Connect wallet");
        assert!(!scope.t(Message::LoadingTokens).is_empty());
    }
}
