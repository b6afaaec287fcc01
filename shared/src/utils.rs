//! Display helpers for EVM accounts.
//!
//! ```rust
//! use shared::utils::truncate_address;
//!
//! assert_eq!(truncate_address("0x1D9Cd50Dde9C19073B81303b3d930444d11552f7"), "0x1D9C...52f7");
//! ```

/// Hex digits in a 20-byte address, without the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Leading and trailing hex digits kept by [`truncate_address`].
const VISIBLE_DIGITS: usize = 4;

/// `true` for `0x` followed by exactly 40 hex digits. Checksum casing is not verified.
pub fn is_evm_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == ADDRESS_HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Shorten an account to `0x` plus four leading and four trailing hex digits.
///
/// Anything that is not a well-formed address (ENS names, partial input) is shown
/// unchanged.
pub fn truncate_address(address: &str) -> String {
    if !is_evm_address(address) {
        return address.to_string();
    }
    let hex = &address[2..];
    format!(
        "0x{}...{}",
        &hex[..VISIBLE_DIGITS],
        &hex[ADDRESS_HEX_LEN - VISIBLE_DIGITS..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x0dA5533d5a9aA08c1792Ef2B6a7444E149cCB0AD";

    #[test]
    fn test_truncate_address() {
        assert_eq!(truncate_address(ADDR), "0x0dA5...B0AD");
    }

    #[test]
    fn test_non_addresses_untouched() {
        assert_eq!(truncate_address("0xabc"), "0xabc");
        assert_eq!(truncate_address("vitalik.eth"), "vitalik.eth");
        assert_eq!(truncate_address(""), "");
        // right length, wrong prefix
        assert_eq!(
            truncate_address("1x0dA5533d5a9aA08c1792Ef2B6a7444E149cCB0AD"),
            "1x0dA5533d5a9aA08c1792Ef2B6a7444E149cCB0AD"
        );
    }

    #[test]
    fn test_is_evm_address() {
        assert!(is_evm_address(ADDR));
        assert!(!is_evm_address("0x0dA5533d5a9aA08c1792Ef2B6a7444E149cCB0AZ"));
        assert!(!is_evm_address(&ADDR[..41]));
    }
}
