//! `rgba(#hex, alpha)` fixup.
//!
//! Token authors write `rgba({color.black}, 0.5)`, which resolves to
//! `rgba(#000000, 0.5)`. CSS `rgba()` takes channels, not hex, so the
//! hex part is decoded.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::types::Colour;

static RGBA_HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgba\(\s*(#[0-9a-fA-F]{6}|#[0-9a-fA-F]{3})\s*,\s*([^)]*?)\s*\)").unwrap()
});

/// Rewrite every `rgba(#hex, alpha)` into `rgba(r, g, b, alpha)`.
pub fn fix_rgba(value: &str) -> Cow<'_, str> {
    RGBA_HEX.replace_all(value, |caps: &Captures| match Colour::from_hex(&caps[1]) {
        Ok(colour) => format!("rgba({}, {})", colour.channels(), &caps[2]),
        Err(_) => caps[0].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digit() {
        assert_eq!(fix_rgba("rgba(#ff0000, 0.5)"), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn test_three_digit() {
        assert_eq!(fix_rgba("rgba(#f00, 0.5)"), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn test_embedded_and_multiple() {
        assert_eq!(
            fix_rgba("0 1px 2px rgba(#000,.2), 0 0 1px rgba( #FFFFFF , 1 )"),
            "0 1px 2px rgba(0, 0, 0, .2), 0 0 1px rgba(255, 255, 255, 1)"
        );
    }

    #[test]
    fn test_untouched_values_borrow() {
        assert!(matches!(fix_rgba("rgba(0, 0, 0, 0.5)"), Cow::Borrowed(_)));
        assert!(matches!(fix_rgba("#ff0000"), Cow::Borrowed(_)));
        assert_eq!(fix_rgba("rgba(#ff00, 0.5)"), "rgba(#ff00, 0.5)");
    }
}
