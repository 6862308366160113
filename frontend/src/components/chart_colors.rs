use plotters::style::RGBColor;

pub const INCOME_COLOR: RGBColor = RGBColor(16, 185, 129);
pub const EXPENSE_COLOR: RGBColor = RGBColor(244, 63, 94);
pub const AXIS_COLOR: RGBColor = RGBColor(148, 163, 184);

/// `"#3b82f6"` → `RGBColor(59, 130, 246)`.
pub fn hex_color(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregates::PALETTE;

    #[test]
    fn parses_palette_entries() {
        assert_eq!(hex_color("#3b82f6"), Some(RGBColor(59, 130, 246)));
        for entry in PALETTE {
            assert!(hex_color(entry).is_some(), "{} should parse", entry);
        }
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(hex_color("#fff"), None);
        assert_eq!(hex_color("#gggggg"), None);
    }
}
