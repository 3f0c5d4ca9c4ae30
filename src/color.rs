use egui::Color32;

use crate::error::ColorError;

/// Colours offered by the toolbar, in display order
pub const PALETTE: [Color32; 7] = [
    Color32::from_rgb(0x00, 0x00, 0x00),
    Color32::from_rgb(0xFF, 0x00, 0x00),
    Color32::from_rgb(0x00, 0xFF, 0x00),
    Color32::from_rgb(0x00, 0x00, 0xFF),
    Color32::from_rgb(0xFF, 0xFF, 0x00),
    Color32::from_rgb(0xFF, 0x00, 0xFF),
    Color32::from_rgb(0x00, 0xFF, 0xFF),
];

const NAMED: &[(&str, Color32)] = &[
    ("black", Color32::from_rgb(0, 0, 0)),
    ("white", Color32::from_rgb(255, 255, 255)),
    ("red", Color32::from_rgb(255, 0, 0)),
    ("green", Color32::from_rgb(0, 128, 0)),
    ("lime", Color32::from_rgb(0, 255, 0)),
    ("blue", Color32::from_rgb(0, 0, 255)),
    ("yellow", Color32::from_rgb(255, 255, 0)),
    ("magenta", Color32::from_rgb(255, 0, 255)),
    ("fuchsia", Color32::from_rgb(255, 0, 255)),
    ("cyan", Color32::from_rgb(0, 255, 255)),
    ("aqua", Color32::from_rgb(0, 255, 255)),
    ("gray", Color32::from_rgb(128, 128, 128)),
    ("grey", Color32::from_rgb(128, 128, 128)),
    ("orange", Color32::from_rgb(255, 165, 0)),
    ("purple", Color32::from_rgb(128, 0, 128)),
];

/// Parse `#RRGGBB`, `#RGB` or a colour name into an opaque colour
pub fn parse_color(input: &str) -> Result<Color32, ColorError> {
    let trimmed = input.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::MalformedHex(input.to_owned()));
    }

    let lower = trimmed.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, color)| *color)
        .ok_or_else(|| ColorError::UnknownName(input.to_owned()))
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            // #abc expands to #aabbcc
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

/// `#RRGGBB` form of an opaque colour
pub fn to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(parse_color("#FF00FF").unwrap(), Color32::from_rgb(255, 0, 255));
        assert_eq!(parse_color("#00ff00").unwrap(), Color32::from_rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#f80").unwrap(), Color32::from_rgb(255, 136, 0));
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!(parse_color("Black").unwrap(), Color32::BLACK);
        assert_eq!(parse_color(" GREY ").unwrap(), Color32::from_rgb(128, 128, 128));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_color("#12345"), Err(ColorError::MalformedHex(_))));
        assert!(matches!(parse_color("#zzzzzz"), Err(ColorError::MalformedHex(_))));
        assert!(matches!(parse_color("chartreuse-ish"), Err(ColorError::UnknownName(_))));
    }

    #[test]
    fn test_palette_round_trips_through_hex() {
        for color in PALETTE {
            assert_eq!(parse_color(&to_hex(color)).unwrap(), color);
        }
        assert_eq!(to_hex(PALETTE[0]), "#000000");
    }
}
