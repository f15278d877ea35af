//! CSS color strings used for element fills and the canvas background.

use peniko::Color;

/// The keyword for a fully transparent fill.
pub const TRANSPARENT: &str = "transparent";

/// Parse a `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent` string.
///
/// Returns `None` for anything else.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.eq_ignore_ascii_case(TRANSPARENT) {
        return Some(Color::from_rgba8(0, 0, 0, 0));
    }

    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

    match hex.len() {
        3 => {
            let r = channel(0..1)? * 17;
            let g = channel(1..2)? * 17;
            let b = channel(2..3)? * 17;
            Some(Color::from_rgba8(r, g, b, 255))
        }
        6 => Some(Color::from_rgba8(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
        8 => Some(Color::from_rgba8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

/// Check whether a string is a color the editor accepts.
pub fn is_valid_color(value: &str) -> bool {
    parse_color(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let rgba = parse_color("#ff0000").unwrap().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 0, 0, 255));

        let rgba = parse_color("#3b82f6").unwrap().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (0x3b, 0x82, 0xf6));
    }

    #[test]
    fn test_parse_short_and_alpha() {
        let rgba = parse_color("#333").unwrap().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (0x33, 0x33, 0x33));

        let rgba = parse_color("#00000080").unwrap().to_rgba8();
        assert_eq!(rgba.a, 0x80);
    }

    #[test]
    fn test_transparent() {
        let rgba = parse_color("transparent").unwrap().to_rgba8();
        assert_eq!(rgba.a, 0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_color("red").is_none());
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("#gggggg").is_none());
        assert!(parse_color("").is_none());
        assert!(!is_valid_color("#é12"));
    }
}
