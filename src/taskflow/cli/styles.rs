use console::Style;
use taskflow::model::{Priority, Status};

/// Parses `#RRGGBB` (leading `#` optional).
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Nearest xterm-256 color for an RGB triple (6x6x6 cube or grayscale ramp).
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((u16::from(r) - 8) * 24 / 247) as u8;
    }
    let scale = |c: u8| (u16::from(c) * 5 / 255) as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

/// Style for a category's display color. Unparsable colors render unstyled.
pub fn category_style(color: &str) -> Style {
    match parse_hex(color) {
        Some(rgb) => Style::new().color256(rgb_to_ansi256(rgb)),
        None => Style::new(),
    }
}

pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::new().red().bold(),
        Priority::Medium => Style::new().yellow(),
        Priority::Low => Style::new().green(),
    }
}

pub fn status_style(status: Status) -> Style {
    match status {
        Status::Todo => Style::new(),
        Status::InProgress => Style::new().cyan(),
        Status::Done => Style::new().green().dim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex("#3B82F6"), Some((0x3B, 0x82, 0xF6)));
        assert_eq!(parse_hex("10b981"), Some((0x10, 0xB9, 0x81)));
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }

    #[test]
    fn maps_to_256_palette() {
        assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
    }
}
