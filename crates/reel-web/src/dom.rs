//! DOM string conventions, kept free of `web-sys` so they test natively.

use reel_core::{DeltaMode, Key};

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Set on every inserted clone so a later attach only picks up originals.
pub const CLONE_ATTR: &str = "data-reel-clone";

/// `selector` restricted to tiles that are not clones, per list entry.
pub fn originals_selector(selector: &str) -> String {
    selector
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{s}:not([{CLONE_ATTR}])"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `parseFloat` for computed lengths: leading number, anything else is 0.
///
/// `"12.5px"` → 12.5, `"-4px"` → -4, `"auto"` → 0.
pub fn parse_px(s: &str) -> f32 {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    s[..end].parse::<f32>().unwrap_or(0.0)
}

/// `WheelEvent.deltaMode`: 0 pixel, 1 line, 2 page.
pub fn delta_mode(mode: u32) -> DeltaMode {
    match mode {
        1 => DeltaMode::Line,
        2 => DeltaMode::Page,
        _ => DeltaMode::Pixel,
    }
}

/// `KeyboardEvent.key` to the keys the carousel reacts to.
pub fn key(name: &str) -> Key {
    match name {
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        other => Key::Other(other.to_string()),
    }
}

/// Value written to the scale custom property.
pub fn format_scale(scale: f32) -> String {
    format!("{scale:.4}")
}

/// Attribute value marking the initial tile.
pub fn is_initial(value: Option<&str>) -> bool {
    value == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_px_like_parse_float() {
        assert_eq!(parse_px("12px"), 12.0);
        assert_eq!(parse_px(" 12.5px"), 12.5);
        assert_eq!(parse_px("-4px"), -4.0);
        assert_eq!(parse_px(".5px"), 0.5);
        assert_eq!(parse_px("auto"), 0.0);
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("-"), 0.0);
        assert_eq!(parse_px("1.2.3"), 1.2);
    }

    #[test]
    fn originals_selector_skips_clones() {
        assert_eq!(
            originals_selector(".work-card"),
            ".work-card:not([data-reel-clone])"
        );
        assert_eq!(
            originals_selector("li.card, .tile "),
            "li.card:not([data-reel-clone]), .tile:not([data-reel-clone])"
        );
    }

    #[test]
    fn maps_event_fields() {
        assert_eq!(delta_mode(0), DeltaMode::Pixel);
        assert_eq!(delta_mode(1), DeltaMode::Line);
        assert_eq!(delta_mode(2), DeltaMode::Page);
        assert_eq!(delta_mode(7), DeltaMode::Pixel);
        assert_eq!(key("ArrowRight"), Key::ArrowRight);
        assert_eq!(key("a"), Key::Other("a".into()));
        assert_eq!(format_scale(1.16), "1.1600");
        assert!(is_initial(Some("true")));
        assert!(!is_initial(Some("false")));
        assert!(!is_initial(None));
    }
}
