// src/ui.rs
use iced::font::Family;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Font, Theme};
use once_cell::sync::Lazy;

pub struct Styles {
    pub bg: Color,
    pub fg: Color,
    pub muted_fg: Color,
    pub card_bg: Color,
    pub accent: Color,
    pub accent_hover: Color,
    pub footer_bg: Color,
    pub footer_fg: Color,
}

pub static DARK_THEME: Lazy<Styles> = Lazy::new(|| Styles {
    bg: Color::from_rgb(0.07, 0.07, 0.09),
    fg: Color::from_rgb(1.0, 1.0, 1.0),
    muted_fg: Color::from_rgb(0.7, 0.7, 0.75),
    card_bg: Color::from_rgb(0.13, 0.13, 0.16),
    accent: Color::from_rgb(0.0078, 0.325, 0.6118), // #02539c
    accent_hover: Color::from_rgb(0.0, 0.26, 0.5),
    footer_bg: Color::from_rgb(0.0078, 0.325, 0.6118),
    footer_fg: Color::from_rgb(1.0, 1.0, 1.0),
});

pub fn background(bg: Color, fg: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(bg)),
        text_color: Some(fg),
        ..container::Style::default()
    }
}

pub fn card(styles: &Styles) -> impl Fn(&Theme) -> container::Style {
    let (bg, fg) = (styles.card_bg, styles.fg);
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(bg)),
        text_color: Some(fg),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Nav buttons: the active one is filled, the rest only on hover.
pub fn nav_button(styles: &Styles, active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    let (accent, hover, fg, idle) = (styles.accent, styles.accent_hover, styles.fg, styles.card_bg);
    move |_theme: &Theme, status: button::Status| {
        let bg = match (active, status) {
            (true, _) => accent,
            (false, button::Status::Hovered | button::Status::Pressed) => hover,
            (false, _) => idle,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: fg,
            border: Border {
                radius: 4.0.into(),
                ..Border::default()
            },
            ..button::Style::default()
        }
    }
}

/// `#rgb`, `#rrggbb`, `#rrggbbaa` or a handful of named colours.
pub fn css_color(value: &str) -> Option<Color> {
    let value = value.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return match hex.len() {
            3 => Some(Color::from_rgb8(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Some(Color::from_rgb8(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Color::from_rgba8(
                pair(0)?,
                pair(2)?,
                pair(4)?,
                pair(6)? as f32 / 255.0,
            )),
            _ => None,
        };
    }

    let rgb = match value.as_str() {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "gold" => (255, 215, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        _ => return None,
    };
    Some(Color::from_rgb8(rgb.0, rgb.1, rgb.2))
}

/// Pixel length such as `48px` or `48`.
pub fn css_px(value: &str) -> Option<f32> {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextShadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub color: Color,
}

/// First shadow of a `text-shadow` value. Blur is ignored; colour defaults to black.
pub fn text_shadow(value: &str) -> Option<TextShadow> {
    let first = value.split(',').next()?.trim();
    let mut lengths = Vec::new();
    let mut color = None;

    for token in first.split_whitespace() {
        match token.strip_suffix("px").unwrap_or(token).parse::<f32>() {
            Ok(n) => lengths.push(n),
            Err(_) => color = css_color(token),
        }
    }

    if lengths.len() < 2 {
        return None;
    }

    Some(TextShadow {
        offset_x: lengths[0],
        offset_y: lengths[1],
        color: color.unwrap_or(Color::BLACK),
    })
}

/// Maps the first generic family in a CSS font list onto an iced font.
pub fn css_font(families: &str) -> Font {
    for family in families.split(',') {
        let family = family.trim().trim_matches(|c| c == '"' || c == '\'').to_ascii_lowercase();
        let generic = match family.as_str() {
            "serif" | "times" | "times new roman" | "georgia" => Family::Serif,
            "monospace" | "courier" | "courier new" | "consolas" => Family::Monospace,
            "cursive" | "comic sans ms" => Family::Cursive,
            "fantasy" | "impact" => Family::Fantasy,
            "sans-serif" | "arial" | "helvetica" | "verdana" => Family::SansSerif,
            _ => continue,
        };
        return Font {
            family: generic,
            ..Font::DEFAULT
        };
    }
    Font::DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colours() {
        assert_eq!(css_color("#00ff00"), Some(Color::from_rgb8(0, 255, 0)));
        assert_eq!(css_color("#fff"), Some(Color::from_rgb8(255, 255, 255)));
        assert_eq!(css_color(" Gold "), Some(Color::from_rgb8(255, 215, 0)));
        assert_eq!(css_color("#12"), None);
        assert_eq!(css_color("chartreuse-ish"), None);
    }

    #[test]
    fn parses_pixel_sizes() {
        assert_eq!(css_px("48px"), Some(48.0));
        assert_eq!(css_px(" 60 "), Some(60.0));
        assert_eq!(css_px("3em"), None);
        assert_eq!(css_px("-4px"), None);
    }

    #[test]
    fn parses_default_glow() {
        let shadow = text_shadow("2px 2px 8px #000").unwrap();
        assert_eq!(shadow.offset_x, 2.0);
        assert_eq!(shadow.offset_y, 2.0);
        assert_eq!(shadow.color, Color::from_rgb8(0, 0, 0));
        assert_eq!(text_shadow("#000"), None);
    }

    #[test]
    fn maps_generic_font_families() {
        assert_eq!(css_font("Arial, sans-serif").family, Family::SansSerif);
        assert_eq!(css_font("'Fira Code', monospace").family, Family::Monospace);
        assert_eq!(css_font("Unknown Face"), Font::DEFAULT);
    }
}
