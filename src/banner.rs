// src/banner.rs
use crate::data_types::Record;

pub const DEFAULT_TEXT: &str = "";
pub const DEFAULT_FONT_SIZE: &str = "48px";
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
pub const DEFAULT_COLOR: &str = "#ffffff";
pub const DEFAULT_GLOW: &str = "2px 2px 8px #000";

/// Style of the decorative overlay, as CSS-flavoured strings straight from the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerStyle {
    pub text: String,
    pub font_size: String,
    pub font_family: String,
    pub color: String,
    pub glow: String,
}

impl BannerStyle {
    /// Reads `BannerText`, `Font`, `FontSize`, `Color` and `Glow`; blanks take the defaults.
    pub fn from_record(record: &Record) -> Self {
        let field = |key: &str, default: &str| {
            record
                .non_empty(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| default.to_string())
        };

        let mut font_size = field("FontSize", DEFAULT_FONT_SIZE);
        if font_size.parse::<f64>().is_ok_and(|v| v.is_finite()) {
            font_size.push_str("px");
        }

        BannerStyle {
            text: record
                .non_empty("BannerText")
                .unwrap_or(DEFAULT_TEXT)
                .to_string(),
            font_size,
            font_family: field("Font", DEFAULT_FONT_FAMILY),
            color: field("Color", DEFAULT_COLOR),
            glow: field("Glow", DEFAULT_GLOW),
        }
    }

    pub fn from_first_row(record: Option<&Record>) -> Option<Self> {
        record.map(Self::from_record)
    }

    /// Inline style for a fixed, click-through overlay element.
    pub fn inline_css(&self) -> String {
        format!(
            "position: fixed; inset: 0; display: flex; align-items: center; \
             justify-content: center; pointer-events: none; z-index: 9999; \
             font-size: {}; font-family: {}; color: {}; text-shadow: {};",
            self.font_size, self.font_family, self.color, self.glow
        )
    }

    pub fn markup(&self) -> String {
        format!(
            "<div id=\"banner-overlay\" style=\"{}\">{}</div>\n",
            crate::render::escape_attr(&self.inline_css()),
            self.text
        )
    }
}
