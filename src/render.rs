// src/render.rs
use crate::data_types::{Record, Section};

pub const IMAGE_FIELD: &str = "Image URL";

/// Optional labeled lines, in display order.
pub const DETAIL_FIELDS: [&str; 4] = ["Demand", "Average Value", "Ranged Value", "After Tax Value"];

/// What a single card shows, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub name: String,
    pub image_url: Option<String>,
    pub details: Vec<(&'static str, String)>,
}

impl Card {
    pub fn from_record(record: &Record) -> Self {
        Card {
            name: record.name().to_string(),
            image_url: record.non_empty(IMAGE_FIELD).map(str::to_string),
            details: DETAIL_FIELDS
                .iter()
                .filter_map(|&label| record.non_empty(label).map(|v| (label, v.to_string())))
                .collect(),
        }
    }

    pub fn markup(&self) -> String {
        let attr_name = escape_attr(&self.name);
        let mut html = format!("<div class=\"card\" data-name=\"{attr_name}\">\n");

        if let Some(url) = &self.image_url {
            html.push_str(&format!(
                "<img src=\"{url}\" alt=\"{attr_name}\" onerror=\"this.style.display='none'\">\n"
            ));
        }
        html.push_str(&format!("<h3>{}</h3>\n", self.name));
        for (label, value) in &self.details {
            html.push_str(&format!("<p><strong>{label}:</strong> {value}</p>\n"));
        }
        html.push_str("</div>\n");

        html
    }
}

pub fn cards(section: &Section) -> Vec<Card> {
    section.records.iter().map(Card::from_record).collect()
}

pub fn card_markup(record: &Record) -> String {
    Card::from_record(record).markup()
}

/// Heading plus every card, wrapped in a container keyed by the section slug.
/// Empty sections produce nothing.
pub fn section_markup(section: &Section) -> String {
    section_markup_with(section, true)
}

/// As [`section_markup`], with the container hidden unless `visible`.
pub fn section_markup_with(section: &Section, visible: bool) -> String {
    if section.is_empty() {
        return String::new();
    }

    let hidden = if visible { "" } else { " style=\"display:none\"" };
    let mut html = format!(
        "<div class=\"section\" id=\"{}\"{hidden}>\n<h2>{}</h2>\n",
        section.slug(),
        section.name
    );
    for record in &section.records {
        html.push_str(&card_markup(record));
    }
    html.push_str("</div>\n");

    html
}

/// Escapes a value for use inside a quoted attribute.
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
