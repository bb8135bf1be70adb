// src/export.rs
use std::path::{Path, PathBuf};
use tracing::info;

use crate::banner::BannerStyle;
use crate::data_types::{slugify, Section};
use crate::navigation::NavigationController;
use crate::render::{escape_attr, section_markup_with};

/// A standalone HTML snapshot of what was loaded: banner, nav and every section.
/// Only the active section is left visible.
pub fn page_markup(
    title: &str,
    navigation: &NavigationController,
    sections: &[Section],
    banner: Option<&BannerStyle>,
) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n"
    );

    if let Some(banner) = banner {
        html.push_str(&banner.markup());
    }

    html.push_str("<nav class=\"sections-nav\">\n");
    for label in navigation.labels() {
        let class = if navigation.is_active(label) {
            " class=\"active\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<button{class} data-section=\"{}\">{label}</button>\n",
            escape_attr(&slugify(label))
        ));
    }
    html.push_str("</nav>\n<div id=\"sections\">\n");

    for section in sections {
        let visible = navigation.is_visible(&section.slug());
        html.push_str(&section_markup_with(section, visible));
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

pub async fn write_page(path: PathBuf, markup: String) -> Result<PathBuf, String> {
    tokio::fs::write(&path, markup)
        .await
        .map_err(|e| format!("Could not write {}: {e}", path.display()))?;
    info!(path = %path.display(), "page exported");
    Ok(path)
}

/// Asks where to save, then writes. `Ok(None)` when the dialog is cancelled.
pub async fn save_page(markup: String) -> Result<Option<PathBuf>, String> {
    let handle = rfd::AsyncFileDialog::new()
        .add_filter("HTML Files", &["html"])
        .set_file_name("values.html")
        .save_file()
        .await;

    match handle {
        Some(handle) => write_page(handle.path().to_path_buf(), markup).await.map(Some),
        None => Ok(None),
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
