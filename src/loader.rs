// src/loader.rs
use tracing::{debug, info, warn};

use crate::banner::BannerStyle;
use crate::data_types::Section;
use crate::normalizer::{first_record, normalize};
use crate::sheet_client::SheetClient;

/// Fetches every named sheet concurrently and returns the non-empty sections
/// in the order the names were given.
pub async fn load_sections(client: SheetClient, names: Vec<String>) -> Vec<Section> {
    let handles: Vec<_> = names
        .into_iter()
        .map(|name| {
            let client = client.clone();
            tokio::spawn(async move {
                let table = client.fetch_table(&name).await;
                Section::new(name, normalize(&table))
            })
        })
        .collect();

    let mut sections = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(section) if section.is_empty() => {
                debug!(section = %section.name, "section has no cards, skipping");
            }
            Ok(section) => {
                info!(section = %section.name, cards = section.records.len(), "section loaded");
                sections.push(section);
            }
            Err(e) => warn!("section task failed: {e}"),
        }
    }

    sections
}

/// First row of the banner sheet, if there is one.
pub async fn load_banner(client: SheetClient, sheet: String) -> Option<BannerStyle> {
    let table = client.fetch_table(&sheet).await;
    let banner = BannerStyle::from_first_row(first_record(&table).as_ref());
    match &banner {
        Some(style) => info!(text = %style.text, "banner loaded"),
        None => debug!(sheet = %sheet, "no banner row"),
    }
    banner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_endpoint, export_body, export_table, TestServer};
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn sections_come_back_in_configured_order() {
        let server = TestServer::start()
            .sheet("Common", export_table(&["Name"], &[&["Rock"], &["Stick"]]))
            .sheet("Rare", export_table(&["Name"], &[&["Dragon"]]))
            .sheet("Epic", export_table(&["Name"], &[&[""]]))
            .sheet("Cars", export_body("garbage"))
            .sheet("Misc", export_table(&["Name", "Demand"], &[&["Hat", "Low"]]))
            .serve()
            .await;
        let client = SheetClient::with_endpoint(server.endpoint());

        let sections = load_sections(
            client,
            names(&["Common", "Rare", "Epic", "Legendary", "Misc", "Cars"]),
        )
        .await;

        let loaded: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(loaded, vec!["Common", "Rare", "Misc"]);
        assert_eq!(sections[0].records.len(), 2);
        assert_eq!(sections[2].records[0].get("Demand"), Some("Low"));
        assert_eq!(server.requests().await.len(), 6);
    }

    #[tokio::test]
    async fn dropped_connection_skips_only_that_section() {
        let server = TestServer::start()
            .sheet("Common", export_table(&["Name"], &[&["Rock"]]))
            .dropped_sheet("Rare")
            .sheet("Misc", export_table(&["Name"], &[&["Hat"]]))
            .serve()
            .await;
        let client = SheetClient::with_endpoint(server.endpoint());

        let sections = load_sections(client, names(&["Common", "Rare", "Misc"])).await;

        let loaded: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(loaded, vec!["Common", "Misc"]);
        assert_eq!(sections[1].records[0].name(), "Hat");
    }

    #[tokio::test]
    async fn unreachable_sheet_yields_no_sections() {
        let client = SheetClient::with_endpoint(closed_endpoint().await);
        let sections = load_sections(client, names(&["Common", "Rare"])).await;
        assert!(sections.is_empty());
    }

    #[tokio::test]
    async fn banner_reads_first_row_only() {
        let server = TestServer::start()
            .sheet(
                "Banner",
                export_table(&["BannerText", "Color"], &[&["Sale!", "#00ff00"], &["Later", "#000"]]),
            )
            .serve()
            .await;
        let client = SheetClient::with_endpoint(server.endpoint());

        let banner = load_banner(client, "Banner".into()).await.unwrap();
        assert_eq!(banner.text, "Sale!");
        assert_eq!(banner.color, "#00ff00");
        assert_eq!(banner.font_size, "48px");
    }

    #[tokio::test]
    async fn empty_banner_sheet_means_no_banner() {
        let server = TestServer::start()
            .sheet("Banner", export_table(&["BannerText"], &[]))
            .serve()
            .await;
        let client = SheetClient::with_endpoint(server.endpoint());
        assert_eq!(load_banner(client, "Banner".into()).await, None);
    }
}
