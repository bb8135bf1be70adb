// src/main.rs
use iced::widget::{button, column, container, image, row, scrollable, text, text_input, Column, Row, Space, Stack, Text};
use iced::{Element, Length, Padding, Task, Theme};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

use value_viewer::banner::BannerStyle;
use value_viewer::config::AppConfig;
use value_viewer::data_types::Section;
use value_viewer::navigation::NavigationController;
use value_viewer::render::{self, Card};
use value_viewer::search::SearchFilter;
use value_viewer::sheet_client::SheetClient;
use value_viewer::ui::{self, Styles, DARK_THEME};
use value_viewer::{export, loader, logging, tax};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const TITLE: &str = "Value Viewer";
const CARDS_PER_ROW: usize = 4;
const IMAGE_SIZE: f32 = 96.0;

pub fn main() -> iced::Result {
    logging::init();
    let config = AppConfig::load();

    iced::application(ValueViewer::title, ValueViewer::update, ValueViewer::view)
        .theme(ValueViewer::theme)
        .window_size((1024.0, 768.0))
        .run_with(move || ValueViewer::new(config))
}

struct ValueViewer {
    client: SheetClient,
    styles: &'static Styles,
    sections: Vec<Section>,
    loading: bool,
    loaded_at: Option<DateTime<Local>>,
    navigation: NavigationController,
    search: SearchFilter,
    search_input: String,
    withdrawal_input: String,
    price_input: String,
    tax_rate_input: String,
    banner: Option<BannerStyle>,
    images: HashMap<String, image::Handle>,
    status: Option<String>,
}

#[derive(Debug, Clone)]
enum Message {
    SectionsLoaded(Vec<Section>),
    BannerLoaded(Option<BannerStyle>),
    ImageLoaded(String, Option<Vec<u8>>),
    SelectSection(String),
    SearchChanged(String),
    WithdrawalChanged(String),
    PriceChanged(String),
    TaxRateChanged(String),
    ExportPage,
    PageExported(Result<Option<PathBuf>, String>),
}

impl ValueViewer {
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let client = SheetClient::new(&config);
        let navigation = NavigationController::new(config.sections.clone());

        info!(sections = config.sections.len(), "loading sheets");
        let sections = Task::perform(
            loader::load_sections(client.clone(), config.sections.clone()),
            Message::SectionsLoaded,
        );
        let banner = Task::perform(
            loader::load_banner(client.clone(), config.banner_sheet.clone()),
            Message::BannerLoaded,
        );

        (
            ValueViewer {
                client,
                styles: &DARK_THEME,
                sections: Vec::new(),
                loading: true,
                loaded_at: None,
                navigation,
                search: SearchFilter::new(),
                search_input: String::new(),
                withdrawal_input: String::new(),
                price_input: String::new(),
                tax_rate_input: String::new(),
                banner: None,
                images: HashMap::new(),
                status: None,
            },
            Task::batch([sections, banner]),
        )
    }

    fn title(&self) -> String {
        format!("{} v{}", TITLE, VERSION)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SectionsLoaded(sections) => {
                self.loading = false;
                self.loaded_at = Some(Local::now());
                self.search.index(&sections);
                self.sections = sections;

                let mut urls: Vec<String> = self
                    .sections
                    .iter()
                    .flat_map(|s| s.records.iter())
                    .filter_map(|r| r.non_empty(render::IMAGE_FIELD))
                    .map(|url| url.trim().to_string())
                    .collect();
                urls.sort();
                urls.dedup();

                Task::batch(urls.into_iter().map(|url| {
                    let client = self.client.clone();
                    let target = url.clone();
                    Task::perform(
                        async move { client.fetch_image(&target).await },
                        move |bytes| Message::ImageLoaded(url.clone(), bytes),
                    )
                }))
            }

            Message::BannerLoaded(banner) => {
                self.banner = banner;
                Task::none()
            }

            Message::ImageLoaded(url, bytes) => {
                if let Some(bytes) = bytes {
                    self.images.insert(url, image::Handle::from_bytes(bytes));
                }
                Task::none()
            }

            Message::SelectSection(label) => {
                self.navigation.activate(&label);
                Task::none()
            }

            Message::SearchChanged(input) => {
                self.search.set_term(&input);
                self.search_input = input;
                Task::none()
            }

            Message::WithdrawalChanged(input) => {
                self.withdrawal_input = input;
                Task::none()
            }

            Message::PriceChanged(input) => {
                self.price_input = input;
                Task::none()
            }

            Message::TaxRateChanged(input) => {
                self.tax_rate_input = input;
                Task::none()
            }

            Message::ExportPage => {
                let markup = export::page_markup(
                    TITLE,
                    &self.navigation,
                    &self.sections,
                    self.banner.as_ref(),
                );
                Task::perform(export::save_page(markup), Message::PageExported)
            }

            Message::PageExported(result) => {
                self.status = match result {
                    Ok(Some(path)) => Some(format!("Exported {}", export::file_name(&path))),
                    Ok(None) => None,
                    Err(e) => {
                        warn!("{e}");
                        Some(e)
                    }
                };
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let theme = self.styles;

        let main_content = column![
            self.nav_view(),
            self.tools_view(),
            self.sections_view(),
            self.footer_view(),
        ]
        .height(Length::Fill);

        let page = container(main_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(ui::background(theme.bg, theme.fg));

        match &self.banner {
            Some(banner) => Stack::new().push(page).push(self.banner_view(banner)).into(),
            None => page.into(),
        }
    }

    fn nav_view(&self) -> Element<'_, Message> {
        let buttons = self.navigation.labels().iter().map(|label| {
            button(text(label.as_str()).size(16))
                .padding([6, 14])
                .style(ui::nav_button(self.styles, self.navigation.is_active(label)))
                .on_press(Message::SelectSection(label.clone()))
                .into()
        });

        container(Row::with_children(buttons).spacing(8))
            .padding(10)
            .width(Length::Fill)
            .into()
    }

    fn tools_view(&self) -> Element<'_, Message> {
        let theme = self.styles;

        let search = text_input("Search items...", &self.search_input)
            .on_input(Message::SearchChanged)
            .padding(8)
            .width(Length::FillPortion(2));

        let withdrawal = row![
            text_input("Amount", &self.withdrawal_input)
                .on_input(Message::WithdrawalChanged)
                .padding(8)
                .width(Length::Fixed(120.0)),
            text(format!("Withdraw: {}", tax::withdrawal_text(&self.withdrawal_input)))
                .size(16)
                .color(theme.fg),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        let total = row![
            text_input("Price", &self.price_input)
                .on_input(Message::PriceChanged)
                .padding(8)
                .width(Length::Fixed(100.0)),
            text_input("Tax %", &self.tax_rate_input)
                .on_input(Message::TaxRateChanged)
                .padding(8)
                .width(Length::Fixed(80.0)),
            text(tax::total_text(&self.price_input, &self.tax_rate_input))
                .size(16)
                .color(theme.fg),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        row![search, withdrawal, total]
            .spacing(20)
            .padding([0, 10])
            .align_y(iced::Alignment::Center)
            .into()
    }

    fn sections_view(&self) -> Element<'_, Message> {
        let theme = self.styles;

        if self.loading {
            return centered_message("Loading values...", theme);
        }

        let visible = self
            .sections
            .iter()
            .find(|s| self.navigation.is_visible(&s.slug()));

        match visible {
            Some(section) => scrollable(self.section_view(section).padding(10))
                .height(Length::Fill)
                .into(),
            None => Space::with_height(Length::Fill).into(),
        }
    }

    fn section_view(&self, section: &Section) -> Column<'_, Message> {
        let cards = self.search.visible_in(&section.slug());

        let rows = cards.chunks(CARDS_PER_ROW).map(|chunk| {
            let mut row = Row::with_children(chunk.iter().map(|c| self.card_view(c)))
                .spacing(10);
            for _ in chunk.len()..CARDS_PER_ROW {
                row = row.push(Space::with_width(Length::Fill));
            }
            row.into()
        });

        column![text(section.name.clone()).size(28).color(self.styles.fg)]
            .push(Column::with_children(rows).spacing(10))
            .spacing(12)
    }

    fn card_view(&self, card: &Card) -> Element<'_, Message> {
        let theme = self.styles;
        let mut content = Column::new().spacing(4);

        if let Some(handle) = card.image_url.as_ref().and_then(|url| self.images.get(url.trim())) {
            content = content.push(
                image(handle.clone())
                    .width(Length::Fixed(IMAGE_SIZE))
                    .height(Length::Fixed(IMAGE_SIZE)),
            );
        }

        content = content.push(text(card.name.clone()).size(20).color(theme.fg));
        for (label, value) in &card.details {
            content = content.push(
                text(format!("{label}: {value}"))
                    .size(14)
                    .color(theme.muted_fg),
            );
        }

        container(content)
            .padding(12)
            .width(Length::Fill)
            .style(ui::card(theme))
            .into()
    }

    fn banner_view(&self, banner: &BannerStyle) -> Element<'_, Message> {
        let size = ui::css_px(&banner.font_size).unwrap_or(48.0);
        let font = ui::css_font(&banner.font_family);
        let color = ui::css_color(&banner.color).unwrap_or(iced::Color::WHITE);

        let label = |color: iced::Color| -> Text<'static> {
            text(banner.text.clone()).size(size).font(font).color(color)
        };

        let layered: Element<'_, Message> = match ui::text_shadow(&banner.glow) {
            Some(shadow) => {
                let pad = shadow.offset_x.abs().max(shadow.offset_y.abs());
                let offset = Padding {
                    top: pad + shadow.offset_y,
                    bottom: pad - shadow.offset_y,
                    left: pad + shadow.offset_x,
                    right: pad - shadow.offset_x,
                };
                Stack::new()
                    .push(container(label(shadow.color)).padding(offset))
                    .push(container(label(color)).padding(pad))
                    .into()
            }
            None => label(color).into(),
        };

        // Text and containers never capture pointer events, so clicks fall through.
        container(layered)
            .center(Length::Fill)
            .into()
    }

    fn footer_view(&self) -> Element<'_, Message> {
        let theme = self.styles;

        let loaded = match self.loaded_at {
            Some(at) => format!("{} sections, loaded {}", self.sections.len(), at.format("%H:%M:%S")),
            None => "Loading...".to_string(),
        };
        let status = self.status.clone().unwrap_or_default();

        container(
            row![
                text(format!("{} v{} · {}", TITLE, VERSION, loaded))
                    .size(14)
                    .color(theme.footer_fg),
                Space::with_width(Length::Fill),
                text(status).size(14).color(theme.footer_fg),
                button(text("Export HTML").size(14))
                    .padding([4, 10])
                    .style(ui::nav_button(theme, false))
                    .on_press(Message::ExportPage),
            ]
            .spacing(10)
            .align_y(iced::Alignment::Center),
        )
        .padding(10)
        .width(Length::Fill)
        .style(ui::background(theme.footer_bg, theme.footer_fg))
        .into()
    }
}

fn centered_message<'a>(message: &'a str, theme: &Styles) -> Element<'a, Message> {
    container(text(message).size(24).color(theme.fg))
        .center(Length::Fill)
        .into()
}
