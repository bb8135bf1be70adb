// src/search.rs
use crate::data_types::Section;
use crate::render::{cards, Card};

/// Case-insensitive name filter over every rendered card, across all sections.
/// Cards are kept with the slug of the section they belong to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    cards: Vec<(String, Card)>,
    term: String,
}

impl SearchFilter {
    pub fn new() -> Self {
        SearchFilter::default()
    }

    /// Registers the cards of freshly rendered sections.
    pub fn index(&mut self, sections: &[Section]) {
        self.cards = sections
            .iter()
            .flat_map(|s| {
                let slug = s.slug();
                cards(s).into_iter().map(move |card| (slug.clone(), card))
            })
            .collect();
    }

    pub fn set_term(&mut self, input: &str) {
        self.term = input.to_lowercase();
    }

    pub fn shows(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.term)
    }

    /// Matching cards across every section, in section then row order.
    pub fn visible(&self) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|(_, card)| self.shows(&card.name))
            .map(|(_, card)| card)
            .collect()
    }

    /// Matching cards of the section with this slug.
    pub fn visible_in(&self, slug: &str) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|(s, card)| s == slug && self.shows(&card.name))
            .map(|(_, card)| card)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::Record;
    use pretty_assertions::assert_eq;

    fn section(name: &str, cards: &[&str]) -> Section {
        Section::new(
            name,
            cards
                .iter()
                .map(|c| [("Name", *c)].into_iter().collect::<Record>())
                .collect(),
        )
    }

    fn names(cards: Vec<&Card>) -> Vec<&str> {
        cards.into_iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn matches_substring_case_insensitively() {
        let mut filter = SearchFilter::new();
        filter.index(&[section("Rare", &["Dragon", "Phoenix", "Dragonfly"])]);
        filter.set_term("drag");
        assert_eq!(names(filter.visible()), vec!["Dragon", "Dragonfly"]);
        filter.set_term("DRAG");
        assert_eq!(names(filter.visible()), vec!["Dragon", "Dragonfly"]);
    }

    #[test]
    fn spans_every_section() {
        let mut filter = SearchFilter::new();
        filter.index(&[
            section("Common", &["Red Car"]),
            section("Cars", &["Racecar", "Bike"]),
        ]);
        filter.set_term("car");
        assert_eq!(names(filter.visible()), vec!["Red Car", "Racecar"]);
    }

    #[test]
    fn empty_term_shows_all_and_repeats_are_stable() {
        let mut filter = SearchFilter::new();
        filter.index(&[section("Misc", &["Alpha", "Beta"])]);
        assert_eq!(names(filter.visible()), vec!["Alpha", "Beta"]);
        filter.set_term("ph");
        let first = filter.visible().len();
        filter.set_term("ph");
        assert_eq!(filter.visible().len(), first);
        filter.set_term("");
        assert_eq!(names(filter.visible()), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn per_section_view_keeps_section_boundaries() {
        let mut filter = SearchFilter::new();
        filter.index(&[
            section("Common", &["Red Car", "Rock"]),
            section("Car Parts", &["Racecar", "Bike"]),
        ]);
        filter.set_term("car");
        assert_eq!(names(filter.visible_in("common")), vec!["Red Car"]);
        assert_eq!(names(filter.visible_in("car-parts")), vec!["Racecar"]);
        assert!(filter.visible_in("omega").is_empty());
    }
}
