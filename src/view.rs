// Pure view models for the two presentations of the roster.

use crate::{
    character::{Character, CharacterId},
    progression::{next_threshold, progress_percent},
};

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterCard {
    pub id: CharacterId,
    pub name: String,
    pub class: String,
    pub level: u8,
    pub exp: u64,
    pub next_threshold: u64,
    pub progress_percent: f64,
}

impl CharacterCard {
    // Gauge ratio in [0, 1].
    pub fn ratio(&self) -> f64 {
        self.progress_percent / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRow {
    pub id: CharacterId,
    pub name: String,
    pub class: String,
    pub level: u8,
}

pub fn dashboard_cards(characters: &[Character]) -> Vec<CharacterCard> {
    characters
        .iter()
        .map(|c| CharacterCard {
            id: c.id,
            name: c.name.clone(),
            class: c.class.clone(),
            level: c.level,
            exp: c.exp,
            next_threshold: next_threshold(c.level),
            progress_percent: progress_percent(c.exp, c.level),
        })
        .collect()
}

pub fn admin_rows(characters: &[Character]) -> Vec<AdminRow> {
    characters
        .iter()
        .map(|c| AdminRow {
            id: c.id,
            name: c.name.clone(),
            class: c.class.clone(),
            level: c.level,
        })
        .collect()
}
