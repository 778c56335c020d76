// Import necessary modules for serialization and the level table.
use crate::progression::{MIN_LEVEL, level_for};
use serde::{Deserialize, Serialize};

pub type CharacterId = i64;

// A single adventurer as persisted in the roster file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId, // Creation instant in milliseconds, unique within the roster.
    pub name: String,
    pub class: String,
    pub exp: u64,
    pub level: u8, // Always derivable from `exp`, rewritten on every award.
}

impl Character {
    // Fresh characters start at level 1 with no experience.
    pub fn new(id: CharacterId, name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            class: class.into(),
            exp: 0,
            level: MIN_LEVEL,
        }
    }

    // Add experience and recompute the level instead of trusting the stored one.
    pub fn gain_experience(&mut self, amount: u64) {
        self.exp = self.exp.saturating_add(amount);
        self.level = level_for(self.exp);
    }
}

// The ordered list of characters, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    // Append a new character, bumping the id past any collision so ids stay unique.
    pub fn create(
        &mut self,
        created_at: CharacterId,
        name: impl Into<String>,
        class: impl Into<String>,
    ) -> CharacterId {
        let mut id = created_at;
        while self.get(id).is_some() {
            id += 1;
        }
        self.characters.push(Character::new(id, name, class));
        id
    }

    // Remove by stable id, returning the removed character if it existed.
    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        let index = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(index))
    }
}

impl From<Vec<Character>> for Roster {
    fn from(characters: Vec<Character>) -> Self {
        Self::new(characters)
    }
}
