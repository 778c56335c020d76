use crate::{
    character::{CharacterId, Roster},
    error::Result,
    repository::{RosterFile, RosterStore},
};

// A change requested by the user, targeting characters by their stable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AwardExperience { id: CharacterId, amount: String },
    CreateCharacter { name: String, class: String },
    RemoveCharacter { id: CharacterId },
}

// A mutated roster waiting to be written against the version it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub roster: Roster,
    pub version: String,
}

/// The roster and version token of the last fetch. Owned by the app and
/// replaced wholesale after every successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    roster: Roster,
    version: String,
}

impl Session {
    pub fn new(roster: Roster, version: impl Into<String>) -> Self {
        Self {
            roster,
            version: version.into(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Apply `mutation` to a copy of the roster. Malformed input yields `None`
    /// and nothing is written.
    pub fn prepare(&self, mutation: &Mutation, now_ms: CharacterId) -> Option<PendingWrite> {
        let mut roster = self.roster.clone();
        match mutation {
            Mutation::AwardExperience { id, amount } => {
                let Some(amount) = parse_award(amount) else {
                    log::debug!("Ignoring award of {amount:?} to {id}");
                    return None;
                };
                let character = roster.get_mut(*id)?;
                character.gain_experience(amount);
                log::info!(
                    "{} gains {amount} XP ({} total, level {})",
                    character.name,
                    character.exp,
                    character.level
                );
            }
            Mutation::CreateCharacter { name, class } => {
                let (name, class) = (name.trim(), class.trim());
                if name.is_empty() || class.is_empty() {
                    log::debug!("Ignoring character creation with an empty name or class");
                    return None;
                }
                let id = roster.create(now_ms, name, class);
                log::info!("Created {name} the {class} ({id})");
            }
            Mutation::RemoveCharacter { id } => {
                let removed = roster.remove(*id)?;
                log::info!("Removed {} ({})", removed.name, removed.id);
            }
        }
        Some(PendingWrite {
            roster,
            version: self.version.clone(),
        })
    }
}

impl From<RosterFile> for Session {
    fn from(file: RosterFile) -> Self {
        Self::new(file.roster, file.version)
    }
}

// Only strictly positive whole numbers count as an award.
pub fn parse_award(amount: &str) -> Option<u64> {
    amount.trim().parse::<u64>().ok().filter(|&amount| amount > 0)
}

pub async fn load<S: RosterStore>(store: &S) -> Result<Session> {
    Ok(store.fetch_file().await?.into())
}

/// Outcome of an accepted write. The host already holds the change, so a
/// failed re-fetch is reported through `reload` rather than as a failed save.
#[derive(Debug)]
pub struct Saved {
    pub version: String,
    pub reload: Result<Session>,
}

/// Write a pending change, then re-fetch so the caller holds the host's state
/// rather than its own local edit. Only a rejected write is an `Err`.
pub async fn commit<S: RosterStore>(store: &S, pending: PendingWrite) -> Result<Saved> {
    let version = store.write_file(&pending.roster, &pending.version).await?;
    log::debug!("Write accepted as {version}, reloading");
    let reload = load(store).await;
    if let Err(e) = &reload {
        log::warn!("Write {version} stored but the reload failed: {e}");
    }
    Ok(Saved { version, reload })
}
