// tests/session.rs
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use tavern_ledger::{
    Character, LedgerError, Mutation, Result, Roster, RosterFile, RosterStore, Session, session,
};

// In-memory stand-in for the repository host, with the same conditional-write rule.
struct MemoryStore {
    file: Mutex<RosterFile>,
    revisions: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    fn new(roster: Roster) -> Self {
        Self {
            file: Mutex::new(RosterFile {
                roster,
                version: "v0".to_string(),
            }),
            revisions: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn stored(&self) -> RosterFile {
        self.file.lock().unwrap().clone()
    }
}

impl RosterStore for MemoryStore {
    async fn fetch_file(&self) -> Result<RosterFile> {
        Ok(self.stored())
    }

    async fn write_file(&self, roster: &Roster, version: &str) -> Result<String> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut file = self.file.lock().unwrap();
        if file.version != version {
            return Err(LedgerError::StaleVersion(version.to_string()));
        }
        let revision = self.revisions.fetch_add(1, Ordering::SeqCst) + 1;
        file.roster = roster.clone();
        file.version = format!("v{revision}");
        Ok(file.version.clone())
    }
}

// Accepts writes, but every fetch after the first one fails.
struct FlakyStore {
    inner: MemoryStore,
    fetches: AtomicUsize,
}

impl RosterStore for FlakyStore {
    async fn fetch_file(&self) -> Result<RosterFile> {
        if self.fetches.fetch_add(1, Ordering::SeqCst) > 0 {
            return Err(LedgerError::Http {
                status: 502,
                message: "Bad gateway".to_string(),
            });
        }
        self.inner.fetch_file().await
    }

    async fn write_file(&self, roster: &Roster, version: &str) -> Result<String> {
        self.inner.write_file(roster, version).await
    }
}

fn party() -> Roster {
    Roster::new(vec![
        Character {
            id: 1,
            name: "Thorin".to_string(),
            class: "Fighter".to_string(),
            exp: 250,
            level: 1,
        },
        Character {
            id: 2,
            name: "Elowen".to_string(),
            class: "Wizard".to_string(),
            exp: 900,
            level: 3,
        },
    ])
}

fn award(id: i64, amount: &str) -> Mutation {
    Mutation::AwardExperience {
        id,
        amount: amount.to_string(),
    }
}

#[test]
fn test_award_recomputes_level() {
    let session = Session::new(party(), "v0");
    let pending = session.prepare(&award(1, "50"), 0).expect("valid award");
    let thorin = pending.roster.get(1).unwrap();
    assert_eq!(thorin.exp, 300);
    assert_eq!(thorin.level, 2);
    assert_eq!(pending.version, "v0");
    // The session itself is untouched until the write comes back.
    assert_eq!(session.roster().get(1).unwrap().exp, 250);
}

#[test]
fn test_award_overwrites_a_wrong_stored_level() {
    let mut roster = party();
    roster.get_mut(2).unwrap().level = 17;
    let session = Session::new(roster, "v0");
    let pending = session.prepare(&award(2, "1"), 0).unwrap();
    assert_eq!(pending.roster.get(2).unwrap().level, 3);
}

#[test]
fn test_malformed_awards_are_ignored() {
    let session = Session::new(party(), "v0");
    for amount in ["", "   ", "abc", "0", "-20", "12.5", "ten"] {
        assert!(
            session.prepare(&award(1, amount), 0).is_none(),
            "{amount:?} should be ignored"
        );
    }
    assert!(session.prepare(&award(1, " 40 "), 0).is_some());
    assert!(session.prepare(&award(99, "40"), 0).is_none());
}

#[test]
fn test_create_requires_name_and_class() {
    let session = Session::new(party(), "v0");
    let create = |name: &str, class: &str| Mutation::CreateCharacter {
        name: name.to_string(),
        class: class.to_string(),
    };
    assert!(session.prepare(&create("", "Rogue"), 10).is_none());
    assert!(session.prepare(&create("Pip", "  "), 10).is_none());

    let pending = session.prepare(&create(" Pip ", "Rogue"), 1_700_000_000_000).unwrap();
    let pip = pending.roster.characters().last().unwrap();
    assert_eq!(pip.id, 1_700_000_000_000);
    assert_eq!(pip.name, "Pip");
    assert_eq!(pip.class, "Rogue");
    assert_eq!((pip.exp, pip.level), (0, 1));
    assert_eq!(pending.roster.len(), 3);
}

#[test]
fn test_create_keeps_ids_unique() {
    let mut roster = party();
    let id = roster.create(2, "Pip", "Rogue");
    assert_eq!(id, 3);
    let id = roster.create(2, "Bree", "Bard");
    assert_eq!(id, 4);
}

#[test]
fn test_remove_by_id() {
    let session = Session::new(party(), "v0");
    let pending = session
        .prepare(&Mutation::RemoveCharacter { id: 1 }, 0)
        .unwrap();
    assert_eq!(pending.roster.len(), 1);
    assert!(pending.roster.get(1).is_none());
    assert!(
        session
            .prepare(&Mutation::RemoveCharacter { id: 42 }, 0)
            .is_none()
    );
}

#[tokio::test]
async fn test_commit_writes_and_reloads() {
    let store = MemoryStore::new(party());
    let session = session::load(&store).await.unwrap();
    assert_eq!(session.version(), "v0");

    let pending = session.prepare(&award(1, "100"), 0).unwrap();
    let saved = session::commit(&store, pending).await.unwrap();
    assert_eq!(saved.version, "v1");
    let refreshed = saved.reload.unwrap();

    assert_eq!(refreshed.version(), "v1");
    assert_eq!(refreshed.roster().get(1).unwrap().exp, 350);
    assert_eq!(refreshed.roster(), &store.stored().roster);
}

#[tokio::test]
async fn test_ignored_award_performs_no_write() {
    let store = MemoryStore::new(party());
    let session = session::load(&store).await.unwrap();
    assert!(session.prepare(&award(1, "lots"), 0).is_none());
    assert_eq!(store.writes(), 0);
    assert_eq!(store.stored().roster, party());
}

#[tokio::test]
async fn test_stale_version_is_rejected() {
    let store = MemoryStore::new(party());
    let session = session::load(&store).await.unwrap();

    // Two awards prepared from the same read: the second one is stale.
    let first = session.prepare(&award(1, "10"), 0).unwrap();
    let second = session.prepare(&award(2, "10"), 0).unwrap();
    session::commit(&store, first).await.unwrap();

    let err = session::commit(&store, second).await.unwrap_err();
    assert!(err.is_stale_version());
    assert_eq!(store.stored().roster.get(2).unwrap().exp, 900);
    // The original session is unchanged.
    assert_eq!(session.roster().get(2).unwrap().exp, 900);
}

#[tokio::test]
async fn test_accepted_write_survives_failed_reload() {
    let store = FlakyStore {
        inner: MemoryStore::new(party()),
        fetches: AtomicUsize::new(0),
    };
    let session = session::load(&store).await.unwrap();
    let pending = session.prepare(&award(1, "50"), 0).unwrap();

    let saved = session::commit(&store, pending).await.unwrap();
    assert_eq!(saved.version, "v1");
    assert!(matches!(
        saved.reload,
        Err(LedgerError::Http { status: 502, .. })
    ));
    let stored = store.inner.stored();
    assert_eq!(stored.version, "v1");
    assert_eq!(stored.roster.get(1).unwrap().exp, 300);
}
