pub mod app;
pub mod character;
pub mod context;
pub mod credential;
pub mod error;
pub mod logging;
pub mod message;
pub mod progression;
pub mod repository;
pub mod session;
pub mod settings;
pub mod tui;
pub mod ui;
pub mod view;

// Re-export commonly used items for easier access
pub use character::{Character, CharacterId, Roster};
pub use credential::CredentialStore;
pub use error::{LedgerError, Result};
pub use progression::{XP_TABLE, level_for, next_threshold, progress_percent};
pub use repository::{RepositoryClient, RosterFile, RosterStore};
pub use session::{Mutation, PendingWrite, Saved, Session};
pub use settings::{RepositoryConfig, Settings};
