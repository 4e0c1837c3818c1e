pub mod achievements;
pub mod bonus;
pub mod config;
pub mod content;
pub mod error;
pub mod game;
pub mod inventory;
pub mod journal;
pub mod journal_file;
pub mod ledger;
pub mod replay;
pub mod reward;
pub mod store;
pub mod types;

pub use achievements::{AchievementService, GrantedSet};
pub use bonus::Bonuses;
pub use config::EngineConfig;
pub use content::ContentPack;
pub use error::{EngineError, LedgerError, UpgradeError};
pub use game::{BattleView, Counters, Game, Progress};
pub use inventory::ArtefactInventory;
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use ledger::Ledger;
pub use replay::*;
pub use reward::{Reward, RewardResolver};
pub use store::{KeyValueStore, MemoryStore};
pub use types::*;
