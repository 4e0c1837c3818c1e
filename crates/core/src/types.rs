use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Catalog identity of an artefact.
    ArtefactId
);
string_id!(
    /// Identity of a roster encounter or an event boss.
    EncounterId
);
string_id!(EventId);

/// Bonus categories an artefact can feed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTag {
    TapDamage,
    HpBonus,
    ExpBonus,
    CoinGain,
    AttackSpeed,
    LootBoost,
    CritChance,
    CritDamage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Presentation hint carried by content; the engine never reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    Left,
    Right,
}

/// Monotonic counters that feed threshold rewards and leaderboard submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    Stage,
    Kills,
    Quests,
    Playtime,
    Artefacts,
}

impl CounterKind {
    pub const ALL: [CounterKind; 5] = [
        CounterKind::Stage,
        CounterKind::Kills,
        CounterKind::Quests,
        CounterKind::Playtime,
        CounterKind::Artefacts,
    ];

    /// Counters re-checked and submitted after every normal-mode advance.
    pub const SUBMITTED: [CounterKind; 4] =
        [CounterKind::Stage, CounterKind::Kills, CounterKind::Quests, CounterKind::Playtime];

    /// Stable name used in persisted keys and leaderboard payloads.
    pub fn key(self) -> &'static str {
        match self {
            CounterKind::Stage => "stage",
            CounterKind::Kills => "kills",
            CounterKind::Quests => "quests",
            CounterKind::Playtime => "playtime",
            CounterKind::Artefacts => "artefacts",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Coins,
    Crystals,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Coins => f.write_str("coins"),
            Currency::Crystals => f.write_str("crystals"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleMode {
    /// No run has been established. Never observed once `Game::new` succeeds.
    #[default]
    Idle,
    Normal,
    EventActive {
        event: EventId,
        cursor: usize,
    },
    EventWon {
        event: EventId,
    },
}

impl BattleMode {
    pub fn is_event(&self) -> bool {
        matches!(self, BattleMode::EventActive { .. } | BattleMode::EventWon { .. })
    }
}

/// State-change notifications. Every mutating engine operation appends to the log;
/// presentation and persistence adapters consume them without the engine knowing who listens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    EncounterLoaded { encounter: EncounterId, max_hp: u64 },
    DamageDealt { amount: u64, crit: bool, remaining_hp: u64 },
    EncounterDefeated { encounter: EncounterId, in_event: bool },
    ArtefactDropped { artefact: ArtefactId },
    ArtefactAcquired { artefact: ArtefactId, level: u32 },
    ArtefactUpgraded { artefact: ArtefactId, level: u32 },
    BalancesChanged { coins: u64, crystals: u64, level: u32, exp: u64 },
    LevelUp { level: u32 },
    CounterChanged { counter: CounterKind, value: u64 },
    ThresholdGranted { counter: CounterKind, threshold: u64 },
    ScoreSubmitted { counter: CounterKind, value: u64 },
    EventStarted { event: EventId },
    EventAdvanced { event: EventId, cursor: usize },
    EventWon { event: EventId, bonus_crystals: u64 },
    EventAcknowledged { event: EventId },
    AutoBattleChanged { enabled: bool },
    TapUpgraded { level: u32 },
    ProgressReset,
}

/// Coins, crystals and exp actually credited by one reward application.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewardReceipt {
    pub coins: u64,
    pub crystals: u64,
    pub exp: u64,
    pub levels_gained: u32,
    pub artefacts: Vec<ArtefactId>,
    pub skipped: Vec<ArtefactId>,
}

impl RewardReceipt {
    pub fn merge(&mut self, other: RewardReceipt) {
        self.coins += other.coins;
        self.crystals += other.crystals;
        self.exp += other.exp;
        self.levels_gained += other.levels_gained;
        self.artefacts.extend(other.artefacts);
        self.skipped.extend(other.skipped);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefeatProgression {
    StageCleared { reward: RewardReceipt, next_stage: u64 },
    EventAdvanced { cursor: usize },
    EventWon { bonus_crystals: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefeatReport {
    pub encounter: EncounterId,
    pub dropped: Option<ArtefactId>,
    pub progression: DefeatProgression,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TapOutcome {
    pub damage: u64,
    pub crit: bool,
    pub defeat: Option<DefeatReport>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockReport {
    pub taps: u32,
    pub defeats: u32,
    pub auto_disabled: bool,
    pub playtime_minutes: u64,
}
