use core::fmt;

use soroban_sdk::{contracttype, Address, String};

/// Pet life-cycle phase. Ordered; a pet never moves backwards.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Stage {
    Egg = 0,
    Hatchling = 1,
    Young = 2,
    Mature = 3,
    Elder = 4,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Egg,
        Stage::Hatchling,
        Stage::Young,
        Stage::Mature,
        Stage::Elder,
    ];

    /// Cumulative growth points required to reach this stage.
    pub const fn threshold(self) -> u64 {
        match self {
            Stage::Egg => 0,
            Stage::Hatchling => 10,
            Stage::Young => 30,
            Stage::Mature => 70,
            Stage::Elder => 150,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Stage::Egg => "egg",
            Stage::Hatchling => "hatchling",
            Stage::Young => "young",
            Stage::Mature => "mature",
            Stage::Elder => "elder",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lineage fixed once enough checks have been applied.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Path {
    Undetermined = 0,
    Common = 1,
    Mythic = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pet {
    pub id: u64,
    pub owner: Address,
    pub stage: Stage,
    pub path: Path,
    pub level: u32,
    /// Points accumulated since entering the current stage.
    pub growth_points: u64,
    pub total_growth_points: u64,
    pub linked_yield_source: Option<String>,
    pub power: u32,
    pub defense: u32,
    pub agility: u32,
    pub check_count: u64,
    /// Native token held in custody for this pet.
    pub staked_amount: i128,
    pub minted_at: u64,
    pub last_check_time: u64,
}

impl Pet {
    pub const BASE_STAT: u32 = 5;

    pub fn hatch(id: u64, owner: Address, now: u64) -> Self {
        Pet {
            id,
            owner,
            stage: Stage::Egg,
            path: Path::Undetermined,
            level: 1,
            growth_points: 0,
            total_growth_points: 0,
            linked_yield_source: None,
            power: Self::BASE_STAT,
            defense: Self::BASE_STAT,
            agility: Self::BASE_STAT,
            check_count: 0,
            staked_amount: 0,
            minted_at: now,
            last_check_time: now,
        }
    }
}

/// External rate reference a pet can be linked to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldSource {
    pub id: String,
    pub name: String,
    /// Integer percent, 0..=100.
    pub apy: u32,
    pub updated_at: u64,
}

/// One applied evolution check.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Evolution {
    pub pet_id: u64,
    pub timestamp: u64,
    pub apy: u32,
    pub points_awarded: u32,
    pub previous_stage: Stage,
    pub new_stage: Stage,
    pub path: Path,
    pub evolved: bool,
}

/// Result of running the engine without persisting anything.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvolutionPreview {
    pub pet: Pet,
    pub evolution: Evolution,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token contract used for mint fees and staking.
    pub payment_token: Address,
    pub mint_price: i128,
    /// Seconds between two scheduled evolution checks.
    pub check_interval: u64,
    /// Pet ids walked by a single `run_evolution_check` call.
    pub max_pets_per_check: u32,
    /// Keep the last evolutions of each pet on-chain.
    pub record_history: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckSummary {
    pub updated: u32,
    pub skipped: u32,
    /// Last pet id visited by this call.
    pub processed_through: u64,
    /// The pass reached `total_supply` and the next one was scheduled.
    pub complete: bool,
    pub next_check_at: u64,
}
