use core::fmt::{self, Write};

use soroban_sdk::{Address, Env, String, contractevent};

use crate::types::{Evolution, Path, Stage};

const MESSAGE_CAPACITY: usize = 128;

/// Fixed-size sink for `core::fmt`; overflowing writes are cut off.
struct MessageBuf {
    bytes: [u8; MESSAGE_CAPACITY],
    len: usize,
}

impl Write for MessageBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self
            .len
            .checked_add(s.len())
            .filter(|end| *end <= MESSAGE_CAPACITY)
            .ok_or(fmt::Error)?;
        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Human-readable summary of one applied check, carried by the evolution events.
pub fn evolution_message(e: &Env, evolution: &Evolution) -> String {
    let mut buf = MessageBuf {
        bytes: [0; MESSAGE_CAPACITY],
        len: 0,
    };
    let written = if evolution.evolved {
        write!(
            buf,
            "Pet #{} evolved from {} to {}! +{} growth points",
            evolution.pet_id, evolution.previous_stage, evolution.new_stage, evolution.points_awarded
        )
    } else {
        write!(
            buf,
            "Pet #{} gained {} growth points from {}% APY",
            evolution.pet_id, evolution.points_awarded, evolution.apy
        )
    };
    if written.is_err() {
        return String::from_str(e, "");
    }
    String::from_bytes(e, &buf.bytes[..buf.len])
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mint {
    #[topic]
    pub to: Address,
    pub pet_id: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub pet_id: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldSourceLinked {
    #[topic]
    pub pet_id: u64,
    pub source_id: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Staked {
    #[topic]
    pub pet_id: u64,
    pub amount: i128,
    pub staked_amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unstaked {
    #[topic]
    pub pet_id: u64,
    pub amount: i128,
    pub staked_amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Released {
    #[topic]
    pub owner: Address,
    pub pet_id: u64,
    pub returned: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldSourceRegistered {
    #[topic]
    pub source_id: String,
    pub name: String,
    pub apy: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldSourceApyUpdated {
    #[topic]
    pub source_id: String,
    pub apy: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PetEvolved {
    #[topic]
    pub pet_id: u64,
    pub previous_stage: Stage,
    pub new_stage: Stage,
    pub points_awarded: u32,
    pub apy: u32,
    pub message: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrowthGained {
    #[topic]
    pub pet_id: u64,
    pub points_awarded: u32,
    pub apy: u32,
    pub total_growth_points: u64,
    pub message: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathResolved {
    #[topic]
    pub pet_id: u64,
    pub path: Path,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PetSkipped {
    #[topic]
    pub pet_id: u64,
    pub reason: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckCompleted {
    pub updated: u32,
    pub skipped: u32,
    pub processed_through: u64,
    pub complete: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckScheduled {
    pub next_check_at: u64,
}
