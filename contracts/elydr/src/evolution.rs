//! Evolution state transition.
//!
//! Everything here is pure: the authoritative check in `scheduler` and the
//! read-only preview entry point both go through [`evolve`], and only the
//! former persists what it returns.

use crate::errors::ElydrError;
use crate::types::{Evolution, Path, Pet, Stage};

/// `(min_apy, max_apy, points)`, half-open on the right, evaluated in order.
pub const APY_GROWTH_BANDS: [(u32, u32, u32); 5] = [
    (0, 2, 1),
    (2, 5, 2),
    (5, 8, 3),
    (8, 12, 4),
    (12, 100, 5),
];

/// Awarded when no band matches.
pub const DEFAULT_GROWTH_POINTS: u32 = 1;

/// Number of checks after which the path is decided.
pub const CHECKS_BEFORE_PATH: u64 = 10;

/// Twice the minimum average points per check for the mythic path (3.5).
pub const MYTHIC_AVG_POINTS_X2: u64 = 7;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StatBoosts {
    pub power: u32,
    pub defense: u32,
    pub agility: u32,
}

impl StatBoosts {
    fn apply(self, pet: &mut Pet) -> Result<(), ElydrError> {
        pet.power = pet
            .power
            .checked_add(self.power)
            .ok_or(ElydrError::MathOverflow)?;
        pet.defense = pet
            .defense
            .checked_add(self.defense)
            .ok_or(ElydrError::MathOverflow)?;
        pet.agility = pet
            .agility
            .checked_add(self.agility)
            .ok_or(ElydrError::MathOverflow)?;
        Ok(())
    }
}

pub fn growth_points(apy: u32) -> u32 {
    APY_GROWTH_BANDS
        .iter()
        .find(|(min, max, _)| apy >= *min && apy < *max)
        .map(|(_, _, points)| *points)
        .unwrap_or(DEFAULT_GROWTH_POINTS)
}

/// Highest stage above `current` whose threshold is met, or `current`.
pub fn next_stage(current: Stage, total_points: u64) -> Stage {
    Stage::ALL
        .iter()
        .rev()
        .take_while(|stage| **stage > current)
        .find(|stage| total_points >= stage.threshold())
        .copied()
        .unwrap_or(current)
}

pub fn resolve_path(current: Path, check_count: u64, total_points: u64) -> Path {
    if current != Path::Undetermined || check_count < CHECKS_BEFORE_PATH {
        return current;
    }

    // Integer average, so 3.9 points per check still resolves to common.
    let avg_points = total_points / check_count;
    if avg_points.saturating_mul(2) >= MYTHIC_AVG_POINTS_X2 {
        Path::Mythic
    } else {
        Path::Common
    }
}

pub fn stat_boosts(evolved: bool, points_awarded: u32) -> StatBoosts {
    if evolved {
        return StatBoosts {
            power: 5,
            defense: 4,
            agility: 3,
        };
    }

    StatBoosts {
        power: if points_awarded > 3 { 2 } else { 1 },
        defense: if points_awarded > 2 { 1 } else { 0 },
        agility: 1,
    }
}

/// Applies one evolution check to `pet` at the observed `apy`.
///
/// Returns the updated pet and the event describing the change; the input is
/// left untouched.
pub fn evolve(pet: &Pet, apy: u32, now: u64) -> Result<(Pet, Evolution), ElydrError> {
    let points_awarded = growth_points(apy);
    let total_points = pet
        .total_growth_points
        .checked_add(points_awarded as u64)
        .ok_or(ElydrError::MathOverflow)?;
    let check_count = pet
        .check_count
        .checked_add(1)
        .ok_or(ElydrError::MathOverflow)?;

    let new_stage = next_stage(pet.stage, total_points);
    let evolved = new_stage != pet.stage;
    let path = resolve_path(pet.path, check_count, total_points);

    let mut next = pet.clone();
    stat_boosts(evolved, points_awarded).apply(&mut next)?;
    if evolved {
        next.level = next.level.checked_add(1).ok_or(ElydrError::MathOverflow)?;
    }
    next.stage = new_stage;
    next.path = path;
    next.growth_points = total_points
        .checked_sub(new_stage.threshold())
        .ok_or(ElydrError::MathOverflow)?;
    next.total_growth_points = total_points;
    next.check_count = check_count;
    next.last_check_time = now;

    let evolution = Evolution {
        pet_id: pet.id,
        timestamp: now,
        apy,
        points_awarded,
        previous_stage: pet.stage,
        new_stage,
        path,
        evolved,
    };

    Ok((next, evolution))
}
