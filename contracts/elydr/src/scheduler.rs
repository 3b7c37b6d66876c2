//! Recurring evolution check.
//!
//! The host chain has no deferred calls, so the "self-rescheduling callback"
//! is a time-gated entry point: every run records the next slot in instance
//! storage and publishes [`events::CheckScheduled`] for the off-chain keeper.
//! A redelivered call for a slot that already ran fails with `CheckNotDue`.
//!
//! One call walks at most `Config::max_pets_per_check` ids from a stored
//! cursor so the ledger footprint of a call stays bounded. The slot stays due
//! until the cursor reaches `total_supply`; only then is the next one scheduled.

use soroban_sdk::{log, Env};

use crate::errors::ElydrError;
use crate::events;
use crate::evolution;
use crate::storage;
use crate::types::{CheckSummary, Config, Evolution};

/// Why a pet was left out of a check.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SkipReason {
    Released = 1,
    Unlinked = 2,
    UnregisteredSource = 3,
    Failed = 4,
}

enum Outcome {
    Updated,
    Skipped(SkipReason),
}

pub fn schedule_next_check(e: &Env, config: &Config) -> u64 {
    let next_check_at = e
        .ledger()
        .timestamp()
        .saturating_add(config.check_interval);
    storage::write_next_check_at(e, next_check_at);
    events::CheckScheduled { next_check_at }.publish(e);
    next_check_at
}

pub fn run_check(e: &Env) -> Result<CheckSummary, ElydrError> {
    let now = e.ledger().timestamp();
    if now < storage::next_check_at(e) {
        return Err(ElydrError::CheckNotDue);
    }
    let config = storage::read_config(e).ok_or(ElydrError::UnsetMetadata)?;

    let total_supply = storage::total_supply(e);
    let first = storage::check_cursor(e).saturating_add(1);
    let last = first
        .saturating_add(u64::from(config.max_pets_per_check).saturating_sub(1))
        .min(total_supply);
    log!(e, "evolution check at {} over pets {}..={} of {}", now, first, last, total_supply);

    let mut updated: u32 = 0;
    let mut skipped: u32 = 0;
    for pet_id in first..=last {
        match check_pet(e, &config, pet_id, now) {
            Ok(Outcome::Updated) => updated = updated.saturating_add(1),
            Ok(Outcome::Skipped(reason)) => {
                log!(e, "pet {} skipped: {}", pet_id, reason as u32);
                skipped = skipped.saturating_add(1);
                if reason != SkipReason::Released {
                    events::PetSkipped {
                        pet_id,
                        reason: reason as u32,
                    }
                    .publish(e);
                }
            }
            Err(err) => {
                log!(e, "pet {} check failed: {}", pet_id, err as u32);
                skipped = skipped.saturating_add(1);
                events::PetSkipped {
                    pet_id,
                    reason: SkipReason::Failed as u32,
                }
                .publish(e);
            }
        }
    }

    let processed_through = last;
    let complete = processed_through >= total_supply;
    events::CheckCompleted {
        updated,
        skipped,
        processed_through,
        complete,
    }
    .publish(e);

    let next_check_at = if complete {
        storage::write_check_cursor(e, 0);
        schedule_next_check(e, &config)
    } else {
        storage::write_check_cursor(e, processed_through);
        storage::next_check_at(e)
    };

    Ok(CheckSummary {
        updated,
        skipped,
        processed_through,
        complete,
        next_check_at,
    })
}

fn check_pet(e: &Env, config: &Config, pet_id: u64, now: u64) -> Result<Outcome, ElydrError> {
    let Some(pet) = storage::read_pet(e, pet_id) else {
        return Ok(Outcome::Skipped(SkipReason::Released));
    };
    let Some(source_id) = pet.linked_yield_source.clone() else {
        return Ok(Outcome::Skipped(SkipReason::Unlinked));
    };
    let Some(source) = storage::read_yield_source(e, &source_id) else {
        return Ok(Outcome::Skipped(SkipReason::UnregisteredSource));
    };

    let (next, evolution) = evolution::evolve(&pet, source.apy, now)?;
    storage::write_pet(e, &next);
    if config.record_history {
        storage::push_history(e, &evolution);
    }
    publish_evolution(e, &evolution, next.total_growth_points);
    if pet.path != next.path {
        events::PathResolved {
            pet_id,
            path: next.path,
        }
        .publish(e);
    }

    Ok(Outcome::Updated)
}

fn publish_evolution(e: &Env, evolution: &Evolution, total_growth_points: u64) {
    let message = events::evolution_message(e, evolution);
    log!(e, "{}", message);
    if evolution.evolved {
        events::PetEvolved {
            pet_id: evolution.pet_id,
            previous_stage: evolution.previous_stage,
            new_stage: evolution.new_stage,
            points_awarded: evolution.points_awarded,
            apy: evolution.apy,
            message,
        }
        .publish(e);
    } else {
        events::GrowthGained {
            pet_id: evolution.pet_id,
            points_awarded: evolution.points_awarded,
            apy: evolution.apy,
            total_growth_points,
            message,
        }
        .publish(e);
    }
}
