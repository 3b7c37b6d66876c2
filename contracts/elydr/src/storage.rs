//! Pet and yield source registries on top of contract storage.

use soroban_sdk::{contracttype, Address, Env, IntoVal, String, Val, Vec};

use crate::errors::ElydrError;
use crate::types::{Config, Evolution, Pet, YieldSource};

/// Persistent storage TTL (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;
/// Extend once the remaining TTL drops below this (~1 day).
pub const PERSISTENT_THRESHOLD_LEDGERS: u32 = 17_280;

/// Most recent evolutions kept per pet.
pub const HISTORY_LIMIT: u32 = 20;

#[contracttype]
pub enum DataKey {
    Admin,
    Config,
    TotalSupply,
    NextCheckAt,
    CheckCursor,
    Name,
    Symbol,
}

#[contracttype]
pub enum PetStorageKey {
    Pet(u64),
    Owner(u64),
    Balance(Address),
    History(u64),
    YieldSource(String),
}

fn persist_set<V: IntoVal<Env, Val>>(e: &Env, key: &PetStorageKey, val: &V) {
    e.storage().persistent().set(key, val);
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_THRESHOLD_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(PERSISTENT_THRESHOLD_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

pub fn read_admin(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Admin)
}

pub fn read_config(e: &Env) -> Option<Config> {
    e.storage().instance().get(&DataKey::Config)
}

pub fn write_config(e: &Env, config: &Config) {
    e.storage().instance().set(&DataKey::Config, config);
}

/// Highest pet id ever minted. Released ids are not reused.
pub fn total_supply(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn next_pet_id(e: &Env) -> Result<u64, ElydrError> {
    let id = total_supply(e)
        .checked_add(1)
        .ok_or(ElydrError::MathOverflow)?;
    e.storage().instance().set(&DataKey::TotalSupply, &id);
    Ok(id)
}

pub fn next_check_at(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::NextCheckAt)
        .unwrap_or(0)
}

pub fn write_next_check_at(e: &Env, at: u64) {
    e.storage().instance().set(&DataKey::NextCheckAt, &at);
}

/// Last pet id visited by the running pass, 0 between passes.
pub fn check_cursor(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::CheckCursor)
        .unwrap_or(0)
}

pub fn write_check_cursor(e: &Env, pet_id: u64) {
    e.storage().instance().set(&DataKey::CheckCursor, &pet_id);
}

pub fn read_pet(e: &Env, pet_id: u64) -> Option<Pet> {
    e.storage().persistent().get(&PetStorageKey::Pet(pet_id))
}

pub fn has_pet(e: &Env, pet_id: u64) -> bool {
    e.storage().persistent().has(&PetStorageKey::Pet(pet_id))
}

pub fn write_pet(e: &Env, pet: &Pet) {
    persist_set(e, &PetStorageKey::Pet(pet.id), pet);
}

/// Owner index entry; only mint and transfer change it.
pub fn write_owner(e: &Env, pet_id: u64, owner: &Address) {
    persist_set(e, &PetStorageKey::Owner(pet_id), owner);
}

pub fn remove_pet(e: &Env, pet_id: u64) {
    let storage = e.storage().persistent();
    storage.remove(&PetStorageKey::Pet(pet_id));
    storage.remove(&PetStorageKey::Owner(pet_id));
    storage.remove(&PetStorageKey::History(pet_id));
}

pub fn read_owner(e: &Env, pet_id: u64) -> Option<Address> {
    e.storage().persistent().get(&PetStorageKey::Owner(pet_id))
}

pub fn balance(e: &Env, owner: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&PetStorageKey::Balance(owner.clone()))
        .unwrap_or(0)
}

pub fn increment_balance(e: &Env, owner: &Address) -> Result<(), ElydrError> {
    let count = balance(e, owner)
        .checked_add(1)
        .ok_or(ElydrError::MathOverflow)?;
    persist_set(e, &PetStorageKey::Balance(owner.clone()), &count);
    Ok(())
}

pub fn decrement_balance(e: &Env, owner: &Address) -> Result<(), ElydrError> {
    let count = balance(e, owner)
        .checked_sub(1)
        .ok_or(ElydrError::MathOverflow)?;
    let key = PetStorageKey::Balance(owner.clone());
    if count == 0 {
        e.storage().persistent().remove(&key);
    } else {
        persist_set(e, &key, &count);
    }
    Ok(())
}

pub fn read_yield_source(e: &Env, source_id: &String) -> Option<YieldSource> {
    e.storage()
        .persistent()
        .get(&PetStorageKey::YieldSource(source_id.clone()))
}

pub fn write_yield_source(e: &Env, source: &YieldSource) {
    persist_set(e, &PetStorageKey::YieldSource(source.id.clone()), source);
}

/// Newest first, at most [`HISTORY_LIMIT`] entries.
pub fn read_history(e: &Env, pet_id: u64) -> Vec<Evolution> {
    e.storage()
        .persistent()
        .get(&PetStorageKey::History(pet_id))
        .unwrap_or_else(|| Vec::new(e))
}

pub fn push_history(e: &Env, evolution: &Evolution) {
    let mut history = read_history(e, evolution.pet_id);
    history.push_front(evolution.clone());
    while history.len() > HISTORY_LIMIT {
        history.pop_back();
    }
    persist_set(e, &PetStorageKey::History(evolution.pet_id), &history);
}
