#![no_std]

use soroban_sdk::{contract, contractmeta, Address, Env, String, Vec};

contractmeta!(key = "Description", val = "Elydr yield-driven evolving pets");

mod contract;
mod events;
mod scheduler;
mod storage;

pub mod errors;
pub mod evolution;
pub mod types;


pub use errors::ElydrError;
pub use types::{CheckSummary, Config, Evolution, EvolutionPreview, Path, Pet, Stage, YieldSource};

#[contract]
pub struct Elydr;

pub trait ElydrPetContract {

    fn __constructor(e: &Env, admin: Address, config: Config, name: String, symbol: String);

    /// Mint a new pet to `to`.
    ///
    /// The payment is moved from `to` into contract custody. The new pet
    /// starts as an egg at level 1 with 5/5/5 stats and no linked yield source.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `to` - Account paying for and receiving the pet.
    /// * `payment` - Amount of the payment token offered, at least the mint price.
    ///
    /// # Returns
    ///
    /// The sequential id of the new pet.
    ///
    /// # Events
    ///
    /// * topics - `["mint", to: Address]`
    /// * data - `[pet_id: u64]`
    fn mint(e: &Env, to: Address, payment: i128) -> Result<u64, ElydrError>;

    /// Transfers `pet_id` from `from` to `to`.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `from` - Current owner of the pet.
    /// * `to` - Account of the recipient.
    /// * `pet_id` - Pet id as a number.
    ///
    /// # Events
    ///
    /// * topics - `["transfer", from: Address, to: Address]`
    /// * data - `[pet_id: u64]`
    fn transfer(e: &Env, from: Address, to: Address, pet_id: u64) -> Result<(), ElydrError>;

    /// Links `pet_id` to a yield source and restarts its check clock.
    ///
    /// The source does not need to be registered yet; unregistered sources are
    /// skipped by the evolution check until they are.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `owner` - Owner of the pet.
    /// * `pet_id` - Pet id as a number.
    /// * `source_id` - Identifier of the yield source.
    fn link_yield_source(
        e: &Env,
        owner: Address,
        pet_id: u64,
        source_id: String,
    ) -> Result<(), ElydrError>;

    /// Moves `amount` of the payment token from `owner` into the pet's custody.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `owner` - Owner of the pet, must sign.
    /// * `pet_id` - Pet id as a number.
    /// * `amount` - Strictly positive amount of the payment token.
    fn stake(e: &Env, owner: Address, pet_id: u64, amount: i128) -> Result<(), ElydrError>;

    /// Returns `percentage` (1 to 100) of the pet's stake to `owner`.
    ///
    /// # Returns
    ///
    /// The amount sent back, rounded down.
    fn unstake(e: &Env, owner: Address, pet_id: u64, percentage: u32) -> Result<i128, ElydrError>;

    /// Releases the pet: its stake goes back to `owner` and the record is deleted.
    ///
    /// # Returns
    ///
    /// The amount sent back.
    fn release(e: &Env, owner: Address, pet_id: u64) -> Result<i128, ElydrError>;

    /// Applies the due evolution check to the next window of pets.
    ///
    /// Anyone may call this once the scheduled time is reached. Each call walks
    /// at most `max_pets_per_check` ids from where the previous call stopped;
    /// the slot stays due until the whole supply has been walked, then the
    /// next check is scheduled. Pets that were released, have no linked
    /// source, or link an unregistered source are skipped; a failing pet is
    /// skipped without aborting the rest.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    ///
    /// # Returns
    ///
    /// Counts of updated and skipped pets, the last id visited, whether the
    /// pass completed, and the next scheduled time.
    ///
    /// # Events
    ///
    /// * `pet_evolved` or `growth_gained` per updated pet, with a readable message
    /// * `check_completed` once per call
    /// * `check_scheduled` when the pass completes
    ///
    /// # Notes
    ///
    /// Fails with `CheckNotDue` before [`ElydrPetContract::next_check_at`].
    fn run_evolution_check(e: &Env) -> Result<CheckSummary, ElydrError>;

    /// Computes what the next evolution check would do to `pet_id` without
    /// persisting anything.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `pet_id` - Pet id as a number.
    /// * `apy` - APY to simulate with; `None` reads the linked source.
    fn preview_evolution(
        e: &Env,
        pet_id: u64,
        apy: Option<u32>,
    ) -> Result<EvolutionPreview, ElydrError>;

    /// Registers a new yield source. Admin only.
    fn register_yield_source(
        e: &Env,
        source_id: String,
        name: String,
        apy: u32,
    ) -> Result<(), ElydrError>;

    /// Updates the APY of a registered yield source. Admin only.
    fn update_yield_source_apy(e: &Env, source_id: String, apy: u32) -> Result<(), ElydrError>;

    /// Updates the given configuration fields. Admin only.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `new_mint_price` - Non-negative mint price.
    /// * `new_check_interval` - Seconds between checks, non-zero.
    /// * `new_max_pets_per_check` - Window size of one check call, non-zero.
    /// * `new_record_history` - Whether checks append to the on-chain history.
    fn update_config(
        e: &Env,
        new_mint_price: Option<i128>,
        new_check_interval: Option<u64>,
        new_max_pets_per_check: Option<u32>,
        new_record_history: Option<bool>,
    ) -> Result<(), ElydrError>;

    /// Returns the pet record.
    ///
    /// # Notes
    ///
    /// Fails with `NonExistentToken` if the pet does not exist.
    fn get_pet(e: &Env, pet_id: u64) -> Result<Pet, ElydrError>;

    /// Returns whether `pet_id` is a live pet.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `pet_id` - Pet id as a number.
    ///
    /// # Returns
    ///
    /// `false` for ids never minted and for released pets.
    fn pet_exists(e: &Env, pet_id: u64) -> bool;

    /// Returns the address of the owner of the given `pet_id`.
    ///
    /// # Notes
    ///
    /// Fails with `NonExistentToken` if the pet does not exist.
    fn owner_of(e: &Env, pet_id: u64) -> Result<Address, ElydrError>;

    /// Returns the number of pets in `owner`'s account.
    fn balance(e: &Env, owner: Address) -> u32;

    /// Returns the highest pet id minted so far.
    fn total_supply(e: &Env) -> u64;

    /// Returns a registered yield source.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `source_id` - Identifier of the yield source.
    ///
    /// # Notes
    ///
    /// Fails with `YieldSourceNotFound` if the source was never registered.
    fn get_yield_source(e: &Env, source_id: String) -> Result<YieldSource, ElydrError>;

    /// Returns the most recent evolutions of `pet_id`, newest first.
    fn history(e: &Env, pet_id: u64) -> Vec<Evolution>;

    /// Returns the current configuration.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    fn config(e: &Env) -> Result<Config, ElydrError>;

    /// Returns the ledger timestamp from which the next check may run.
    fn next_check_at(e: &Env) -> u64;

    /// Returns the token collection name.
    fn name(e: &Env) -> Result<String, ElydrError>;

    /// Returns the token collection symbol.
    fn symbol(e: &Env) -> Result<String, ElydrError>;
}
