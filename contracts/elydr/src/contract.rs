//! Pet registry, custody and evolution entry points

use soroban_sdk::{contractimpl, log, panic_with_error, token, Address, Env, String, Vec};
use crate::errors::ElydrError;
use crate::storage::{self, DataKey};
use crate::types::{CheckSummary, Config, Evolution, EvolutionPreview, Pet, YieldSource};
use crate::{events, evolution, scheduler, Elydr, ElydrArgs, ElydrClient, ElydrPetContract};

fn load_config(e: &Env) -> Result<Config, ElydrError> {
    storage::read_config(e).ok_or(ElydrError::UnsetMetadata)
}

fn require_admin(e: &Env) -> Result<Address, ElydrError> {
    let admin = storage::read_admin(e).ok_or(ElydrError::Unauthorized)?;
    admin.require_auth();
    Ok(admin)
}

fn validate_config(config: &Config) -> Result<(), ElydrError> {
    if config.mint_price < 0 || config.check_interval == 0 || config.max_pets_per_check == 0 {
        return Err(ElydrError::InvalidConfig);
    }
    Ok(())
}

fn validate_apy(apy: u32) -> Result<(), ElydrError> {
    if apy > 100 {
        return Err(ElydrError::InvalidApy);
    }
    Ok(())
}

fn load_pet(e: &Env, pet_id: u64) -> Result<Pet, ElydrError> {
    storage::read_pet(e, pet_id).ok_or(ElydrError::NonExistentToken)
}

/// Loads `pet_id` after checking `owner` signed and owns it.
fn owned_pet(e: &Env, owner: &Address, pet_id: u64) -> Result<Pet, ElydrError> {
    owner.require_auth();
    let pet = load_pet(e, pet_id)?;
    if pet.owner != *owner {
        return Err(ElydrError::IncorrectOwner);
    }
    Ok(pet)
}

fn token_client<'a>(e: &'a Env) -> Result<token::TokenClient<'a>, ElydrError> {
    Ok(token::TokenClient::new(e, &load_config(e)?.payment_token))
}

fn read_metadata(e: &Env, key: &DataKey) -> Result<String, ElydrError> {
    e.storage()
        .instance()
        .get(key)
        .ok_or(ElydrError::UnsetMetadata)
}

#[contractimpl]
impl ElydrPetContract for Elydr {

    fn __constructor(e: &Env, admin: Address, config: Config, name: String, symbol: String) {
        if let Err(err) = validate_config(&config) {
            panic_with_error!(e, err);
        }

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Name, &name);
        e.storage().instance().set(&DataKey::Symbol, &symbol);
        storage::write_config(e, &config);

        scheduler::schedule_next_check(e, &config);
    }

    fn mint(e: &Env, to: Address, payment: i128) -> Result<u64, ElydrError> {
        to.require_auth();

        let config = load_config(e)?;
        if payment < config.mint_price {
            return Err(ElydrError::InsufficientPayment);
        }
        if payment > 0 {
            token_client(e)?.transfer(&to, &e.current_contract_address(), &payment);
        }

        let pet_id = storage::next_pet_id(e)?;
        let pet = Pet::hatch(pet_id, to.clone(), e.ledger().timestamp());
        storage::write_pet(e, &pet);
        storage::write_owner(e, pet_id, &to);
        storage::increment_balance(e, &to)?;
        storage::extend_instance(e);

        log!(e, "minted pet {} to {}", pet_id, to);
        events::Mint { to, pet_id }.publish(e);

        Ok(pet_id)
    }

    fn transfer(e: &Env, from: Address, to: Address, pet_id: u64) -> Result<(), ElydrError> {
        let mut pet = owned_pet(e, &from, pet_id)?;

        storage::decrement_balance(e, &from)?;
        storage::increment_balance(e, &to)?;
        pet.owner = to.clone();
        storage::write_pet(e, &pet);
        storage::write_owner(e, pet_id, &to);

        events::Transfer { from, to, pet_id }.publish(e);
        Ok(())
    }

    fn link_yield_source(
        e: &Env,
        owner: Address,
        pet_id: u64,
        source_id: String,
    ) -> Result<(), ElydrError> {
        let mut pet = owned_pet(e, &owner, pet_id)?;

        pet.linked_yield_source = Some(source_id.clone());
        pet.last_check_time = e.ledger().timestamp();
        storage::write_pet(e, &pet);

        events::YieldSourceLinked { pet_id, source_id }.publish(e);
        Ok(())
    }

    fn stake(e: &Env, owner: Address, pet_id: u64, amount: i128) -> Result<(), ElydrError> {
        let mut pet = owned_pet(e, &owner, pet_id)?;
        if amount <= 0 {
            return Err(ElydrError::InvalidAmount);
        }

        pet.staked_amount = pet
            .staked_amount
            .checked_add(amount)
            .ok_or(ElydrError::MathOverflow)?;
        token_client(e)?.transfer(&owner, &e.current_contract_address(), &amount);
        storage::write_pet(e, &pet);

        events::Staked {
            pet_id,
            amount,
            staked_amount: pet.staked_amount,
        }
        .publish(e);
        Ok(())
    }

    fn unstake(e: &Env, owner: Address, pet_id: u64, percentage: u32) -> Result<i128, ElydrError> {
        if percentage == 0 || percentage > 100 {
            return Err(ElydrError::InvalidPercentage);
        }
        let mut pet = owned_pet(e, &owner, pet_id)?;
        if pet.staked_amount <= 0 {
            return Err(ElydrError::NothingStaked);
        }

        let amount = pet
            .staked_amount
            .checked_mul(percentage as i128)
            .map(|scaled| scaled / 100)
            .ok_or(ElydrError::MathOverflow)?;
        pet.staked_amount -= amount;
        storage::write_pet(e, &pet);

        if amount > 0 {
            token_client(e)?.transfer(&e.current_contract_address(), &owner, &amount);
        }

        events::Unstaked {
            pet_id,
            amount,
            staked_amount: pet.staked_amount,
        }
        .publish(e);

        Ok(amount)
    }

    fn release(e: &Env, owner: Address, pet_id: u64) -> Result<i128, ElydrError> {
        let pet = owned_pet(e, &owner, pet_id)?;
        let returned = pet.staked_amount;

        storage::remove_pet(e, pet_id);
        storage::decrement_balance(e, &owner)?;

        if returned > 0 {
            token_client(e)?.transfer(&e.current_contract_address(), &owner, &returned);
        }

        log!(e, "released pet {}, returning {}", pet_id, returned);
        events::Released {
            owner,
            pet_id,
            returned,
        }
        .publish(e);

        Ok(returned)
    }

    fn run_evolution_check(e: &Env) -> Result<CheckSummary, ElydrError> {
        let summary = scheduler::run_check(e)?;
        storage::extend_instance(e);
        Ok(summary)
    }

    fn preview_evolution(
        e: &Env,
        pet_id: u64,
        apy: Option<u32>,
    ) -> Result<EvolutionPreview, ElydrError> {
        let pet = load_pet(e, pet_id)?;
        let apy = match apy {
            Some(apy) => apy,
            None => {
                let source_id = pet
                    .linked_yield_source
                    .clone()
                    .ok_or(ElydrError::NoYieldSourceLinked)?;
                storage::read_yield_source(e, &source_id)
                    .ok_or(ElydrError::YieldSourceNotFound)?
                    .apy
            }
        };

        let (pet, evolution) = evolution::evolve(&pet, apy, e.ledger().timestamp())?;
        Ok(EvolutionPreview { pet, evolution })
    }

    fn register_yield_source(
        e: &Env,
        source_id: String,
        name: String,
        apy: u32,
    ) -> Result<(), ElydrError> {
        require_admin(e)?;
        validate_apy(apy)?;
        if storage::read_yield_source(e, &source_id).is_some() {
            return Err(ElydrError::YieldSourceAlreadyRegistered);
        }

        storage::write_yield_source(
            e,
            &YieldSource {
                id: source_id.clone(),
                name: name.clone(),
                apy,
                updated_at: e.ledger().timestamp(),
            },
        );

        events::YieldSourceRegistered {
            source_id,
            name,
            apy,
        }
        .publish(e);
        Ok(())
    }

    fn update_yield_source_apy(e: &Env, source_id: String, apy: u32) -> Result<(), ElydrError> {
        require_admin(e)?;
        validate_apy(apy)?;

        let mut source =
            storage::read_yield_source(e, &source_id).ok_or(ElydrError::YieldSourceNotFound)?;
        source.apy = apy;
        source.updated_at = e.ledger().timestamp();
        storage::write_yield_source(e, &source);

        events::YieldSourceApyUpdated { source_id, apy }.publish(e);
        Ok(())
    }

    fn update_config(
        e: &Env,
        new_mint_price: Option<i128>,
        new_check_interval: Option<u64>,
        new_max_pets_per_check: Option<u32>,
        new_record_history: Option<bool>,
    ) -> Result<(), ElydrError> {
        require_admin(e)?;

        let mut config = load_config(e)?;
        if let Some(mint_price) = new_mint_price {
            config.mint_price = mint_price;
        }
        if let Some(check_interval) = new_check_interval {
            config.check_interval = check_interval;
        }
        if let Some(max_pets_per_check) = new_max_pets_per_check {
            config.max_pets_per_check = max_pets_per_check;
        }
        if let Some(record_history) = new_record_history {
            config.record_history = record_history;
        }
        validate_config(&config)?;
        storage::write_config(e, &config);
        Ok(())
    }

    fn get_pet(e: &Env, pet_id: u64) -> Result<Pet, ElydrError> {
        load_pet(e, pet_id)
    }

    fn pet_exists(e: &Env, pet_id: u64) -> bool {
        storage::has_pet(e, pet_id)
    }

    fn owner_of(e: &Env, pet_id: u64) -> Result<Address, ElydrError> {
        storage::read_owner(e, pet_id).ok_or(ElydrError::NonExistentToken)
    }

    fn balance(e: &Env, owner: Address) -> u32 {
        storage::balance(e, &owner)
    }

    fn total_supply(e: &Env) -> u64 {
        storage::total_supply(e)
    }

    fn get_yield_source(e: &Env, source_id: String) -> Result<YieldSource, ElydrError> {
        storage::read_yield_source(e, &source_id).ok_or(ElydrError::YieldSourceNotFound)
    }

    fn history(e: &Env, pet_id: u64) -> Vec<Evolution> {
        storage::read_history(e, pet_id)
    }

    fn config(e: &Env) -> Result<Config, ElydrError> {
        load_config(e)
    }

    fn next_check_at(e: &Env) -> u64 {
        storage::next_check_at(e)
    }

    fn name(e: &Env) -> Result<String, ElydrError> {
        read_metadata(e, &DataKey::Name)
    }

    fn symbol(e: &Env) -> Result<String, ElydrError> {
        read_metadata(e, &DataKey::Symbol)
    }
}
