use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ElydrError {
    /// Indicates a non-existent pet id.
    NonExistentToken = 200,
    /// Indicates the caller does not own the pet.
    IncorrectOwner = 201,
    /// Indicates the caller is not the contract admin.
    Unauthorized = 202,
    /// Indicates overflow when adding two values
    MathOverflow = 205,
    /// Indicates a zero or negative token amount.
    InvalidAmount = 207,
    /// Indicates the mint payment is below the configured price.
    InsufficientPayment = 208,
    /// Indicates an unstake percentage outside 1..=100.
    InvalidPercentage = 209,
    /// Indicates the pet has nothing staked.
    NothingStaked = 210,
    /// Indicates metadata was never set.
    UnsetMetadata = 211,
    /// Indicates an APY above 100%.
    InvalidApy = 212,
    /// Indicates the yield source is not registered.
    YieldSourceNotFound = 213,
    /// Indicates the yield source id is already registered.
    YieldSourceAlreadyRegistered = 214,
    /// Indicates the pet has no linked yield source.
    NoYieldSourceLinked = 215,
    /// Indicates the scheduled evolution check is not due yet.
    CheckNotDue = 216,
    /// Indicates a negative mint price or a zero check interval.
    InvalidConfig = 217,
}
