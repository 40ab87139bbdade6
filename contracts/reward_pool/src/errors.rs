use soroban_sdk::contracterror;

/// Every way a pool call can be rejected.
///
/// # Code ranges
/// | Range   | Purpose                                  |
/// |---------|------------------------------------------|
/// | 1 – 9   | Lifecycle and configuration              |
/// | 10 – 19 | Time window                              |
/// | 20 – 29 | Input and asset selection                |
/// | 30 – 39 | Ownership and staked balances            |
/// | 40 – 49 | Pool and user limits                     |
/// | 50 – 59 | Access and arithmetic                    |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle / configuration ────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// `start_ts >= end_ts`, or withdrawals unlock after the pool ends.
    InvalidTimeWindow = 3,
    /// No staking asset was supplied at construction.
    NoStakingAsset = 4,
    /// Duplicate asset kinds, negative limits or an unusable per-unit weight.
    InvalidConfig = 5,

    // ── Time window ──────────────────────────────────────────
    PoolNotOpen = 10,
    PoolEnded = 11,
    WithdrawNotEnabled = 12,

    // ── Input ────────────────────────────────────────────────
    InvalidAmount = 20,
    UnsupportedAsset = 21,

    // ── Ownership / balances ─────────────────────────────────
    NotOwner = 30,
    NotStaked = 31,
    AlreadyStaked = 32,
    WithdrawExceedsStake = 33,

    // ── Limits ───────────────────────────────────────────────
    /// Total weighted stake would exceed `max_total_stake`.
    PoolLimitExceeded = 40,
    /// Total staked NFT units would exceed `max_total_units`.
    PoolUnitLimitExceeded = 41,
    /// The caller's token balance would sit below `min_user_stake`.
    UserMinimumNotMet = 42,
    /// The caller's NFT unit count would sit below `min_user_units`.
    UserUnitMinimumNotMet = 43,

    // ── Access / arithmetic ──────────────────────────────────
    NotWhitelisted = 50,
    ArithmeticOverflow = 51,
}

impl ContractError {
    /// Returns `true` for the limit family, which callers usually surface
    /// differently from plain input errors.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            ContractError::PoolLimitExceeded
                | ContractError::PoolUnitLimitExceeded
                | ContractError::UserMinimumNotMet
                | ContractError::UserUnitMinimumNotMet
        )
    }

    /// Returns `true` for errors that can only be raised by `initialize`.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ContractError::InvalidTimeWindow
                | ContractError::NoStakingAsset
                | ContractError::InvalidConfig
        )
    }
}
