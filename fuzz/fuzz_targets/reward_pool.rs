#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reward_pool::{
    PoolLimits, RewardPoolContract, RewardPoolContractClient, StakingAsset, TimeWindow,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec as soroban_vec, Address, Env, String, Vec as SorobanVec,
};

const START: u64 = 1_000;
const END: u64 = 2_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u64 },
    Withdraw { amount: u64 },
    AddRewards { amount: u32 },
    Claim,
    AdvanceTime { seconds: u16 },
}

fuzz_target!(|input: (u8, [i64; 4], Vec<FuzzAction>)| {
    let (withdraw_offset, raw_limits, actions) = input;
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(RewardPoolContract, ());
    let client = RewardPoolContractClient::new(&env, &contract_id);

    // Limits are fuzzed too; negative ones must be rejected, not panic.
    let limits = PoolLimits {
        max_total_stake: raw_limits[0] as i128,
        max_total_units: raw_limits[1] as i128,
        min_user_stake: raw_limits[2] as i128,
        min_user_units: raw_limits[3] as i128,
    };
    let initialized = client.try_initialize(
        &String::from_str(&env, "fuzz"),
        &TimeWindow {
            start_ts: START,
            end_ts: END,
            withdraw_enable_ts: START + withdraw_offset as u64,
        },
        &soroban_vec![&env, StakingAsset::Token(stake_token.clone())],
        &reward_token,
        &0,
        &limits,
        &SorobanVec::new(&env),
    );
    if !matches!(initialized, Ok(Ok(()))) {
        return;
    }

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &(u64::MAX as i128));
        users.push(user);
    }
    let funder = Address::generate(&env);

    env.ledger().set_timestamp(START);
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { amount } => {
                let _ = client.try_deposit_token(caller, &(amount as i128));
            }
            FuzzAction::Withdraw { amount } => {
                let _ = client.try_withdraw_token(caller, &(amount as i128));
            }
            FuzzAction::AddRewards { amount } => {
                let amount = amount as i128;
                StellarAssetClient::new(&env, &reward_token).mint(&funder, &amount);
                let _ = client.try_add_rewards(&funder, &amount);
            }
            FuzzAction::Claim => {
                let _ = client.try_claim_all_rewards(caller);
            }
            FuzzAction::AdvanceTime { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + seconds as u64);
            }
        }

        // Position weights must always add up to the pool total.
        let total: i128 = users
            .iter()
            .map(|user| client.weighted_stake_of(user))
            .sum();
        assert_eq!(total, client.total_weighted_stake());
    }
});
