//! Shared setup for the property suites.

use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{vec, Address, Env, String, Vec};
use reward_pool::{PoolLimits, RewardPoolContract, RewardPoolContractClient, StakingAsset, TimeWindow};

pub const START: u64 = 1_000;
pub const END: u64 = 1_100;

pub struct Harness {
    pub env: Env,
    pub client: RewardPoolContractClient<'static>,
    pub stake_token: Address,
    pub reward_token: Address,
}

/// A token-staking pool over `[START, END)`, withdrawable from `START` and
/// funded with `reward` before it opens.
pub fn setup(reward: i128) -> Harness {
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
    client.initialize(
        &String::from_str(&env, "prop"),
        &TimeWindow {
            start_ts: START,
            end_ts: END,
            withdraw_enable_ts: START,
        },
        &vec![&env, StakingAsset::Token(stake_token.clone())],
        &reward_token,
        &0,
        &PoolLimits::unlimited(),
        &Vec::new(&env),
    );

    let funder = Address::generate(&env);
    StellarAssetClient::new(&env, &reward_token).mint(&funder, &reward);
    client.add_rewards(&funder, &reward);

    Harness {
        env,
        client,
        stake_token,
        reward_token,
    }
}

impl Harness {
    pub fn staker(&self, balance: i128) -> Address {
        let staker = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.stake_token).mint(&staker, &balance);
        staker
    }

    pub fn at(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn stake_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.stake_token).balance(who)
    }

    pub fn reward_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(who)
    }
}
