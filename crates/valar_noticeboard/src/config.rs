use std::env;
use std::str::FromStr;

use log::warn;

/// Amounts and terms used to set up scenarios.
///
/// Values can be overridden with `VALAR_*` environment variables, read after loading a
/// `.env` file if one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    /// MicroALGO given to every test account.
    pub acc_dispenser_amt: u64,
    /// Base units of the payment asset given to every test account.
    pub acc_dispenser_asa_amt: u64,
    /// Platform commission in parts per million.
    pub commission: u64,
    pub fee_setup: u64,
    pub fee_round: u64,
    pub fee_setup_partner: u64,
    pub fee_round_partner: u64,
    /// Length of a delegation in rounds.
    pub rounds_duration: u64,
    /// Round at which delegator contracts start.
    pub round_start: u64,
    pub stake_max: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            acc_dispenser_amt: 10_000_000_000,
            acc_dispenser_asa_amt: 10_000_000_000,
            commission: 100_000,
            fee_setup: 2_345_678,
            fee_round: 10_000,
            fee_setup_partner: 123_456,
            fee_round_partner: 1_000,
            rounds_duration: 1_000_003,
            round_start: 1_000,
            stake_max: 70_000_000_000,
        }
    }
}

impl ScenarioConfig {
    pub fn from_environment() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            acc_dispenser_amt: env_or("VALAR_ACC_DISPENSER_AMT", defaults.acc_dispenser_amt),
            acc_dispenser_asa_amt: env_or(
                "VALAR_ACC_DISPENSER_ASA_AMT",
                defaults.acc_dispenser_asa_amt,
            ),
            commission: env_or("VALAR_COMMISSION", defaults.commission),
            fee_setup: env_or("VALAR_FEE_SETUP", defaults.fee_setup),
            fee_round: env_or("VALAR_FEE_ROUND", defaults.fee_round),
            fee_setup_partner: env_or("VALAR_FEE_SETUP_PARTNER", defaults.fee_setup_partner),
            fee_round_partner: env_or("VALAR_FEE_ROUND_PARTNER", defaults.fee_round_partner),
            rounds_duration: env_or("VALAR_ROUNDS_DURATION", defaults.rounds_duration),
            round_start: env_or("VALAR_ROUND_START", defaults.round_start),
            stake_max: env_or("VALAR_STAKE_MAX", defaults.stake_max),
        }
    }

    pub fn round_end(&self) -> u64 {
        self.round_start.saturating_add(self.rounds_duration)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}, it is not a valid value", name, raw);
            default
        }),
        Err(_) => default,
    }
}
