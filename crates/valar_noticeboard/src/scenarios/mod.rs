//! End-to-end scenarios: set up contracts through a harness, run one action, and check
//! the resulting state, balances and messages.
pub mod keys_submit;

use std::fmt::Debug;

use log::{debug, info, warn};
use snafu::Snafu;
use valar_abi::Address;

use crate::NoticeboardError;
use crate::delegator_contract::DelegatorContractGlobalState;
use crate::global_state::NoticeboardGlobalState;
use crate::harness::{HarnessError, NoticeboardHarness};
use crate::records::UserInfo;
use crate::validator_ad::ValidatorAdGlobalState;

#[derive(Debug, Snafu)]
pub enum ScenarioError {
    #[snafu(display("{what} mismatch: expected {expected}, got {actual}"))]
    Mismatch {
        what: String,
        expected: String,
        actual: String,
    },

    #[snafu(display(
        "Action '{action}' succeeded but was expected to fail with '{expected_code}'"
    ))]
    UnexpectedSuccess {
        action: String,
        expected_code: String,
    },

    #[snafu(display("Expected logic error '{expected_code}', got: {source}"))]
    UnexpectedError {
        expected_code: String,
        source: HarnessError,
    },

    #[snafu(display("Harness has no {role} account"))]
    MissingAccount { role: &'static str },

    #[snafu(display("Harness error: {source}"))]
    Harness { source: HarnessError },

    #[snafu(display("State error: {source}"))]
    State { source: NoticeboardError },
}

impl From<HarnessError> for ScenarioError {
    fn from(source: HarnessError) -> Self {
        ScenarioError::Harness { source }
    }
}

impl From<NoticeboardError> for ScenarioError {
    fn from(source: NoticeboardError) -> Self {
        ScenarioError::State { source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Passed,
    Skipped { reason: String },
}

/// A scenario run against a fresh harness.
pub type Scenario<H> = fn(&mut H, u64) -> Result<ScenarioOutcome, ScenarioError>;

/// Result of one scenario in a suite run.
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub asset: u64,
    pub result: Result<ScenarioOutcome, ScenarioError>,
}

impl ScenarioReport {
    pub fn failed(&self) -> bool {
        self.result.is_err()
    }
}

/// Runs each scenario on its own harness built by `new_harness`.
pub fn run_suite<H, F>(
    scenarios: &[(&'static str, Scenario<H>)],
    asset: u64,
    mut new_harness: F,
) -> Vec<ScenarioReport>
where
    H: NoticeboardHarness,
    F: FnMut() -> H,
{
    scenarios
        .iter()
        .map(|(name, scenario)| {
            let mut harness = new_harness();
            debug!("Running scenario {} with asset {}", name, asset);
            let result = scenario(&mut harness, asset);
            match &result {
                Ok(ScenarioOutcome::Passed) => info!("Scenario {} passed", name),
                Ok(ScenarioOutcome::Skipped { reason }) => {
                    info!("Scenario {} skipped: {}", name, reason)
                }
                Err(e) => warn!("Scenario {} failed: {}", name, e),
            }
            ScenarioReport {
                name,
                asset,
                result,
            }
        })
        .collect()
}

pub(crate) fn check_eq<T: PartialEq + Debug>(
    what: &str,
    expected: &T,
    actual: &T,
) -> Result<(), ScenarioError> {
    if expected == actual {
        return Ok(());
    }
    Err(ScenarioError::Mismatch {
        what: what.to_string(),
        expected: format!("{:?}", expected),
        actual: format!("{:?}", actual),
    })
}

pub(crate) fn first_account(
    accounts: &[Address],
    role: &'static str,
) -> Result<Address, ScenarioError> {
    accounts
        .first()
        .copied()
        .ok_or(ScenarioError::MissingAccount { role })
}

/// Expects `result` to be a rejection with `code`.
pub(crate) fn expect_logic_error<T>(
    action: &str,
    code: &str,
    result: Result<T, HarnessError>,
) -> Result<(), ScenarioError> {
    match result {
        Ok(_) => Err(ScenarioError::UnexpectedSuccess {
            action: action.to_string(),
            expected_code: code.to_string(),
        }),
        Err(e) if e.is_logic_error(code) => {
            debug!("Action {} rejected as expected with {}", action, code);
            Ok(())
        }
        Err(e) => Err(ScenarioError::UnexpectedError {
            expected_code: code.to_string(),
            source: e,
        }),
    }
}

/// State, user boxes and balances touched by a delegator contract action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub global_state: NoticeboardGlobalState,
    pub validator_ad: ValidatorAdGlobalState,
    pub delegator_contract: DelegatorContractGlobalState,
    pub del_user_info: UserInfo,
    pub val_user_info: UserInfo,
    pub noticeboard_algo: u64,
    pub noticeboard_asset: u64,
    pub validator_ad_balance: u64,
    pub delegator_contract_balance: u64,
}

impl Snapshot {
    pub fn capture<H: NoticeboardHarness>(
        nb: &H,
        val_app_id: u64,
        del_app_id: u64,
        asset: u64,
    ) -> Result<Self, ScenarioError> {
        let del_user = first_account(nb.del_managers(), "delegator manager")?;
        let val_user = first_account(nb.val_owners(), "validator owner")?;
        Ok(Self {
            global_state: nb.get_global_state()?,
            validator_ad: nb.get_validator_ad_global_state(val_app_id)?,
            delegator_contract: nb.get_delegator_global_state(del_app_id)?,
            del_user_info: nb.app_get_user_info(&del_user)?,
            val_user_info: nb.app_get_user_info(&val_user)?,
            noticeboard_algo: nb.app_available_balance(crate::constants::ALGO_ASA_ID)?,
            noticeboard_asset: nb.app_available_balance(asset)?,
            validator_ad_balance: nb
                .available_balance(&Address::from_app_id(val_app_id), asset)?,
            delegator_contract_balance: nb
                .available_balance(&Address::from_app_id(del_app_id), asset)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_eq_reports_both_values() {
        assert!(check_eq("balance", &1u64, &1u64).is_ok());
        assert_eq!(
            check_eq("balance", &1u64, &2u64).unwrap_err().to_string(),
            "balance mismatch: expected 1, got 2"
        );
    }

    #[test]
    fn test_expect_logic_error() {
        let rejected: Result<(), HarnessError> = Err(HarnessError::LogicError {
            code: "ERR:x".to_string(),
        });
        assert!(expect_logic_error("act", "ERR:x", rejected).is_ok());

        let other: Result<(), HarnessError> = Err(HarnessError::LogicError {
            code: "ERR:y".to_string(),
        });
        assert_eq!(
            expect_logic_error("act", "ERR:x", other)
                .unwrap_err()
                .to_string(),
            "Expected logic error 'ERR:x', got: Logic error: ERR:y"
        );

        assert_eq!(
            expect_logic_error("act", "ERR:x", Ok(()))
                .unwrap_err()
                .to_string(),
            "Action 'act' succeeded but was expected to fail with 'ERR:x'"
        );
    }

    #[test]
    fn test_first_account() {
        assert_eq!(
            first_account(&[], "partner").unwrap_err().to_string(),
            "Harness has no partner account"
        );
        assert_eq!(
            first_account(&[Address([1u8; 32])], "partner").unwrap(),
            Address([1u8; 32])
        );
    }
}
