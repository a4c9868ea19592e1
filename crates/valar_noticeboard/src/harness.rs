//! The interface scenarios use to drive the contracts.
//!
//! Implementations perform the raw reads and the transactions; the decoding of what they
//! read is shared and provided by the trait.

use snafu::Snafu;
use valar_abi::Address;

use crate::NoticeboardError;
use crate::app_state::GlobalStateMap;
use crate::config::ScenarioConfig;
use crate::delegator_contract::{
    DelegatorContractGlobalState, DelegatorContractState, KeyRegTxnInfo,
};
use crate::global_state::{NoticeboardGlobalState, NoticeboardState};
use crate::records::{AbiRecord, NoticeboardAssetInfo, UserInfo};
use crate::validator_ad::{ValidatorAdGlobalState, ValidatorAdState};

#[derive(Debug, Snafu)]
pub enum HarnessError {
    /// The contract rejected the call with the given error code.
    #[snafu(display("Logic error: {code}"))]
    LogicError { code: String },

    #[snafu(display("Unknown app: {app_id}"))]
    UnknownApp { app_id: u64 },

    #[snafu(display("Unknown account: {address}"))]
    UnknownAccount { address: Address },

    #[snafu(display("Box not found: {name}"))]
    BoxNotFound { name: String },

    #[snafu(display("Unknown action: {action}"))]
    UnknownAction { action: String },

    #[snafu(display("Unsupported: {message}"))]
    Unsupported { message: String },

    #[snafu(display("State error: {source}"))]
    State { source: NoticeboardError },
}

impl HarnessError {
    /// Whether this is a contract rejection carrying `code`.
    pub fn is_logic_error(&self, code: &str) -> bool {
        matches!(self, HarnessError::LogicError { code: c } if c == code)
    }
}

impl From<NoticeboardError> for HarnessError {
    fn from(source: NoticeboardError) -> Self {
        HarnessError::State { source }
    }
}

/// Inputs shared by the setup steps and the action under test.
///
/// The optional overrides replace what the harness would derive on its own, which is how
/// scenarios provoke rejections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub asset: u64,
    /// Partner receiving partner fees, or the zero address for none.
    pub partner_address: Address,
    pub key_reg: KeyRegTxnInfo,
    pub del_manager: Option<Address>,
    pub val_owner: Option<Address>,
    pub del_app_idx: Option<usize>,
    pub val_app_idx: Option<usize>,
}

impl ActionInputs {
    pub fn new(asset: u64) -> Self {
        Self {
            asset,
            partner_address: Address::ZERO,
            key_reg: KeyRegTxnInfo {
                vote_first: 0,
                vote_last: 0,
                vote_key_dilution: 0,
                vote_pk: [0x11; 32],
                selection_pk: [0x22; 32],
                state_proof_pk: [0x33; 64],
            },
            del_manager: None,
            val_owner: None,
            del_app_idx: None,
            val_app_idx: None,
        }
    }

    pub fn with_partner(mut self, partner_address: Address) -> Self {
        self.partner_address = partner_address;
        self
    }

    pub fn has_partner(&self) -> bool {
        !self.partner_address.is_zero()
    }
}

/// An inner transaction issued while executing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerTxn {
    pub sender: Address,
    pub receiver: Address,
    pub amount: u64,
    pub note: Vec<u8>,
}

/// Outcome of a confirmed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub confirmed_round: u64,
    pub inner_txns: Vec<InnerTxn>,
}

pub trait NoticeboardHarness {
    fn noticeboard_app_id(&self) -> u64;

    fn config(&self) -> &ScenarioConfig;

    fn dispenser(&self) -> Address;
    fn val_owners(&self) -> &[Address];
    fn val_managers(&self) -> &[Address];
    fn del_managers(&self) -> &[Address];
    fn partners(&self) -> &[Address];

    /// Replaces the delegator manager at `index` before setup.
    fn set_del_manager(&mut self, index: usize, account: Address) -> Result<(), HarnessError>;

    /// Creates an account funded from the dispenser with ALGO and the payment asset.
    fn create_and_fund_account(
        &mut self,
        algo_amount: u64,
        asa_amount: u64,
    ) -> Result<Address, HarnessError>;

    /// Closes `account`, sending its remaining ALGO to the dispenser.
    fn close_out_account(&mut self, account: &Address) -> Result<(), HarnessError>;

    fn initialize_state(
        &mut self,
        target_state: NoticeboardState,
        action_inputs: &ActionInputs,
    ) -> Result<(), HarnessError>;

    /// Creates a validator ad and drives it to `target_state`, returning its app ID.
    fn initialize_validator_ad_state(
        &mut self,
        action_inputs: &ActionInputs,
        target_state: ValidatorAdState,
    ) -> Result<u64, HarnessError>;

    /// Creates a delegator contract under `val_app_id` and drives it to `target_state`.
    fn initialize_delegator_contract_state(
        &mut self,
        action_inputs: &ActionInputs,
        val_app_id: u64,
        target_state: DelegatorContractState,
    ) -> Result<u64, HarnessError>;

    fn delegator_action(
        &mut self,
        app_id: u64,
        action_name: &str,
        action_inputs: &ActionInputs,
        val_app: u64,
        action_account: &Address,
    ) -> Result<ActionResult, HarnessError>;

    fn read_global_state(&self, app_id: u64) -> Result<GlobalStateMap, HarnessError>;

    fn read_box(&self, app_id: u64, name: &[u8]) -> Result<Vec<u8>, HarnessError>;

    /// Spendable balance of `address` in `asset_id` (ALGO when 0), above the minimum balance.
    fn available_balance(&self, address: &Address, asset_id: u64) -> Result<u64, HarnessError>;

    fn get_global_state(&self) -> Result<NoticeboardGlobalState, HarnessError> {
        let gs = self.read_global_state(self.noticeboard_app_id())?;
        Ok(NoticeboardGlobalState::from_global_state(&gs)?)
    }

    fn get_validator_ad_global_state(
        &self,
        app_id: u64,
    ) -> Result<ValidatorAdGlobalState, HarnessError> {
        let gs = self.read_global_state(app_id)?;
        Ok(ValidatorAdGlobalState::from_global_state(&gs)?)
    }

    fn get_delegator_global_state(
        &self,
        app_id: u64,
    ) -> Result<DelegatorContractGlobalState, HarnessError> {
        let gs = self.read_global_state(app_id)?;
        Ok(DelegatorContractGlobalState::from_global_state(&gs)?)
    }

    /// Reads the user box, keyed by the user's address.
    fn app_get_user_info(&self, user: &Address) -> Result<UserInfo, HarnessError> {
        let data = self.read_box(self.noticeboard_app_id(), user.as_bytes())?;
        Ok(UserInfo::from_bytes(&data)?)
    }

    /// Reads the asset box, keyed by the big-endian asset ID.
    fn app_get_asset_info(&self, asset_id: u64) -> Result<NoticeboardAssetInfo, HarnessError> {
        let data = self.read_box(self.noticeboard_app_id(), &asset_id.to_be_bytes())?;
        Ok(NoticeboardAssetInfo::decode(&data)?)
    }

    fn app_available_balance(&self, asset_id: u64) -> Result<u64, HarnessError> {
        self.available_balance(&Address::from_app_id(self.noticeboard_app_id()), asset_id)
    }
}
