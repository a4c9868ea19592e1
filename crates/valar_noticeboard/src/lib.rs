//! Decoded views of the Valar Noticeboard contract state and scenario procedures that
//! exercise the contracts through a [`harness::NoticeboardHarness`].
//!
//! The byte layouts follow the ARC-4 encoding produced by the contracts; every record in
//! [`records`] decodes from, and encodes back to, exactly the bytes stored on chain.
pub mod app_state;
pub mod config;
pub mod constants;
pub mod delegator_contract;
pub mod earnings;
pub mod error;
pub mod global_state;
pub mod harness;
pub mod records;
pub mod scenarios;
pub mod validator_ad;

#[cfg(feature = "test_utils")]
pub mod testing;

pub use app_state::{AppStateValue, GlobalStateMap, TealKeyValue, TealValue};
pub use config::ScenarioConfig;
pub use delegator_contract::{DelegatorContractGlobalState, DelegatorContractState, KeyRegTxnInfo};
pub use earnings::{Earnings, calc_earnings, vote_key_dilution};
pub use error::NoticeboardError;
pub use global_state::{NoticeboardGlobalState, NoticeboardState};
pub use harness::{ActionInputs, ActionResult, HarnessError, InnerTxn, NoticeboardHarness};
pub use records::{
    AbiRecord, DelegationTermsBalance, DelegationTermsGeneral, NoticeboardAssetInfo,
    NoticeboardFees, NoticeboardTermsNodeLimits, NoticeboardTermsTiming, UserInfo,
    UsersDoubleLinkedList, decode_abi_address, decode_noticeboard_asset_box,
    decode_noticeboard_fees, decode_noticeboard_terms_node, decode_noticeboard_terms_timing,
    decode_user_double_linked_list,
};
pub use valar_abi::Address;
pub use validator_ad::{ValidatorAdGlobalState, ValidatorAdState};
