//! Values shared with the contracts. Tags and codes must match the deployed programs byte for byte.

/// Asset ID used for payments in ALGO.
pub const ALGO_ASA_ID: u64 = 0;

/// Number of concurrent app slots in a user's box.
pub const APP_IDS_CAPACITY: usize = 110;

/// Commission is expressed in parts per million of the fee.
pub const COMMISSION_MAX: u64 = 1_000_000;

pub const ROLE_VAL: [u8; 4] = *b"val_";
pub const ROLE_DEL: [u8; 4] = *b"del_";

pub const DLL_VAL: [u8; 8] = *b"val_list";
pub const DLL_DEL: [u8; 8] = *b"del_list";

pub const MSG_CORE_KEYS_SUBMIT: &[u8] = b"Valar: participation keys submitted";

// Contract rejection codes
pub const ERROR_USER_DOES_NOT_EXIST: &str = "ERR:User does not exist";
pub const ERROR_APP_NOT_WITH_USER: &str = "ERR:App not associated with user";
pub const ERROR_NOT_STATE_READY: &str = "ERR:Not state ready";
pub const ERROR_CALLED_BY_NOT_VAL_MANAGER: &str = "ERR:Called by not validator manager";
pub const ERROR_INSUFFICIENT_BALANCE: &str = "ERR:Insufficient balance";

/// Name of the delegator contract action that submits participation keys.
pub const ACTION_KEYS_SUBMIT: &str = "keys_submit";
