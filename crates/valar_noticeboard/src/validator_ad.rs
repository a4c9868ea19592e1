use valar_abi::Address;

use crate::NoticeboardError;
use crate::app_state::GlobalStateMap;

/// Lifecycle of a validator ad, stored as a one-byte tag.
///
/// Tags outside the known table are kept as `Other` and encode back to the same byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValidatorAdState {
    #[default]
    None,
    Created,
    TemplateLoad,
    TemplateLoaded,
    Set,
    Ready,
    NotReady,
    NotLive,
    Other(u8),
}

impl ValidatorAdState {
    pub fn tag(self) -> u8 {
        match self {
            ValidatorAdState::None => 0x00,
            ValidatorAdState::Created => 0x01,
            ValidatorAdState::TemplateLoad => 0x02,
            ValidatorAdState::TemplateLoaded => 0x03,
            ValidatorAdState::Set => 0x04,
            ValidatorAdState::Ready => 0x05,
            ValidatorAdState::NotReady => 0x06,
            ValidatorAdState::NotLive => 0x07,
            ValidatorAdState::Other(tag) => tag,
        }
    }
}

impl From<u8> for ValidatorAdState {
    fn from(tag: u8) -> Self {
        match tag {
            0x00 => ValidatorAdState::None,
            0x01 => ValidatorAdState::Created,
            0x02 => ValidatorAdState::TemplateLoad,
            0x03 => ValidatorAdState::TemplateLoaded,
            0x04 => ValidatorAdState::Set,
            0x05 => ValidatorAdState::Ready,
            0x06 => ValidatorAdState::NotReady,
            0x07 => ValidatorAdState::NotLive,
            other => ValidatorAdState::Other(other),
        }
    }
}

/// Decoded snapshot of a validator ad's global state.
///
/// The earnings counters only track payments made in ALGO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorAdGlobalState {
    pub state: ValidatorAdState,
    pub val_owner: Address,
    pub val_manager: Address,
    pub noticeboard_app_id: u64,
    pub cnt_del: u64,
    pub total_algo_earned: u64,
    pub total_algo_fees_generated: u64,
}

impl ValidatorAdGlobalState {
    pub fn from_global_state(gs: &GlobalStateMap) -> Result<Self, NoticeboardError> {
        let [state_tag] = gs.fixed_bytes::<1>("state")?;
        Ok(Self {
            state: ValidatorAdState::from(state_tag),
            val_owner: Address(gs.fixed_bytes("val_owner")?),
            val_manager: Address(gs.fixed_bytes("val_manager")?),
            noticeboard_app_id: gs.uint("noticeboard_app_id")?,
            cnt_del: gs.uint("cnt_del")?,
            total_algo_earned: gs.uint("total_algo_earned")?,
            total_algo_fees_generated: gs.uint("total_algo_fees_generated")?,
        })
    }

    pub fn to_global_state(&self) -> GlobalStateMap {
        let mut gs = GlobalStateMap::new();
        gs.insert_bytes("state", vec![self.state.tag()]);
        gs.insert_bytes("val_owner", self.val_owner.as_bytes().to_vec());
        gs.insert_bytes("val_manager", self.val_manager.as_bytes().to_vec());
        gs.insert_uint("noticeboard_app_id", self.noticeboard_app_id);
        gs.insert_uint("cnt_del", self.cnt_del);
        gs.insert_uint("total_algo_earned", self.total_algo_earned);
        gs.insert_uint("total_algo_fees_generated", self.total_algo_fees_generated);
        gs
    }
}
