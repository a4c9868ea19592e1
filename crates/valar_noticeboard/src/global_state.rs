use valar_abi::Address;

use crate::NoticeboardError;
use crate::app_state::GlobalStateMap;
use crate::records::{
    NoticeboardFees, NoticeboardTermsNodeLimits, NoticeboardTermsTiming, UsersDoubleLinkedList,
    decode_abi_address,
};

/// Lifecycle of the Noticeboard contract, stored as a one-byte tag.
///
/// Tags outside the known table are kept as `Other` and encode back to the same byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NoticeboardState {
    #[default]
    None,
    Deployed,
    Set,
    Suspended,
    Retired,
    Other(u8),
}

impl NoticeboardState {
    pub fn tag(self) -> u8 {
        match self {
            NoticeboardState::None => 0x00,
            NoticeboardState::Deployed => 0x01,
            NoticeboardState::Set => 0x02,
            NoticeboardState::Suspended => 0x03,
            NoticeboardState::Retired => 0x04,
            NoticeboardState::Other(tag) => tag,
        }
    }
}

impl From<u8> for NoticeboardState {
    fn from(tag: u8) -> Self {
        match tag {
            0x00 => NoticeboardState::None,
            0x01 => NoticeboardState::Deployed,
            0x02 => NoticeboardState::Set,
            0x03 => NoticeboardState::Suspended,
            0x04 => NoticeboardState::Retired,
            other => NoticeboardState::Other(other),
        }
    }
}

/// Decoded snapshot of the Noticeboard global state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeboardGlobalState {
    pub pla_manager: Address,
    pub tc_sha256: [u8; 32],
    pub noticeboard_fees: NoticeboardFees,
    pub noticeboard_terms_timing: NoticeboardTermsTiming,
    pub noticeboard_terms_node: NoticeboardTermsNodeLimits,
    pub state: NoticeboardState,
    pub app_id_new: u64,
    pub app_id_old: u64,
    pub dll_del: UsersDoubleLinkedList,
    pub dll_val: UsersDoubleLinkedList,
}

impl NoticeboardGlobalState {
    /// The state of a freshly created contract: zero fees and terms, zero addresses, empty lists.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn from_global_state(gs: &GlobalStateMap) -> Result<Self, NoticeboardError> {
        let [state_tag] = gs.fixed_bytes::<1>("state")?;
        Ok(Self {
            pla_manager: decode_abi_address(gs.bytes("pla_manager")?)?,
            tc_sha256: gs.fixed_bytes("tc_sha256")?,
            noticeboard_fees: gs.record("noticeboard_fees")?,
            noticeboard_terms_timing: gs.record("noticeboard_terms_timing")?,
            noticeboard_terms_node: gs.record("noticeboard_terms_node")?,
            state: NoticeboardState::from(state_tag),
            app_id_new: gs.uint("app_id_new")?,
            app_id_old: gs.uint("app_id_old")?,
            dll_del: gs.record("dll_del")?,
            dll_val: gs.record("dll_val")?,
        })
    }

    pub fn to_global_state(&self) -> Result<GlobalStateMap, NoticeboardError> {
        let mut gs = GlobalStateMap::new();
        gs.insert_bytes("pla_manager", self.pla_manager.as_bytes().to_vec());
        gs.insert_bytes("tc_sha256", self.tc_sha256.to_vec());
        gs.insert_record("noticeboard_fees", &self.noticeboard_fees)?;
        gs.insert_record("noticeboard_terms_timing", &self.noticeboard_terms_timing)?;
        gs.insert_record("noticeboard_terms_node", &self.noticeboard_terms_node)?;
        gs.insert_bytes("state", vec![self.state.tag()]);
        gs.insert_uint("app_id_new", self.app_id_new);
        gs.insert_uint("app_id_old", self.app_id_old);
        gs.insert_record("dll_del", &self.dll_del)?;
        gs.insert_record("dll_val", &self.dll_val)?;
        Ok(gs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_state() -> NoticeboardGlobalState {
        NoticeboardGlobalState {
            pla_manager: Address([3u8; 32]),
            tc_sha256: [0xab; 32],
            noticeboard_fees: NoticeboardFees {
                commission_min: 50_000,
                val_user_reg: 1_000_000,
                del_user_reg: 2_000_000,
                val_ad_creation: 3_000_000,
                del_contract_creation: 4_000_000,
            },
            state: NoticeboardState::Set,
            app_id_new: 0,
            app_id_old: 11,
            dll_val: UsersDoubleLinkedList {
                cnt_users: 1,
                user_first: Address([4u8; 32]),
                user_last: Address([4u8; 32]),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_global_state_map_conversion() {
        let state = sample_state();
        let gs = state.to_global_state().unwrap();
        assert_eq!(gs.len(), 10);
        assert_eq!(
            NoticeboardGlobalState::from_global_state(&gs).unwrap(),
            state
        );
    }

    #[test]
    fn test_defaults_are_independent() {
        let mut first = NoticeboardGlobalState::with_defaults();
        first.noticeboard_fees.val_user_reg = 5;
        first.dll_del.cnt_users = 2;

        let second = NoticeboardGlobalState::with_defaults();
        assert_eq!(second.noticeboard_fees, NoticeboardFees::default());
        assert_eq!(second.dll_del, UsersDoubleLinkedList::default());
        assert_eq!(second.state, NoticeboardState::None);
    }

    #[test]
    fn test_unknown_state_tag_round_trips() {
        let mut gs = NoticeboardGlobalState::with_defaults()
            .to_global_state()
            .unwrap();
        gs.insert_bytes("state", vec![0x05]);

        let state = NoticeboardGlobalState::from_global_state(&gs).unwrap();
        assert_eq!(state.state, NoticeboardState::Other(0x05));
        assert_eq!(state.to_global_state().unwrap(), gs);
    }

    #[test]
    fn test_known_state_tags() {
        for tag in 0x00..=0x04 {
            let state = NoticeboardState::from(tag);
            assert!(!matches!(state, NoticeboardState::Other(_)));
            assert_eq!(state.tag(), tag);
        }
    }

    #[test]
    fn test_missing_key() {
        let mut gs = GlobalStateMap::new();
        gs.insert_bytes("state", vec![0x02]);
        assert_eq!(
            NoticeboardGlobalState::from_global_state(&gs).unwrap_err(),
            NoticeboardError::MissingStateKey {
                key: "pla_manager".to_string(),
            }
        );
    }
}
