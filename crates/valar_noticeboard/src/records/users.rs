use valar_abi::{ABIValue, Address};

use super::{AbiRecord, TupleFields};
use crate::NoticeboardError;
use crate::constants::{APP_IDS_CAPACITY, ROLE_DEL, ROLE_VAL};

/// Counter and end pointers of a doubly linked list of users kept in user boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsersDoubleLinkedList {
    pub cnt_users: u64,
    pub user_first: Address,
    pub user_last: Address,
}

impl AbiRecord for UsersDoubleLinkedList {
    const NAME: &'static str = "UsersDoubleLinkedList";

    const ABI_TYPE: &'static str = "(uint64,address,address)";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        Ok(Self {
            cnt_users: fields.next_u64()?,
            user_first: fields.next_address()?,
            user_last: fields.next_address()?,
        })
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::Array(vec![
            ABIValue::from(self.cnt_users),
            ABIValue::from(self.user_first),
            ABIValue::from(self.user_last),
        ])
    }
}

pub fn decode_user_double_linked_list(
    data: &[u8],
) -> Result<UsersDoubleLinkedList, NoticeboardError> {
    UsersDoubleLinkedList::decode(data)
}

/// Contents of a user box.
///
/// `app_ids` is a fixed table of the apps (validator ads or delegator contracts) the user
/// takes part in. A slot holding 0 is free. Slots are neither sorted nor compacted, so the
/// index of an app is only meaningful together with the table it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub role: [u8; 4],
    pub dll_name: [u8; 8],
    pub prev_user: Address,
    pub next_user: Address,
    pub app_ids: [u64; APP_IDS_CAPACITY],
    pub cnt_app_ids: u64,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            role: [0u8; 4],
            dll_name: [0u8; 8],
            prev_user: Address::ZERO,
            next_user: Address::ZERO,
            app_ids: [0u64; APP_IDS_CAPACITY],
            cnt_app_ids: 0,
        }
    }
}

impl UserInfo {
    pub fn from_bytes(data: &[u8]) -> Result<Self, NoticeboardError> {
        Self::decode(data)
    }

    /// Index of the first free slot, if any.
    pub fn get_free_app_idx(&self) -> Option<usize> {
        self.get_app_idx(0)
    }

    /// Index of the first slot holding `app_id`.
    pub fn get_app_idx(&self, app_id: u64) -> Option<usize> {
        self.app_ids.iter().position(|id| *id == app_id)
    }

    pub fn is_validator(&self) -> bool {
        self.role == ROLE_VAL
    }

    pub fn is_delegator(&self) -> bool {
        self.role == ROLE_DEL
    }
}

impl AbiRecord for UserInfo {
    const NAME: &'static str = "UserInfo";

    /// `app_ids` holds [`APP_IDS_CAPACITY`] slots.
    const ABI_TYPE: &'static str = "(byte[4],byte[8],address,address,uint64[110],uint64)";

    fn from_fields(fields: &mut TupleFields) -> Result<Self, NoticeboardError> {
        let info = Self {
            role: fields.next_bytes()?,
            dll_name: fields.next_bytes()?,
            prev_user: fields.next_address()?,
            next_user: fields.next_address()?,
            app_ids: fields.next_u64s()?,
            cnt_app_ids: fields.next_u64()?,
        };

        if info.cnt_app_ids > APP_IDS_CAPACITY as u64 {
            return Err(NoticeboardError::InvalidRecord {
                record: Self::NAME,
                message: format!(
                    "cnt_app_ids {} exceeds the capacity of {} slots",
                    info.cnt_app_ids, APP_IDS_CAPACITY
                ),
            });
        }
        Ok(info)
    }

    fn to_abi_value(&self) -> ABIValue {
        ABIValue::Array(vec![
            ABIValue::from_bytes(&self.role),
            ABIValue::from_bytes(&self.dll_name),
            ABIValue::from(self.prev_user),
            ABIValue::from(self.next_user),
            ABIValue::from_u64s(&self.app_ids),
            ABIValue::from(self.cnt_app_ids),
        ])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::constants::DLL_DEL;

    const USER_INFO_LEN: usize = 4 + 8 + 32 + 32 + APP_IDS_CAPACITY * 8 + 8;

    fn user_with_apps(apps: &[(usize, u64)]) -> UserInfo {
        let mut info = UserInfo {
            role: ROLE_DEL,
            dll_name: DLL_DEL,
            ..Default::default()
        };
        for (idx, app_id) in apps {
            info.app_ids[*idx] = *app_id;
            info.cnt_app_ids += 1;
        }
        info
    }

    #[test]
    fn test_decode_linked_list() {
        let mut data = 2u64.to_be_bytes().to_vec();
        data.extend([1u8; 32]);
        data.extend([2u8; 32]);

        assert_eq!(
            decode_user_double_linked_list(&data).unwrap(),
            UsersDoubleLinkedList {
                cnt_users: 2,
                user_first: Address([1u8; 32]),
                user_last: Address([2u8; 32]),
            }
        );
    }

    #[test]
    fn test_default_linked_list_is_zero_address() {
        let dll = UsersDoubleLinkedList::default();
        assert_eq!(dll.encode().unwrap(), vec![0u8; 72]);
        assert!(dll.user_first.is_zero());
        assert!(dll.user_last.is_zero());
    }

    #[test]
    fn test_user_info_layout() {
        let mut info = user_with_apps(&[(0, 1001), (3, 1002)]);
        info.prev_user = Address([7u8; 32]);

        let encoded = info.encode().unwrap();
        assert_eq!(encoded.len(), USER_INFO_LEN);
        assert_eq!(&encoded[..4], b"del_");
        assert_eq!(&encoded[4..12], b"del_list");
        assert_eq!(&encoded[12..44], &[7u8; 32]);
        assert_eq!(&encoded[76..84], &1001u64.to_be_bytes());
        assert_eq!(&encoded[100..108], &1002u64.to_be_bytes());
        assert_eq!(&encoded[USER_INFO_LEN - 8..], &2u64.to_be_bytes());

        let decoded = UserInfo::from_bytes(&encoded).unwrap();
        assert_eq!(decoded, info);
        assert!(decoded.is_delegator());
        assert!(!decoded.is_validator());
    }

    #[test]
    fn test_user_info_rejects_wrong_length() {
        assert!(UserInfo::from_bytes(&vec![0u8; USER_INFO_LEN - 1]).is_err());
        assert!(UserInfo::from_bytes(&vec![0u8; USER_INFO_LEN + 8]).is_err());
    }

    #[test]
    fn test_user_info_rejects_count_above_capacity() {
        let mut encoded = UserInfo::default().encode().unwrap();
        encoded[USER_INFO_LEN - 8..].copy_from_slice(&111u64.to_be_bytes());
        assert_eq!(
            UserInfo::from_bytes(&encoded).unwrap_err().to_string(),
            "Invalid UserInfo: cnt_app_ids 111 exceeds the capacity of 110 slots"
        );
    }

    #[test]
    fn test_get_app_idx_returns_first_match() {
        let info = user_with_apps(&[(2, 55), (5, 55), (7, 66)]);
        assert_eq!(info.get_app_idx(55), Some(2));
        assert_eq!(info.get_app_idx(66), Some(7));
        assert_eq!(info.get_app_idx(77), None);
    }

    #[test]
    fn test_get_free_app_idx_returns_lowest_free_slot() {
        let info = user_with_apps(&[(0, 10), (1, 11), (3, 13)]);
        assert_eq!(info.get_free_app_idx(), Some(2));
        assert_eq!(UserInfo::default().get_free_app_idx(), Some(0));
    }

    #[test]
    fn test_get_free_app_idx_when_full() {
        let mut info = UserInfo::default();
        for (idx, slot) in info.app_ids.iter_mut().enumerate() {
            *slot = idx as u64 + 1;
        }
        info.cnt_app_ids = APP_IDS_CAPACITY as u64;

        assert_eq!(info.get_free_app_idx(), None);
        assert_eq!(info.get_app_idx(0), None);
        assert_eq!(info.get_app_idx(110), Some(109));
    }
}
