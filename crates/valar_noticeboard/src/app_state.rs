//! Raw application global state, keyed by the state key bytes.

use base64::{Engine, engine::general_purpose::STANDARD as Base64};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::NoticeboardError;
use crate::records::AbiRecord;

const TEAL_TYPE_BYTES: u8 = 1;
const TEAL_TYPE_UINT: u8 = 2;

/// A global state entry as returned by algod, with a base64 key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TealKeyValue {
    pub key: String,
    pub value: TealValue,
}

/// A global state value as returned by algod: `type` 1 holds base64 `bytes`, 2 holds `uint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TealValue {
    #[serde(rename = "type")]
    pub r#type: u8,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppStateValue {
    Uint(u64),
    Bytes(Vec<u8>),
}

/// Global state of one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalStateMap {
    values: HashMap<Vec<u8>, AppStateValue>,
}

impl GlobalStateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes algod's global state listing.
    pub fn from_teal_key_values(state: &[TealKeyValue]) -> Result<Self, NoticeboardError> {
        let mut map = Self::new();
        for entry in state {
            let key = decode_base64(&entry.key)?;
            let value = match entry.value.r#type {
                TEAL_TYPE_BYTES => AppStateValue::Bytes(decode_base64(&entry.value.bytes)?),
                TEAL_TYPE_UINT => AppStateValue::Uint(entry.value.uint),
                other => {
                    return Err(NoticeboardError::InvalidStateEncoding {
                        message: format!("Unknown state data type: {}", other),
                    });
                }
            };
            map.values.insert(key, value);
        }
        Ok(map)
    }

    /// Parses the JSON array algod returns under `params.global-state`.
    pub fn from_json(json: &str) -> Result<Self, NoticeboardError> {
        let entries: Vec<TealKeyValue> =
            serde_json::from_str(json).map_err(|e| NoticeboardError::InvalidStateEncoding {
                message: e.to_string(),
            })?;
        Self::from_teal_key_values(&entries)
    }

    /// Produces algod's listing form, sorted by key.
    pub fn to_teal_key_values(&self) -> Vec<TealKeyValue> {
        let mut entries: Vec<TealKeyValue> = self
            .values
            .iter()
            .map(|(key, value)| TealKeyValue {
                key: Base64.encode(key),
                value: match value {
                    AppStateValue::Uint(uint) => TealValue {
                        r#type: TEAL_TYPE_UINT,
                        bytes: String::new(),
                        uint: *uint,
                    },
                    AppStateValue::Bytes(bytes) => TealValue {
                        r#type: TEAL_TYPE_BYTES,
                        bytes: Base64.encode(bytes),
                        uint: 0,
                    },
                },
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    pub fn insert_uint(&mut self, key: &str, value: u64) {
        self.values
            .insert(key.as_bytes().to_vec(), AppStateValue::Uint(value));
    }

    pub fn insert_bytes(&mut self, key: &str, value: impl Into<Vec<u8>>) {
        self.values
            .insert(key.as_bytes().to_vec(), AppStateValue::Bytes(value.into()));
    }

    pub fn insert_record<R: AbiRecord>(
        &mut self,
        key: &str,
        record: &R,
    ) -> Result<(), NoticeboardError> {
        self.insert_bytes(key, record.encode()?);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AppStateValue> {
        self.values.get(key.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn uint(&self, key: &str) -> Result<u64, NoticeboardError> {
        match self.get(key) {
            Some(AppStateValue::Uint(value)) => Ok(*value),
            Some(AppStateValue::Bytes(_)) => Err(NoticeboardError::StateValueMismatch {
                key: key.to_string(),
                expected: "a uint",
            }),
            None => Err(NoticeboardError::MissingStateKey {
                key: key.to_string(),
            }),
        }
    }

    pub fn bytes(&self, key: &str) -> Result<&[u8], NoticeboardError> {
        match self.get(key) {
            Some(AppStateValue::Bytes(value)) => Ok(value),
            Some(AppStateValue::Uint(_)) => Err(NoticeboardError::StateValueMismatch {
                key: key.to_string(),
                expected: "bytes",
            }),
            None => Err(NoticeboardError::MissingStateKey {
                key: key.to_string(),
            }),
        }
    }

    /// Reads a fixed-length byte value such as a hash or a key.
    pub fn fixed_bytes<const N: usize>(&self, key: &str) -> Result<[u8; N], NoticeboardError> {
        let value = self.bytes(key)?;
        value
            .try_into()
            .map_err(|_| NoticeboardError::InvalidStateEncoding {
                message: format!(
                    "Global state key '{}' holds {} bytes, expected {}",
                    key,
                    value.len(),
                    N
                ),
            })
    }

    /// Decodes a tuple record stored as bytes under `key`.
    pub fn record<R: AbiRecord>(&self, key: &str) -> Result<R, NoticeboardError> {
        R::decode(self.bytes(key)?)
    }
}

fn decode_base64(text: &str) -> Result<Vec<u8>, NoticeboardError> {
    Base64
        .decode(text)
        .map_err(|e| NoticeboardError::InvalidStateEncoding {
            message: e.to_string(),
        })
}
