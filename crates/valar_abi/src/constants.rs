use regex::Regex;
use std::sync::LazyLock;

pub const HASH_BYTES_LENGTH: usize = 32;
pub const ALGORAND_PUBLIC_KEY_BYTE_LENGTH: usize = 32;
pub const ALGORAND_CHECKSUM_BYTE_LENGTH: usize = 4;
pub const ALGORAND_ADDRESS_LENGTH: usize = 58;

/// Prefix hashed together with an application ID to derive its account address.
pub const APP_ID_PREFIX: &[u8] = b"appID";

// Bit manipulation
pub const BITS_PER_BYTE: u8 = 8;

pub const MAX_BIT_SIZE: u16 = 512;

pub static STATIC_ARRAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z\d\[\](),]+)\[(0|[1-9][\d]*)]$").expect("Invalid static array regex")
});
