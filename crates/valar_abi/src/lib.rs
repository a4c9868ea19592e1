//! Fixed-width encoding and decoding of Algorand ABI values as defined in [ARC-4](https://arc.algorand.foundation/ARCs/arc-0004).
//!
//! Only static types are supported: every value of a given [`ABIType`] occupies the same
//! number of bytes, which is what contract global state and box layouts rely on.
pub mod abi_type;
pub mod abi_value;
pub mod address;
pub mod constants;
pub mod error;
pub mod types;

pub use abi_type::{ABIType, BitSize};
pub use abi_value::ABIValue;
pub use address::Address;
pub use error::ABIError;
