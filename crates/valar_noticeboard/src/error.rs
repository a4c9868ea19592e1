use snafu::Snafu;
use valar_abi::ABIError;

/// Errors raised while turning raw contract state into records or deriving values from them.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum NoticeboardError {
    #[snafu(display("Failed to decode {record}: {source}"))]
    Decode {
        record: &'static str,
        source: ABIError,
    },

    #[snafu(display("Failed to encode {record}: {source}"))]
    Encode {
        record: &'static str,
        source: ABIError,
    },

    #[snafu(display("Invalid layout for {record}: {source}"))]
    InvalidLayout {
        record: &'static str,
        source: ABIError,
    },

    #[snafu(display("Invalid {record}: {message}"))]
    InvalidRecord {
        record: &'static str,
        message: String,
    },

    #[snafu(display("Global state key '{key}' is missing"))]
    MissingStateKey { key: String },

    #[snafu(display("Global state key '{key}' does not hold {expected}"))]
    StateValueMismatch { key: String, expected: &'static str },

    #[snafu(display("Invalid global state encoding: {message}"))]
    InvalidStateEncoding { message: String },

    #[snafu(display("Commission {commission} exceeds the maximum of {max}"))]
    CommissionTooHigh { commission: u64, max: u64 },

    #[snafu(display("Round end {round_end} is before round start {round_start}"))]
    InvalidRoundRange { round_start: u64, round_end: u64 },
}
