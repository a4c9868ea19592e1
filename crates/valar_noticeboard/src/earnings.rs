use crate::NoticeboardError;
use crate::constants::COMMISSION_MAX;

/// Split of a fee between the validator and the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Earnings {
    pub validator: u64,
    pub platform: u64,
}

impl Earnings {
    pub fn total(&self) -> u64 {
        self.validator + self.platform
    }
}

/// Splits `amount` according to the platform `commission` (parts per million).
///
/// The platform share is rounded down so the validator receives the remainder and the
/// two shares always add up to `amount`.
pub fn calc_earnings(amount: u64, commission: u64) -> Result<Earnings, NoticeboardError> {
    if commission > COMMISSION_MAX {
        return Err(NoticeboardError::CommissionTooHigh {
            commission,
            max: COMMISSION_MAX,
        });
    }

    let platform = (amount as u128 * commission as u128 / COMMISSION_MAX as u128) as u64;
    Ok(Earnings {
        validator: amount - platform,
        platform,
    })
}

/// Key dilution for a participation key valid from `round_start` to `round_end`.
pub fn vote_key_dilution(round_start: u64, round_end: u64) -> Result<u64, NoticeboardError> {
    round_end
        .checked_sub(round_start)
        .map(u64::isqrt)
        .ok_or(NoticeboardError::InvalidRoundRange {
            round_start,
            round_end,
        })
}
