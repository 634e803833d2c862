//! Database utility functions.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::db::{DbError, DbResult};

/// Largest magnitude representable by a `numeric(10,2)` column, in cents.
const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

/// Current time truncated to whole seconds, the precision kept by the store.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Convert an amount to integer cents for storage.
///
/// Extra fractional digits are rounded half away from zero; magnitudes beyond
/// eight integer digits are a numeric overflow.
pub fn amount_to_cents(amount: Decimal) -> DbResult<i64> {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);

    let overflow = || DbError::Constraint {
        message: format!("numeric field overflow: amount {amount} exceeds numeric(10,2)"),
    };

    let mantissa = i64::try_from(cents.mantissa()).map_err(|_| overflow())?;
    if mantissa.abs() > MAX_AMOUNT_CENTS {
        return Err(overflow());
    }
    Ok(mantissa)
}

/// Convert stored cents back to a two-digit amount.
pub fn cents_to_amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
