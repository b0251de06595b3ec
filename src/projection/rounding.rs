//! Money rounding shared by every projected figure

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on every reported money figure
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Midpoints go to the even cent (banker's rounding)
pub const MONEY_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Round a money amount to whole cents
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, MONEY_ROUNDING)
}
