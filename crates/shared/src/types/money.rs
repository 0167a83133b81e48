//! US dollar amounts with decimal precision and display formatting.
//!
//! Deal values and pipeline totals are summed as `rust_decimal::Decimal`.
//! Floats never touch money; rounding only happens when formatting for display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A US dollar amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in dollars, with arbitrary fractional precision.
    pub amount: Decimal,
}

impl Money {
    /// Symbol placed before the amount.
    pub const SYMBOL: &'static str = "$";

    /// Creates a US dollar amount.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Formats the amount in whole dollars with thousands separators.
    ///
    /// Uses Banker's Rounding (MidpointNearestEven), so `$2.50` displays as `$2`
    /// and `$3.50` as `$4`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use crm_shared::types::Money;
    ///
    /// assert_eq!(Money::usd(dec!(1234567.5)).format_whole(), "$1,234,568");
    /// assert_eq!(Money::usd(dec!(-130)).format_whole(), "-$130");
    /// ```
    #[must_use]
    pub fn format_whole(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().trunc().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{grouped}", Self::SYMBOL)
    }
}
