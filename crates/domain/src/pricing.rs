//! Bulk-discount pricing engine.
//!
//! The tiered discount lives here and nowhere else. Live product quotes,
//! cart line display, and the bill summary all call [`quote`] (or
//! [`discount_percent_for`]); none of them re-implement the thresholds.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A computed price quote for one medicine at a given quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Quantity × per-unit price, before discount.
    pub base_total: Money,

    /// Applied discount tier in whole percent (0, 5 or 10).
    pub discount_percent: u8,

    /// Absolute discount deducted from the base total.
    pub discount_amount: Money,

    /// Amount payable after discount.
    pub final_total: Money,
}

impl PriceQuote {
    /// The all-zero quote, returned for a zero quantity.
    pub fn zero() -> Self {
        Self {
            base_total: Money::zero(),
            discount_percent: 0,
            discount_amount: Money::zero(),
            final_total: Money::zero(),
        }
    }
}

/// Returns the bulk-discount percentage for a quantity of units.
///
/// Thresholds are evaluated highest first and are not cumulative:
/// 100 or more units earn 10%, 50 or more earn 5%, anything below
/// earns nothing.
pub fn discount_percent_for(quantity: u32) -> u8 {
    if quantity >= 100 {
        10
    } else if quantity >= 50 {
        5
    } else {
        0
    }
}

/// Computes the quote for `quantity` units of a medicine.
///
/// `generic_price` is the price of one strip and `strip_size` the number
/// of units in it, so the per-unit price is `generic_price / strip_size`.
/// The computation is exact on paise with a single rounding per
/// multiplication (half-up). A zero quantity yields the all-zero quote;
/// there are no error conditions.
pub fn quote(generic_price: Money, strip_size: u32, quantity: u32) -> PriceQuote {
    if quantity == 0 || strip_size == 0 {
        return PriceQuote::zero();
    }

    let base_total = Money::from_paise(mul_div_round(
        generic_price.paise(),
        quantity as i64,
        strip_size as i64,
    ));
    let discount_percent = discount_percent_for(quantity);
    let discount_amount =
        Money::from_paise(mul_div_round(base_total.paise(), discount_percent as i64, 100));

    PriceQuote {
        base_total,
        discount_percent,
        discount_amount,
        final_total: base_total - discount_amount,
    }
}

/// Computes `amount * numerator / denominator` rounded half-up on paise.
///
/// Widens to i128 so the intermediate product cannot overflow for any
/// realistic price and quantity.
fn mul_div_round(amount: i64, numerator: i64, denominator: i64) -> i64 {
    let product = amount as i128 * numerator as i128;
    let denominator = denominator as i128;
    ((2 * product + denominator) / (2 * denominator)) as i64
}
