//! ## Price and tick conversions
//! Utility functions for converting between `i32` ticks and SDK Core [`Price`] prices.

use super::sorts_before;
use crate::error::Error;
use alloy_primitives::U160;
use core::cmp::Ordering;
use uniswap_sdk_core::prelude::{BigInt, Currency, Price, ToBig};
use uniswap_v3_sdk::prelude::{
    encode_sqrt_ratio_x96, get_sqrt_ratio_at_tick, TickIndex, TickMath, MAX_TICK_I32,
    MIN_TICK_I32, Q192,
};

/// The sqrt ratio at `tick`. Out of range ticks fail with the v3 tick math error.
#[inline]
pub(crate) fn sqrt_ratio_at_tick(tick: i32) -> Result<U160, Error> {
    // one past either bound still fails, and fits in 24 bits
    let tick = tick.clamp(MIN_TICK_I32 - 1, MAX_TICK_I32 + 1).to_i24();
    Ok(get_sqrt_ratio_at_tick(tick)?)
}

/// The greatest tick whose sqrt ratio is at most `sqrt_ratio_x96`.
#[inline]
pub(crate) fn tick_at_sqrt_ratio(sqrt_ratio_x96: U160) -> Result<i32, Error> {
    Ok(sqrt_ratio_x96.get_tick_at_sqrt_ratio()?.as_i32())
}

/// `sqrt_ratio_x96^2`, the price of currency0 in currency1 scaled by `2^192`.
#[inline]
pub(crate) fn ratio_x192(sqrt_ratio_x96: U160) -> BigInt {
    sqrt_ratio_x96.to_big_int().pow(2)
}

/// Returns a price object corresponding to the input tick and the base/quote currency.
/// The sort order of the two currencies decides which way the tick price is read.
///
/// ## Arguments
///
/// * `base_currency`: the base currency of the price
/// * `quote_currency`: the quote currency of the price
/// * `tick`: the tick for which to return the price
#[inline]
pub fn tick_to_price(
    base_currency: Currency,
    quote_currency: Currency,
    tick: i32,
) -> Result<Price<Currency, Currency>, Error> {
    let ratio = ratio_x192(sqrt_ratio_at_tick(tick)?);
    let (denominator, numerator) = if sorts_before(&base_currency, &quote_currency)? {
        (Q192.to_big_int(), ratio)
    } else {
        (ratio, Q192.to_big_int())
    };
    Ok(Price::new(base_currency, quote_currency, denominator, numerator))
}

/// Returns the first tick for which the given price is greater than or equal to the tick price
///
/// ## Arguments
///
/// * `price`: for which to return the closest tick that represents a price less than or equal to
///   the input price, i.e. the price of the returned tick is less than or equal to the input price
#[inline]
pub fn price_to_closest_tick(price: &Price<Currency, Currency>) -> Result<i32, Error> {
    let sorted = sorts_before(&price.base_currency, &price.quote_currency)?;
    // amount1 over amount0, whichever side of the price currency1 is on
    let sqrt_ratio_x96: U160 = if sorted {
        encode_sqrt_ratio_x96(price.numerator, price.denominator)
    } else {
        encode_sqrt_ratio_x96(price.denominator, price.numerator)
    };
    let tick = tick_at_sqrt_ratio(sqrt_ratio_x96)?;
    let next_tick_price = tick_to_price(
        price.base_currency.clone(),
        price.quote_currency.clone(),
        tick + 1,
    )?;
    // a price read in reverse falls as ticks rise
    let reached = match price.cmp(&next_tick_price) {
        Ordering::Equal => true,
        Ordering::Greater => sorted,
        Ordering::Less => !sorted,
    };
    Ok(if reached { tick + 1 } else { tick })
}
