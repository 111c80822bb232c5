use crate::{
    entities::{Pool, TickDataProvider},
    error::Error,
};
use uniswap_sdk_core::prelude::{BaseCurrency, Currency, CurrencyAmount};

/// Re-tags an amount with the currency the pool actually holds, mapping between the native
/// currency and its wrapped token where needed.
#[inline]
pub fn amount_with_path_currency<TP: TickDataProvider>(
    amount: &CurrencyAmount<impl BaseCurrency>,
    pool: &Pool<TP>,
) -> Result<CurrencyAmount<Currency>, Error> {
    Ok(CurrencyAmount::from_fractional_amount(
        get_path_currency(&amount.currency, pool)?,
        amount.numerator,
        amount.denominator,
    )?)
}

/// Returns the pool currency that corresponds to `currency`: the currency itself, its
/// wrapped token, or the native currency whose wrapped token it is.
#[inline]
pub fn get_path_currency<TP: TickDataProvider>(
    currency: &impl BaseCurrency,
    pool: &Pool<TP>,
) -> Result<Currency, Error> {
    if currency.equals(&pool.currency0) {
        Ok(pool.currency0.clone())
    } else if currency.equals(&pool.currency1) {
        Ok(pool.currency1.clone())
    } else if pool.involves_currency(currency.wrapped()) {
        Ok(Currency::Token(currency.wrapped().clone()))
    } else if pool.currency0.wrapped().equals(currency) {
        Ok(pool.currency0.clone())
    } else if pool.currency1.wrapped().equals(currency) {
        Ok(pool.currency1.clone())
    } else {
        Err(Error::InvalidCurrency)
    }
}
