use crate::error::Error;
use uniswap_sdk_core::prelude::BaseCurrency;

/// Whether `currency_a` sorts before `currency_b` in a pool key. The native currency sorts
/// before every token, tokens sort by address.
#[inline]
pub fn sorts_before(
    currency_a: &impl BaseCurrency,
    currency_b: &impl BaseCurrency,
) -> Result<bool, Error> {
    if currency_a.chain_id() != currency_b.chain_id() {
        return Err(Error::ChainIdMismatch);
    }
    match (currency_a.is_native(), currency_b.is_native()) {
        (true, true) => Err(Error::SameCurrency),
        (true, false) => Ok(true),
        (false, true) => Ok(false),
        (false, false) if currency_a.equals(currency_b) => Err(Error::SameCurrency),
        (false, false) => Ok(currency_a.wrapped().sorts_before(currency_b.wrapped())?),
    }
}
