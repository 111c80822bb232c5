use uniswap_sdk_core::prelude::{Address, BaseCurrency};

/// The address a currency is keyed by on chain, the zero address for the native currency.
#[inline]
pub fn to_address(currency: &impl BaseCurrency) -> Address {
    if currency.is_native() {
        Address::ZERO
    } else {
        currency.address()
    }
}
