use super::currency_map::to_address;
use crate::entities::{Pool, Route, TickDataProvider};
use alloc::vec::Vec;
use alloy_primitives::{aliases::I24, Bytes, U256};
use alloy_sol_types::sol;
use uniswap_sdk_core::prelude::{BaseCurrency, Currency};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct PathKey {
        address intermediateCurrency;
        uint256 fee;
        int24 tickSpacing;
        address hooks;
        bytes hookData;
    }
}

/// Encodes a route as the path keys a router consumes, one per pool in route order.
///
/// An exact input path names the currency each pool pays out. An exact output path is read
/// from the output end, so each key names the currency paid into its pool instead.
#[inline]
pub fn encode_route_to_path<TInput, TOutput, TP>(
    route: &Route<TInput, TOutput, TP>,
    exact_output: bool,
) -> Vec<PathKey>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    route
        .pools
        .iter()
        .zip(route.currency_path.windows(2))
        .map(|(pool, hop)| {
            let intermediate = if exact_output { &hop[0] } else { &hop[1] };
            path_key(pool, intermediate)
        })
        .collect()
}

#[inline]
fn path_key<TP: TickDataProvider>(pool: &Pool<TP>, intermediate: &Currency) -> PathKey {
    PathKey {
        intermediateCurrency: to_address(intermediate),
        fee: U256::from(pool.fee),
        // pool construction rejects spacings that do not fit in 24 bits
        tickSpacing: I24::try_from(pool.tick_spacing).unwrap_or(I24::MAX),
        hooks: pool.hooks,
        hookData: Bytes::default(),
    }
}
