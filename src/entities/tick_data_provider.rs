use crate::error::Error;
use alloc::{sync::Arc, vec::Vec};
use derive_more::Deref;
use uniswap_v3_sdk::prelude::{
    Error as V3Error, NoTickDataProvider, Tick, TickList, MAX_TICK_I32, MIN_TICK_I32,
};

/// Provides the initialized ticks a swap walks through.
///
/// Lookups are synchronous: a swap is a plain loop over in-memory state, so providers are
/// expected to hold their ticks rather than fetch them.
pub trait TickDataProvider {
    /// Returns the next initialized tick at or below `tick` when `lte`, or strictly above it
    /// otherwise, along with whether it is initialized. When no such tick exists the protocol
    /// bound in that direction is returned as uninitialized.
    fn next_initialized_tick_index(&self, tick: i32, lte: bool) -> Result<(i32, bool), Error>;

    fn get_tick(&self, tick: i32) -> Result<Tick, Error>;
}

/// Pools built with [`NoTickDataProvider`] can be priced but never swapped through.
impl TickDataProvider for NoTickDataProvider {
    #[inline]
    fn next_initialized_tick_index(&self, _: i32, _: bool) -> Result<(i32, bool), Error> {
        Err(V3Error::NoTickDataError.into())
    }

    #[inline]
    fn get_tick(&self, _: i32) -> Result<Tick, Error> {
        Err(V3Error::NoTickDataError.into())
    }
}

/// An in-memory, sorted list of initialized ticks. Clones share the list.
#[derive(Clone, Debug, PartialEq, Eq, Deref)]
pub struct TickListDataProvider(Arc<[Tick]>);

impl TickListDataProvider {
    /// Validates and wraps a tick list. Ticks must be strictly ascending, within the protocol
    /// bounds and aligned to `tick_spacing`, and their net liquidity must sum to zero.
    #[inline]
    pub fn new(ticks: Vec<Tick>, tick_spacing: i32) -> Result<Self, Error> {
        if tick_spacing <= 0 {
            return Err(Error::InvalidTickSpacing);
        }
        let aligned = ticks.iter().all(|tick| {
            tick.index % tick_spacing == 0 && (MIN_TICK_I32..=MAX_TICK_I32).contains(&tick.index)
        });
        let sorted = ticks.windows(2).all(|pair| pair[0].index < pair[1].index);
        let net = ticks
            .iter()
            .try_fold(0_i128, |sum, tick| sum.checked_add(tick.liquidity_net));
        if !aligned || !sorted || net != Some(0) {
            return Err(Error::InvalidTickList);
        }
        Ok(Self(ticks.into()))
    }
}

impl TickDataProvider for TickListDataProvider {
    #[inline]
    fn next_initialized_tick_index(&self, tick: i32, lte: bool) -> Result<(i32, bool), Error> {
        let ticks: &[Tick] = self;
        // the list lookups below expect a tick on the searched side
        if lte {
            if ticks.is_empty() || ticks.is_below_smallest(tick) {
                return Ok((MIN_TICK_I32, false));
            }
        } else if ticks.is_empty() || ticks.is_at_or_above_largest(tick) {
            return Ok((MAX_TICK_I32, false));
        }
        Ok((ticks.next_initialized_tick(tick, lte)?.index, true))
    }

    #[inline]
    fn get_tick(&self, tick: i32) -> Result<Tick, Error> {
        self.binary_search_by_key(&tick, |t| t.index)
            .map(|i| self[i])
            .map_err(|_| Error::TickNotFound(tick))
    }
}
