use crate::{
    entities::{Pool, TickDataProvider},
    error::Error,
    utils::get_path_currency,
};
use alloc::vec::Vec;
use alloy_primitives::ChainId;
use uniswap_sdk_core::prelude::{BaseCurrency, Currency, Price};

/// Represents a list of pools through which a swap can occur
#[derive(Clone, PartialEq, Debug)]
pub struct Route<TInput, TOutput, TP>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    pub pools: Vec<Pool<TP>>,
    /// The pool currencies visited by the route, from `path_input` to `path_output`
    pub currency_path: Vec<Currency>,
    /// The input currency
    pub input: TInput,
    /// The output currency
    pub output: TOutput,
    /// equivalent or wrapped/unwrapped input to match pool
    pub path_input: Currency,
    /// equivalent or wrapped/unwrapped output to match pool
    pub path_output: Currency,
    _mid_price: Option<Price<TInput, TOutput>>,
}

impl<TInput, TOutput, TP> Route<TInput, TOutput, TP>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    /// Creates an instance of route.
    ///
    /// ## Arguments
    ///
    /// * `pools`: An array of [`Pool`] objects, ordered by the route the swap will take
    /// * `input`: The input currency
    /// * `output`: The output currency
    #[inline]
    pub fn new(pools: Vec<Pool<TP>>, input: TInput, output: TOutput) -> Result<Self, Error> {
        let (first, last) = match (pools.first(), pools.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::EmptyRoute),
        };
        let chain_id = first.chain_id();
        if pools.iter().any(|pool| pool.chain_id() != chain_id) {
            return Err(Error::ChainIdMismatch);
        }

        // the input and output may be the native or wrapped equivalent of a pool currency
        let path_input = get_path_currency(&input, first).map_err(|_| Error::InputNotInvolved)?;
        let path_output =
            get_path_currency(&output, last).map_err(|_| Error::OutputNotInvolved)?;

        let mut currency_path: Vec<Currency> = Vec::with_capacity(pools.len() + 1);
        currency_path.push(path_input.clone());
        for pool in &pools {
            let current = &currency_path[currency_path.len() - 1];
            let next = if current.equals(&pool.currency0) {
                pool.currency1.clone()
            } else if current.equals(&pool.currency1) {
                pool.currency0.clone()
            } else {
                return Err(Error::PathNotContinuous);
            };
            currency_path.push(next);
        }
        if !currency_path[pools.len()].equals(&path_output) {
            return Err(Error::PathNotContinuous);
        }

        Ok(Self {
            pools,
            currency_path,
            input,
            output,
            path_input,
            path_output,
            _mid_price: None,
        })
    }

    #[inline]
    pub fn chain_id(&self) -> ChainId {
        self.pools[0].chain_id()
    }

    /// Returns the mid price of the route
    #[inline]
    pub fn mid_price(&self) -> Result<Price<TInput, TOutput>, Error> {
        let mut price = self.pools[0].price_of(&self.path_input)?.clone();
        for (pool, currency) in self.pools[1..].iter().zip(&self.currency_path[1..]) {
            price = price.multiply(pool.price_of(currency)?)?;
        }
        Ok(Price::new(
            self.input.clone(),
            self.output.clone(),
            price.denominator,
            price.numerator,
        ))
    }

    /// Returns the cached mid price of the route
    #[inline]
    pub fn mid_price_cached(&mut self) -> Result<Price<TInput, TOutput>, Error> {
        if let Some(mid_price) = &self._mid_price {
            return Ok(mid_price.clone());
        }
        let mid_price = self.mid_price()?;
        self._mid_price = Some(mid_price.clone());
        Ok(mid_price)
    }
}
