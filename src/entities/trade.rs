use crate::{
    entities::{Pool, Route, TickDataProvider},
    error::Error,
    utils::amount_with_path_currency,
};
use alloc::{vec, vec::Vec};
use alloy_primitives::map::HashSet;
use core::cmp::Ordering;
use uniswap_sdk_core::{
    error::Error as CoreError,
    prelude::{
        sorted_insert, BaseCurrency, Currency, CurrencyAmount, Fraction, FractionBase, Percent,
        Price, TradeType,
    },
};

/// Trades comparator, an extension of the input output comparator that also considers other
/// dimensions of the trade in ranking them
///
/// ## Arguments
///
/// * `a`: The first trade to compare
/// * `b`: The second trade to compare
#[inline]
pub fn trade_comparator<TInput, TOutput, TP>(
    a: &Trade<TInput, TOutput, TP>,
    b: &Trade<TInput, TOutput, TP>,
) -> Result<Ordering, Error>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    // must have same input and output currency for comparison
    if !a.input_currency().equals(b.input_currency()) {
        return Err(Error::InputCurrencyMismatch);
    }
    if !a.output_currency().equals(b.output_currency()) {
        return Err(Error::OutputCurrencyMismatch);
    }
    Ok(rank(a, b))
}

/// Ranks trades between the same currencies: more output first, then less input, then fewer hops.
#[inline]
fn rank<TInput, TOutput, TP>(
    a: &Trade<TInput, TOutput, TP>,
    b: &Trade<TInput, TOutput, TP>,
) -> Ordering
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    // each hop costs gas
    b.output_total()
        .cmp(&a.output_total())
        .then_with(|| a.input_total().cmp(&b.input_total()))
        .then_with(|| a.hops().cmp(&b.hops()))
}

#[inline]
fn execution_price_of<TInput: BaseCurrency, TOutput: BaseCurrency>(
    input_amount: CurrencyAmount<TInput>,
    output_amount: CurrencyAmount<TOutput>,
) -> Result<Price<TInput, TOutput>, Error> {
    if input_amount.numerator.is_zero() {
        return Err(CoreError::Invalid("execution price of a zero input").into());
    }
    Ok(Price::from_currency_amounts(input_amount, output_amount))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestTradeOptions {
    /// how many results to return
    pub max_num_results: Option<usize>,
    /// the maximum number of hops a trade should contain
    pub max_hops: Option<usize>,
}

impl Default for BestTradeOptions {
    #[inline]
    fn default() -> Self {
        Self {
            max_num_results: Some(3),
            max_hops: Some(3),
        }
    }
}

/// Represents a swap through a route
#[derive(Clone, PartialEq, Debug)]
pub struct Swap<TInput, TOutput, TP>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    pub route: Route<TInput, TOutput, TP>,
    pub input_amount: CurrencyAmount<TInput>,
    pub output_amount: CurrencyAmount<TOutput>,
}

impl<TInput, TOutput, TP> Swap<TInput, TOutput, TP>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    /// Constructs a swap
    ///
    /// ## Arguments
    ///
    /// * `route`: The route of the swap
    /// * `input_amount`: The amount being passed in
    /// * `output_amount`: The amount returned by the swap
    #[inline]
    pub const fn new(
        route: Route<TInput, TOutput, TP>,
        input_amount: CurrencyAmount<TInput>,
        output_amount: CurrencyAmount<TOutput>,
    ) -> Self {
        Self {
            route,
            input_amount,
            output_amount,
        }
    }

    /// Returns the input currency of the swap
    #[inline]
    pub const fn input_currency(&self) -> &TInput {
        &self.input_amount.meta.currency
    }

    /// Returns the output currency of the swap
    #[inline]
    pub const fn output_currency(&self) -> &TOutput {
        &self.output_amount.meta.currency
    }
}

/// Represents a trade executed against a set of routes where some percentage of the input is split
/// across each route.
///
/// Each route has its own set of pools. Pools can not be re-used across routes.
///
/// Does not account for slippage, i.e., changes in price environment that can occur between the
/// time the trade is submitted and when it is executed.
#[derive(Clone, PartialEq, Debug)]
pub struct Trade<TInput, TOutput, TP>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    /// The swaps of the trade, i.e. which routes and how much is swapped in each that make up the
    /// trade.
    pub swaps: Vec<Swap<TInput, TOutput, TP>>,
    /// The type of the trade, either exact in or exact out.
    pub trade_type: TradeType,
    _input_amount: Option<CurrencyAmount<TInput>>,
    _output_amount: Option<CurrencyAmount<TOutput>>,
    _execution_price: Option<Price<TInput, TOutput>>,
    _price_impact: Option<Percent>,
}

impl<TInput, TOutput, TP> Trade<TInput, TOutput, TP>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: TickDataProvider,
{
    /// Construct a trade by passing in the pre-computed property values
    ///
    /// ## Arguments
    ///
    /// * `swaps`: The routes through which the trade occurs
    /// * `trade_type`: The type of trade, exact input or exact output
    #[inline]
    fn new(swaps: Vec<Swap<TInput, TOutput, TP>>, trade_type: TradeType) -> Result<Self, Error> {
        let first = swaps.first().ok_or(Error::NoSwaps)?;
        let input_currency = first.input_currency().wrapped();
        let output_currency = first.output_currency().wrapped();
        for Swap { route, .. } in &swaps {
            if !input_currency.equals(route.input.wrapped()) {
                return Err(Error::InputCurrencyMismatch);
            }
            if !output_currency.equals(route.output.wrapped()) {
                return Err(Error::OutputCurrencyMismatch);
            }
        }
        let num_pools = swaps
            .iter()
            .map(|swap| swap.route.pools.len())
            .sum::<usize>();
        let pool_ids: HashSet<_> = swaps
            .iter()
            .flat_map(|swap| swap.route.pools.iter())
            .map(|pool| pool.pool_id)
            .collect();
        if pool_ids.len() != num_pools {
            return Err(Error::DuplicatePools);
        }
        Ok(Self {
            swaps,
            trade_type,
            _input_amount: None,
            _output_amount: None,
            _execution_price: None,
            _price_impact: None,
        })
    }

    /// Creates a trade without computing the result of swapping through the route.
    /// Useful when you have simulated the trade elsewhere and do not have any tick data
    #[inline]
    pub fn create_unchecked_trade(
        route: Route<TInput, TOutput, TP>,
        input_amount: CurrencyAmount<TInput>,
        output_amount: CurrencyAmount<TOutput>,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        Self::new(
            vec![Swap::new(route, input_amount, output_amount)],
            trade_type,
        )
    }

    /// Creates a trade without computing the result of swapping through the routes.
    /// Useful when you have simulated the trade elsewhere and do not have any tick data
    #[inline]
    pub fn create_unchecked_trade_with_multiple_routes(
        swaps: Vec<Swap<TInput, TOutput, TP>>,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        Self::new(swaps, trade_type)
    }

    /// When the trade consists of just a single route, this returns the route of the trade.
    #[inline]
    pub fn route(&self) -> Result<&Route<TInput, TOutput, TP>, Error> {
        match self.swaps.as_slice() {
            [swap] => Ok(&swap.route),
            _ => Err(Error::MultipleRoutes),
        }
    }

    /// Returns the input currency of the swap
    #[inline]
    pub fn input_currency(&self) -> &TInput {
        self.swaps[0].input_currency()
    }

    /// Returns the output currency of the swap
    #[inline]
    pub fn output_currency(&self) -> &TOutput {
        self.swaps[0].output_currency()
    }

    /// The number of currencies visited across all swaps, used to break ties between trades.
    #[inline]
    fn hops(&self) -> usize {
        self.swaps
            .iter()
            .map(|swap| swap.route.pools.len() + 1)
            .sum()
    }

    #[inline]
    fn input_total(&self) -> Fraction {
        self.swaps.iter().fold(Fraction::default(), |total, swap| {
            total + swap.input_amount.as_fraction()
        })
    }

    #[inline]
    fn output_total(&self) -> Fraction {
        self.swaps.iter().fold(Fraction::default(), |total, swap| {
            total + swap.output_amount.as_fraction()
        })
    }

    /// The input amount for the trade assuming no slippage.
    #[inline]
    pub fn input_amount(&self) -> Result<CurrencyAmount<TInput>, Error> {
        let total = self.input_total();
        Ok(CurrencyAmount::from_fractional_amount(
            self.input_currency().clone(),
            total.numerator,
            total.denominator,
        )?)
    }

    /// The input amount for the trade assuming no slippage.
    #[inline]
    pub fn input_amount_cached(&mut self) -> Result<CurrencyAmount<TInput>, Error> {
        if let Some(input_amount) = &self._input_amount {
            return Ok(input_amount.clone());
        }
        let input_amount = self.input_amount()?;
        self._input_amount = Some(input_amount.clone());
        Ok(input_amount)
    }

    /// The output amount for the trade assuming no slippage.
    #[inline]
    pub fn output_amount(&self) -> Result<CurrencyAmount<TOutput>, Error> {
        let total = self.output_total();
        Ok(CurrencyAmount::from_fractional_amount(
            self.output_currency().clone(),
            total.numerator,
            total.denominator,
        )?)
    }

    /// The output amount for the trade assuming no slippage.
    #[inline]
    pub fn output_amount_cached(&mut self) -> Result<CurrencyAmount<TOutput>, Error> {
        if let Some(output_amount) = &self._output_amount {
            return Ok(output_amount.clone());
        }
        let output_amount = self.output_amount()?;
        self._output_amount = Some(output_amount.clone());
        Ok(output_amount)
    }

    /// The price expressed in terms of output amount/input amount.
    #[inline]
    pub fn execution_price(&self) -> Result<Price<TInput, TOutput>, Error> {
        execution_price_of(self.input_amount()?, self.output_amount()?)
    }

    /// The price expressed in terms of output amount/input amount.
    #[inline]
    pub fn execution_price_cached(&mut self) -> Result<Price<TInput, TOutput>, Error> {
        if let Some(execution_price) = &self._execution_price {
            return Ok(execution_price.clone());
        }
        let input_amount = self.input_amount_cached()?;
        let output_amount = self.output_amount_cached()?;
        let execution_price = execution_price_of(input_amount, output_amount)?;
        self._execution_price = Some(execution_price.clone());
        Ok(execution_price)
    }

    /// `(spot - actual) / spot`. A trade with no spot output has no impact.
    #[inline]
    fn price_impact_from(
        spot_output_amount: &CurrencyAmount<TOutput>,
        output_amount: &CurrencyAmount<TOutput>,
    ) -> Result<Percent, Error> {
        if spot_output_amount.numerator.is_zero() {
            return Ok(Percent::default());
        }
        let price_impact = spot_output_amount
            .subtract(output_amount)?
            .divide(spot_output_amount)?;
        Ok(Percent::new(
            price_impact.numerator,
            price_impact.denominator,
        ))
    }

    /// Returns the percent difference between the route's mid price and the execution price
    #[inline]
    pub fn price_impact(&self) -> Result<Percent, Error> {
        let mut spot_output_amount =
            CurrencyAmount::from_raw_amount(self.output_currency().clone(), 0)?;
        for Swap {
            route,
            input_amount,
            ..
        } in &self.swaps
        {
            let mid_price = route.mid_price()?;
            spot_output_amount = spot_output_amount.add(&mid_price.quote(input_amount)?)?;
        }
        Self::price_impact_from(&spot_output_amount, &self.output_amount()?)
    }

    /// Returns the percent difference between the route's mid price and the execution price
    #[inline]
    pub fn price_impact_cached(&mut self) -> Result<Percent, Error> {
        if let Some(price_impact) = &self._price_impact {
            return Ok(price_impact.clone());
        }
        let mut spot_output_amount =
            CurrencyAmount::from_raw_amount(self.output_currency().clone(), 0)?;
        for Swap {
            route,
            input_amount,
            ..
        } in &mut self.swaps
        {
            let mid_price = route.mid_price_cached()?;
            spot_output_amount = spot_output_amount.add(&mid_price.quote(input_amount)?)?;
        }
        let output_amount = self.output_amount_cached()?;
        let price_impact = Self::price_impact_from(&spot_output_amount, &output_amount)?;
        self._price_impact = Some(price_impact.clone());
        Ok(price_impact)
    }

    /// Get the minimum amount that must be received from this trade for the given slippage
    /// tolerance, rounded down to a whole raw amount
    ///
    /// ## Arguments
    ///
    /// * `slippage_tolerance`: The tolerance of unfavorable slippage from the execution price of
    ///   this trade
    /// * `amount_out`: The amount to receive
    #[inline]
    pub fn minimum_amount_out(
        &self,
        slippage_tolerance: &Percent,
        amount_out: Option<CurrencyAmount<TOutput>>,
    ) -> Result<CurrencyAmount<TOutput>, Error> {
        if *slippage_tolerance < Percent::default() {
            return Err(Error::InvalidSlippageTolerance);
        }
        let output_amount = match amount_out {
            Some(amount_out) => amount_out,
            None => self.output_amount()?,
        };
        if self.trade_type == TradeType::ExactOutput {
            return Ok(output_amount);
        }
        let factor = (Percent::new(1, 1) + slippage_tolerance.clone()).invert();
        let adjusted = output_amount.multiply(&factor)?;
        Ok(CurrencyAmount::from_raw_amount(
            adjusted.meta.currency.clone(),
            adjusted.quotient(),
        )?)
    }

    /// Get the maximum amount in that can be spent via this trade for the given slippage
    /// tolerance, rounded down to a whole raw amount
    ///
    /// ## Arguments
    ///
    /// * `slippage_tolerance`: The tolerance of unfavorable slippage from the execution price of
    ///   this trade
    /// * `amount_in`: The amount to spend
    #[inline]
    pub fn maximum_amount_in(
        &self,
        slippage_tolerance: &Percent,
        amount_in: Option<CurrencyAmount<TInput>>,
    ) -> Result<CurrencyAmount<TInput>, Error> {
        if *slippage_tolerance < Percent::default() {
            return Err(Error::InvalidSlippageTolerance);
        }
        let input_amount = match amount_in {
            Some(amount_in) => amount_in,
            None => self.input_amount()?,
        };
        if self.trade_type == TradeType::ExactInput {
            return Ok(input_amount);
        }
        let factor = Percent::new(1, 1) + slippage_tolerance.clone();
        let adjusted = input_amount.multiply(&factor)?;
        Ok(CurrencyAmount::from_raw_amount(
            adjusted.meta.currency.clone(),
            adjusted.quotient(),
        )?)
    }

    /// Return the execution price after accounting for slippage tolerance
    ///
    /// ## Arguments
    ///
    /// * `slippage_tolerance`: The allowed tolerated slippage
    #[inline]
    pub fn worst_execution_price(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<Price<TInput, TOutput>, Error> {
        let maximum_amount_in = self.maximum_amount_in(slippage_tolerance, None)?;
        let minimum_amount_out = self.minimum_amount_out(slippage_tolerance, None)?;
        Ok(Price::new(
            self.input_currency().clone(),
            self.output_currency().clone(),
            maximum_amount_in.quotient(),
            minimum_amount_out.quotient(),
        ))
    }
}

impl<TInput, TOutput, TP> Trade<TInput, TOutput, TP>
where
    TInput: BaseCurrency,
    TOutput: BaseCurrency,
    TP: Clone + TickDataProvider,
{
    /// Constructs an exact in trade with the given amount in and route
    ///
    /// ## Arguments
    ///
    /// * `route`: The route of the exact in trade
    /// * `amount_in`: The amount being passed in
    #[inline]
    pub fn exact_in(
        route: Route<TInput, TOutput, TP>,
        amount_in: CurrencyAmount<impl BaseCurrency>,
    ) -> Result<Self, Error> {
        Self::from_route(route, amount_in, TradeType::ExactInput)
    }

    /// Constructs an exact out trade with the given amount out and route
    ///
    /// ## Arguments
    ///
    /// * `route`: The route of the exact out trade
    /// * `amount_out`: The amount returned by the trade
    #[inline]
    pub fn exact_out(
        route: Route<TInput, TOutput, TP>,
        amount_out: CurrencyAmount<impl BaseCurrency>,
    ) -> Result<Self, Error> {
        Self::from_route(route, amount_out, TradeType::ExactOutput)
    }

    /// Constructs a trade by simulating swaps through the given route. Fails with
    /// [`Error::InsufficientLiquidity`] if any pool on the route can only fill part of its leg.
    ///
    /// ## Arguments
    ///
    /// * `route`: The route to swap through
    /// * `amount`: The amount specified, either input or output, depending on `trade_type`
    /// * `trade_type`: Whether the trade is an exact input or exact output swap
    #[inline]
    #[allow(clippy::needless_pass_by_value)]
    pub fn from_route(
        route: Route<TInput, TOutput, TP>,
        amount: CurrencyAmount<impl BaseCurrency>,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                if !amount.currency.equals(&route.input) {
                    return Err(Error::InputCurrencyMismatch);
                }
                // account for trades that wrap/unwrap as a first step
                let mut token_amount = amount_with_path_currency(&amount, &route.pools[0])?;
                for pool in &route.pools {
                    let quote = pool.get_output_amount(&token_amount, None)?;
                    if !quote.remaining.numerator.is_zero() {
                        return Err(Error::InsufficientLiquidity);
                    }
                    token_amount = quote.amount;
                }
                (
                    CurrencyAmount::from_fractional_amount(
                        route.input.clone(),
                        amount.numerator,
                        amount.denominator,
                    )?,
                    CurrencyAmount::from_fractional_amount(
                        route.output.clone(),
                        token_amount.numerator,
                        token_amount.denominator,
                    )?,
                )
            }
            TradeType::ExactOutput => {
                if !amount.currency.equals(&route.output) {
                    return Err(Error::OutputCurrencyMismatch);
                }
                // account for trades that wrap/unwrap as a last step
                let last = &route.pools[route.pools.len() - 1];
                let mut token_amount = amount_with_path_currency(&amount, last)?;
                for pool in route.pools.iter().rev() {
                    let quote = pool.get_input_amount(&token_amount, None)?;
                    if !quote.remaining.numerator.is_zero() {
                        return Err(Error::InsufficientLiquidity);
                    }
                    token_amount = quote.amount;
                }
                (
                    CurrencyAmount::from_fractional_amount(
                        route.input.clone(),
                        token_amount.numerator,
                        token_amount.denominator,
                    )?,
                    CurrencyAmount::from_fractional_amount(
                        route.output.clone(),
                        amount.numerator,
                        amount.denominator,
                    )?,
                )
            }
        };
        Self::new(
            vec![Swap::new(route, input_amount, output_amount)],
            trade_type,
        )
    }

    /// Constructs a trade from routes by simulating swaps
    ///
    /// ## Arguments
    ///
    /// * `routes`: The routes to swap through and how much of the amount should be routed through
    ///   each
    /// * `trade_type`: Whether the trade is an exact input or exact output swap
    #[inline]
    pub fn from_routes(
        routes: Vec<(
            CurrencyAmount<impl BaseCurrency>,
            Route<TInput, TOutput, TP>,
        )>,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        let mut populated_routes: Vec<Swap<TInput, TOutput, TP>> = Vec::with_capacity(routes.len());
        for (amount, route) in routes {
            let trade = Self::from_route(route, amount, trade_type)?;
            populated_routes.extend(trade.swaps);
        }
        Self::new(populated_routes, trade_type)
    }

    /// Given a list of pools, and a fixed amount in, returns the top `max_num_results` trades that
    /// go from an input currency amount to an output currency, making at most `max_hops` hops.
    ///
    /// Pools that cannot serve a swap, because they lack liquidity, have a hook that alters
    /// swap accounting, or cannot move in the required direction, are skipped. Any other error
    /// aborts the search.
    ///
    /// ## Note
    ///
    /// This does not consider aggregation, as routes are linear. It's possible a better route
    /// exists by splitting the amount in among multiple routes.
    ///
    /// ## Arguments
    ///
    /// * `pools`: The pools to consider in finding the best trade
    /// * `currency_amount_in`: The exact amount of input currency to spend
    /// * `currency_out`: The desired currency out
    /// * `best_trade_options`: Maximum number of results to return and maximum number of hops a
    ///   returned trade can make, e.g. 1 hop goes through a single pool
    /// * `current_pools`: Used in recursion; the current list of pools
    /// * `next_amount_in`: Used in recursion; the amount carried out of the last pool
    /// * `best_trades`: Used in recursion; the current list of best trades
    #[inline]
    #[allow(clippy::needless_pass_by_value)]
    pub fn best_trade_exact_in<'a>(
        pools: Vec<Pool<TP>>,
        currency_amount_in: &CurrencyAmount<TInput>,
        currency_out: &TOutput,
        best_trade_options: BestTradeOptions,
        current_pools: Vec<Pool<TP>>,
        next_amount_in: Option<&CurrencyAmount<Currency>>,
        best_trades: &'a mut Vec<Self>,
    ) -> Result<&'a mut Vec<Self>, Error> {
        if pools.is_empty() {
            return Err(Error::NoPools);
        }
        let max_num_results = best_trade_options.max_num_results.unwrap_or(3);
        let max_hops = best_trade_options.max_hops.unwrap_or(3);
        if max_hops == 0 {
            return Err(Error::InvalidMaxHops);
        }
        if max_num_results == 0 {
            return Err(Error::InvalidMaxSize);
        }
        let carried = match next_amount_in {
            None if !current_pools.is_empty() => return Err(Error::InvalidRecursion),
            Some(amount) if current_pools.is_empty() => {
                if !amount.currency.equals(&currency_amount_in.currency)
                    || amount.as_fraction() != currency_amount_in.as_fraction()
                {
                    return Err(Error::InvalidRecursion);
                }
                None
            }
            carried => carried,
        };

        for (i, pool) in pools.iter().enumerate() {
            // pool irrelevant
            let quote = match carried {
                Some(amount_in) => {
                    if !pool.involves_currency(&amount_in.currency) {
                        continue;
                    }
                    pool.get_output_amount(amount_in, None)
                }
                None => {
                    if !pool.v4_involves_token(&currency_amount_in.currency) {
                        continue;
                    }
                    pool.get_output_amount(currency_amount_in, None)
                }
            };
            let amount_out = match quote {
                Ok(quote) if quote.remaining.numerator.is_zero() => quote.amount,
                Ok(_) => {
                    tracing::debug!(pool_id = %pool.pool_id, "skipping pool: partial fill");
                    continue;
                }
                Err(e) if e.is_pool_unusable() => {
                    tracing::debug!(pool_id = %pool.pool_id, error = ?e, "skipping pool");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut next_pools = current_pools.clone();
            next_pools.push(pool.clone());
            // we have arrived at the output currency, so this is the final trade of one of the paths
            if amount_out.currency.wrapped().equals(currency_out.wrapped()) {
                let trade = Self::from_route(
                    Route::new(
                        next_pools,
                        currency_amount_in.currency.clone(),
                        currency_out.clone(),
                    )?,
                    currency_amount_in.clone(),
                    TradeType::ExactInput,
                )?;
                Self::insert_ranked(best_trades, trade, max_num_results)?;
            } else if max_hops > 1 && pools.len() > 1 {
                let pools_excluding_this_pool = pools[..i]
                    .iter()
                    .chain(&pools[i + 1..])
                    .cloned()
                    .collect();
                // otherwise, consider all the other paths that lead from this currency as long as
                // we have not exceeded max_hops
                Self::best_trade_exact_in(
                    pools_excluding_this_pool,
                    currency_amount_in,
                    currency_out,
                    BestTradeOptions {
                        max_num_results: Some(max_num_results),
                        max_hops: Some(max_hops - 1),
                    },
                    next_pools,
                    Some(&amount_out),
                    best_trades,
                )?;
            }
        }
        Ok(best_trades)
    }

    /// Given a list of pools, and a fixed amount out, returns the top `max_num_results` trades that
    /// go from an input currency to an output currency amount, making at most `max_hops` hops.
    ///
    /// Unusable pools are skipped the same way as in [`Self::best_trade_exact_in`].
    ///
    /// ## Arguments
    ///
    /// * `pools`: The pools to consider in finding the best trade
    /// * `currency_in`: The currency to spend
    /// * `currency_amount_out`: The desired currency amount out
    /// * `best_trade_options`: Maximum number of results to return and maximum number of hops a
    ///   returned trade can make, e.g. 1 hop goes through a single pool
    /// * `current_pools`: Used in recursion; the current list of pools
    /// * `next_amount_out`: Used in recursion; the amount the next pool must produce
    /// * `best_trades`: Used in recursion; the current list of best trades
    #[inline]
    #[allow(clippy::needless_pass_by_value)]
    pub fn best_trade_exact_out<'a>(
        pools: Vec<Pool<TP>>,
        currency_in: &TInput,
        currency_amount_out: &CurrencyAmount<TOutput>,
        best_trade_options: BestTradeOptions,
        current_pools: Vec<Pool<TP>>,
        next_amount_out: Option<&CurrencyAmount<Currency>>,
        best_trades: &'a mut Vec<Self>,
    ) -> Result<&'a mut Vec<Self>, Error> {
        if pools.is_empty() {
            return Err(Error::NoPools);
        }
        let max_num_results = best_trade_options.max_num_results.unwrap_or(3);
        let max_hops = best_trade_options.max_hops.unwrap_or(3);
        if max_hops == 0 {
            return Err(Error::InvalidMaxHops);
        }
        if max_num_results == 0 {
            return Err(Error::InvalidMaxSize);
        }
        let carried = match next_amount_out {
            None if !current_pools.is_empty() => return Err(Error::InvalidRecursion),
            Some(amount) if current_pools.is_empty() => {
                if !amount.currency.equals(&currency_amount_out.currency)
                    || amount.as_fraction() != currency_amount_out.as_fraction()
                {
                    return Err(Error::InvalidRecursion);
                }
                None
            }
            carried => carried,
        };

        for (i, pool) in pools.iter().enumerate() {
            // pool irrelevant
            let quote = match carried {
                Some(amount_out) => {
                    if !pool.involves_currency(&amount_out.currency) {
                        continue;
                    }
                    pool.get_input_amount(amount_out, None)
                }
                None => {
                    if !pool.v4_involves_token(&currency_amount_out.currency) {
                        continue;
                    }
                    pool.get_input_amount(currency_amount_out, None)
                }
            };
            let amount_in = match quote {
                Ok(quote) if quote.remaining.numerator.is_zero() => quote.amount,
                Ok(_) => {
                    tracing::debug!(pool_id = %pool.pool_id, "skipping pool: partial fill");
                    continue;
                }
                Err(e) if e.is_pool_unusable() => {
                    tracing::debug!(pool_id = %pool.pool_id, error = ?e, "skipping pool");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut next_pools = vec![pool.clone()];
            next_pools.extend(current_pools.iter().cloned());
            // we have arrived at the input currency, so this is the first trade of one of the paths
            if amount_in.currency.wrapped().equals(currency_in.wrapped()) {
                let trade = Self::from_route(
                    Route::new(
                        next_pools,
                        currency_in.clone(),
                        currency_amount_out.currency.clone(),
                    )?,
                    currency_amount_out.clone(),
                    TradeType::ExactOutput,
                )?;
                Self::insert_ranked(best_trades, trade, max_num_results)?;
            } else if max_hops > 1 && pools.len() > 1 {
                let pools_excluding_this_pool = pools[..i]
                    .iter()
                    .chain(&pools[i + 1..])
                    .cloned()
                    .collect();
                // otherwise, consider all the other paths that arrive at this currency as long as
                // we have not exceeded max_hops
                Self::best_trade_exact_out(
                    pools_excluding_this_pool,
                    currency_in,
                    currency_amount_out,
                    BestTradeOptions {
                        max_num_results: Some(max_num_results),
                        max_hops: Some(max_hops - 1),
                    },
                    next_pools,
                    Some(&amount_in),
                    best_trades,
                )?;
            }
        }
        Ok(best_trades)
    }

    #[inline]
    fn insert_ranked(
        best_trades: &mut Vec<Self>,
        trade: Self,
        max_num_results: usize,
    ) -> Result<(), Error> {
        if best_trades.len() > max_num_results {
            return Err(Error::InvalidMaxSize);
        }
        let hops = trade.hops();
        let evicted = sorted_insert(
            best_trades,
            trade,
            max_num_results,
            rank::<TInput, TOutput, TP>,
        );
        tracing::trace!(
            hops,
            results = best_trades.len(),
            evicted = evicted.is_some(),
            "ranked candidate trade"
        );
        Ok(())
    }
}
