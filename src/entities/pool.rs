use crate::{
    constants::{DYNAMIC_FEE_FLAG, MAX_FEE_PIPS},
    entities::TickDataProvider,
    error::Error,
    utils::{
        get_path_currency, has_swap_permissions,
        price_tick_conversions::{ratio_x192, sqrt_ratio_at_tick, tick_at_sqrt_ratio},
        sorts_before, to_address,
    },
};
use alloy_primitives::{
    aliases::{I24, U24},
    keccak256, Address, ChainId, B256, I256, U160, U256,
};
use alloy_sol_types::SolValue;
use uniswap_sdk_core::prelude::{
    BaseCurrency, BaseCurrencyCore, Currency, CurrencyAmount, FractionBase, FromBig, Price, ToBig,
};
use uniswap_v3_sdk::prelude::{
    add_delta, compute_swap_step, NoTickDataProvider, MAX_SQRT_RATIO, MAX_TICK_I32,
    MIN_SQRT_RATIO, MIN_TICK_I32, Q192,
};

/// The on-chain key of a pool, with the native currency as the zero address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolKey {
    pub currency0: Address,
    pub currency1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
    pub hooks: Address,
}

/// The raw outcome of simulating a swap against a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResult {
    /// Negative output for exact input swaps, positive input for exact output swaps
    pub amount_calculated: I256,
    pub sqrt_price_x96: U160,
    pub liquidity: u128,
    pub tick_current: i32,
    /// The part of the specified amount the pool could not fill
    pub amount_specified_remaining: I256,
    pub initialized_tick_crossings: u32,
}

/// A quote for swapping a currency amount through a pool.
#[derive(Clone, Debug, PartialEq)]
pub struct SwapQuote<TP: TickDataProvider> {
    /// The output of an exact input swap, or the input of an exact output swap
    pub amount: CurrencyAmount<Currency>,
    /// The unfilled part of the specified amount, zero unless the pool ran out of liquidity
    pub remaining: CurrencyAmount<Currency>,
    /// The pool after the swap
    pub pool: Pool<TP>,
    pub initialized_tick_crossings: u32,
}

/// Running state of the swap loop, threaded through each step.
#[derive(Clone, Copy, Debug)]
struct SwapState {
    amount_specified_remaining: I256,
    amount_calculated: I256,
    sqrt_price_x96: U160,
    tick: i32,
    liquidity: u128,
    initialized_tick_crossings: u32,
}

/// A snapshot of a V4 pool. Swapping never mutates a pool, it returns a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Pool<TP = NoTickDataProvider>
where
    TP: TickDataProvider,
{
    pub currency0: Currency,
    pub currency1: Currency,
    pub fee: u32,
    pub tick_spacing: i32,
    pub sqrt_price_x96: U160,
    pub hooks: Address,
    pub liquidity: u128,
    pub tick_current: i32,
    pub tick_data_provider: TP,
    pub pool_key: PoolKey,
    pub pool_id: B256,
    token0_price: Price<Currency, Currency>,
    token1_price: Price<Currency, Currency>,
}

#[inline]
fn sort_currencies<'a>(
    currency_a: &'a Currency,
    currency_b: &'a Currency,
) -> Result<(&'a Currency, &'a Currency), Error> {
    Ok(if sorts_before(currency_a, currency_b)? {
        (currency_a, currency_b)
    } else {
        (currency_b, currency_a)
    })
}

#[inline]
fn to_i256(value: U256) -> Result<I256, Error> {
    I256::try_from(value).map_err(|_| Error::Overflow)
}

/// The raw part of an amount as a swap amount, which must be non-negative and fit an `I256`.
#[inline]
fn amount_specified(amount: &CurrencyAmount<impl BaseCurrency>) -> Result<I256, Error> {
    let raw = amount.quotient();
    if raw.is_negative() || raw > I256::MAX.to_big_int() {
        return Err(Error::Overflow);
    }
    Ok(I256::from_big_int(raw))
}

impl Pool {
    /// Constructs a pool without tick data, which can quote prices but not swap.
    ///
    /// ## Arguments
    ///
    /// * `currency_a`: One of the currencies in the pool
    /// * `currency_b`: The other currency in the pool
    /// * `fee`: The fee in hundredths of a bips of the input amount of every swap that is
    ///   collected by the pool, or [`DYNAMIC_FEE_FLAG`]
    /// * `tick_spacing`: The tick spacing of the pool
    /// * `hooks`: The address of the hook contract
    /// * `sqrt_price_x96`: The sqrt of the current ratio of amounts of currency1 to currency0
    /// * `liquidity`: The current value of in range liquidity
    #[inline]
    pub fn new(
        currency_a: Currency,
        currency_b: Currency,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
        sqrt_price_x96: U160,
        liquidity: u128,
    ) -> Result<Self, Error> {
        Self::new_with_tick_data_provider(
            currency_a,
            currency_b,
            fee,
            tick_spacing,
            hooks,
            sqrt_price_x96,
            liquidity,
            NoTickDataProvider,
        )
    }

    /// Returns the key of the pool with the given parameters, in canonical currency order.
    #[inline]
    pub fn get_pool_key(
        currency_a: &Currency,
        currency_b: &Currency,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
    ) -> Result<PoolKey, Error> {
        PoolKey::new(currency_a, currency_b, fee, tick_spacing, hooks)
    }

    /// Returns the id of the pool with the given parameters, the hash of its ABI encoded key.
    #[inline]
    pub fn get_pool_id(
        currency_a: &Currency,
        currency_b: &Currency,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
    ) -> Result<B256, Error> {
        PoolKey::new(currency_a, currency_b, fee, tick_spacing, hooks)?.pool_id()
    }
}

impl PoolKey {
    #[inline]
    pub fn new(
        currency_a: &Currency,
        currency_b: &Currency,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
    ) -> Result<Self, Error> {
        let (currency0, currency1) = sort_currencies(currency_a, currency_b)?;
        Ok(Self {
            currency0: to_address(currency0),
            currency1: to_address(currency1),
            fee,
            tick_spacing,
            hooks,
        })
    }

    /// keccak256 of `abi.encode(currency0, currency1, uint24 fee, int24 tickSpacing, hooks)`
    #[inline]
    pub fn pool_id(&self) -> Result<B256, Error> {
        let fee = U24::try_from(self.fee).map_err(|_| Error::FeeTooHigh(self.fee))?;
        let tick_spacing =
            I24::try_from(self.tick_spacing).map_err(|_| Error::InvalidTickSpacing)?;
        Ok(keccak256(
            (
                self.currency0,
                self.currency1,
                fee,
                tick_spacing,
                self.hooks,
            )
                .abi_encode(),
        ))
    }
}

impl<TP: TickDataProvider> Pool<TP> {
    /// Constructs a pool whose current tick is derived from its price.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_tick_data_provider(
        currency_a: Currency,
        currency_b: Currency,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
        sqrt_price_x96: U160,
        liquidity: u128,
        tick_data_provider: TP,
    ) -> Result<Self, Error> {
        let tick_current = tick_at_sqrt_ratio(sqrt_price_x96)?;
        Self::new_with_tick(
            currency_a,
            currency_b,
            fee,
            tick_spacing,
            hooks,
            sqrt_price_x96,
            liquidity,
            tick_current,
            tick_data_provider,
        )
    }

    /// Constructs a pool from its full state. The price must lie between the sqrt ratios of
    /// `tick_current` and `tick_current + 1`, both inclusive.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_tick(
        currency_a: Currency,
        currency_b: Currency,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
        sqrt_price_x96: U160,
        liquidity: u128,
        tick_current: i32,
        tick_data_provider: TP,
    ) -> Result<Self, Error> {
        if fee == DYNAMIC_FEE_FLAG {
            if hooks.is_zero() {
                return Err(Error::DynamicFeeWithoutHook);
            }
        } else if fee >= MAX_FEE_PIPS {
            return Err(Error::FeeTooHigh(fee));
        }
        if tick_spacing <= 0 {
            return Err(Error::InvalidTickSpacing);
        }

        let lower = sqrt_ratio_at_tick(tick_current)?;
        let upper = if tick_current == MAX_TICK_I32 {
            MAX_SQRT_RATIO
        } else {
            sqrt_ratio_at_tick(tick_current + 1)?
        };
        if sqrt_price_x96 < lower || sqrt_price_x96 > upper {
            return Err(Error::InvalidPriceBounds);
        }

        let (currency0, currency1) = {
            let (currency0, currency1) = sort_currencies(&currency_a, &currency_b)?;
            (currency0.clone(), currency1.clone())
        };
        let pool_key = PoolKey::new(&currency0, &currency1, fee, tick_spacing, hooks)?;
        let pool_id = pool_key.pool_id()?;

        let price_x192 = ratio_x192(sqrt_price_x96);
        let q192 = Q192.to_big_int();
        let token0_price = Price::new(currency0.clone(), currency1.clone(), q192, price_x192);
        let token1_price = token0_price.invert();

        Ok(Self {
            currency0,
            currency1,
            fee,
            tick_spacing,
            sqrt_price_x96,
            hooks,
            liquidity,
            tick_current,
            tick_data_provider,
            pool_key,
            pool_id,
            token0_price,
            token1_price,
        })
    }

    /// Returns true if the currency is either currency0 or currency1
    #[inline]
    pub fn involves_currency(&self, currency: &impl BaseCurrency) -> bool {
        self.currency0.equals(currency) || self.currency1.equals(currency)
    }

    /// Like [`Self::involves_currency`], but also matches a currency against the wrapped form of
    /// the pool's currencies. Used for native and wrapped native connections in mixed routes.
    #[inline]
    pub fn v4_involves_token(&self, currency: &impl BaseCurrency) -> bool {
        let wrapped = currency.wrapped();
        self.involves_currency(currency)
            || wrapped.equals(&self.currency0)
            || wrapped.equals(&self.currency1)
            || wrapped.equals(self.currency0.wrapped())
            || wrapped.equals(self.currency1.wrapped())
    }

    /// The price of currency0 in terms of currency1, `sqrt_price_x96^2 / 2^192`.
    #[inline]
    pub const fn token0_price(&self) -> &Price<Currency, Currency> {
        &self.token0_price
    }

    /// The price of currency1 in terms of currency0.
    #[inline]
    pub const fn token1_price(&self) -> &Price<Currency, Currency> {
        &self.token1_price
    }

    /// Returns the price of the given currency in terms of the other currency in the pool.
    #[inline]
    pub fn price_of(&self, currency: &impl BaseCurrency) -> Result<&Price<Currency, Currency>, Error> {
        if self.currency0.equals(currency) {
            Ok(self.token0_price())
        } else if self.currency1.equals(currency) {
            Ok(self.token1_price())
        } else {
            Err(Error::InvalidCurrency)
        }
    }

    #[inline]
    pub fn chain_id(&self) -> ChainId {
        self.currency0.chain_id()
    }

    #[inline]
    fn hook_impacts_swap(&self) -> bool {
        has_swap_permissions(self.hooks) || self.fee == DYNAMIC_FEE_FLAG
    }

    /// Simulates a swap against the pool's tick data.
    ///
    /// ## Arguments
    ///
    /// * `zero_for_one`: Whether the amount in is currency0 or currency1
    /// * `amount_specified`: The amount of the swap, which implicitly configures the swap as
    ///   exact input (non-negative), or exact output (negative)
    /// * `sqrt_price_limit_x96`: The Q64.96 sqrt price limit. If zero for one, the price cannot
    ///   be less than this value after the swap. If one for zero, the price cannot be greater
    ///   than this value after the swap
    #[inline]
    pub fn swap(
        &self,
        zero_for_one: bool,
        amount_specified: I256,
        sqrt_price_limit_x96: Option<U160>,
    ) -> Result<SwapResult, Error> {
        if self.hook_impacts_swap() {
            return Err(Error::UnsupportedHook);
        }
        let sqrt_price_limit_x96 = sqrt_price_limit_x96.unwrap_or(if zero_for_one {
            MIN_SQRT_RATIO + U160::ONE
        } else {
            MAX_SQRT_RATIO - U160::ONE
        });
        let limit_in_range = if zero_for_one {
            sqrt_price_limit_x96 >= MIN_SQRT_RATIO && sqrt_price_limit_x96 < self.sqrt_price_x96
        } else {
            sqrt_price_limit_x96 <= MAX_SQRT_RATIO && sqrt_price_limit_x96 > self.sqrt_price_x96
        };
        if !limit_in_range {
            return Err(Error::PriceLimitOutOfRange);
        }

        let exact_input = !amount_specified.is_negative();
        let mut state = SwapState {
            amount_specified_remaining: amount_specified,
            amount_calculated: I256::ZERO,
            sqrt_price_x96: self.sqrt_price_x96,
            tick: self.tick_current,
            liquidity: self.liquidity,
            initialized_tick_crossings: 0,
        };
        while !state.amount_specified_remaining.is_zero()
            && state.sqrt_price_x96 != sqrt_price_limit_x96
        {
            state = self.swap_step(state, zero_for_one, exact_input, sqrt_price_limit_x96)?;
        }

        Ok(SwapResult {
            amount_calculated: state.amount_calculated,
            sqrt_price_x96: state.sqrt_price_x96,
            liquidity: state.liquidity,
            tick_current: state.tick,
            amount_specified_remaining: state.amount_specified_remaining,
            initialized_tick_crossings: state.initialized_tick_crossings,
        })
    }

    /// Swaps up to the next initialized tick or the price limit, whichever comes first.
    #[inline]
    fn swap_step(
        &self,
        state: SwapState,
        zero_for_one: bool,
        exact_input: bool,
        sqrt_price_limit_x96: U160,
    ) -> Result<SwapState, Error> {
        let (tick_next, initialized) = self
            .tick_data_provider
            .next_initialized_tick_index(state.tick, zero_for_one)?;
        let tick_next = tick_next.clamp(MIN_TICK_I32, MAX_TICK_I32);
        let sqrt_price_next_x96 = sqrt_ratio_at_tick(tick_next)?;
        let sqrt_price_target_x96 = if zero_for_one {
            sqrt_price_next_x96.max(sqrt_price_limit_x96)
        } else {
            sqrt_price_next_x96.min(sqrt_price_limit_x96)
        };

        let (sqrt_ratio_next_x96, step_in, step_out, step_fee) = compute_swap_step(
            state.sqrt_price_x96,
            sqrt_price_target_x96,
            state.liquidity,
            state.amount_specified_remaining,
            // construction keeps static fees below 100% in pips
            U24::saturating_from(self.fee),
        )?;
        let amount_in = to_i256(step_in)?
            .checked_add(to_i256(step_fee)?)
            .ok_or(Error::Overflow)?;
        let amount_out = to_i256(step_out)?;
        let (amount_specified_remaining, amount_calculated) = if exact_input {
            (
                state.amount_specified_remaining.checked_sub(amount_in),
                state.amount_calculated.checked_sub(amount_out),
            )
        } else {
            (
                state.amount_specified_remaining.checked_add(amount_out),
                state.amount_calculated.checked_add(amount_in),
            )
        };
        let mut next = SwapState {
            amount_specified_remaining: amount_specified_remaining.ok_or(Error::Overflow)?,
            amount_calculated: amount_calculated.ok_or(Error::Overflow)?,
            sqrt_price_x96: sqrt_ratio_next_x96,
            ..state
        };

        if sqrt_ratio_next_x96 == sqrt_price_next_x96 {
            if initialized {
                let liquidity_net = self.tick_data_provider.get_tick(tick_next)?.liquidity_net;
                // moving leftward, liquidity_net is interpreted as the opposite sign
                let liquidity_net = if zero_for_one {
                    liquidity_net.checked_neg().ok_or(Error::Overflow)?
                } else {
                    liquidity_net
                };
                next.liquidity = add_delta(state.liquidity, liquidity_net)?;
                next.initialized_tick_crossings += 1;
                tracing::trace!(
                    tick = tick_next,
                    liquidity = next.liquidity,
                    "crossed initialized tick"
                );
            }
            next.tick = if zero_for_one { tick_next - 1 } else { tick_next };
        } else if sqrt_ratio_next_x96 != state.sqrt_price_x96 {
            // recompute unless we're on a lower tick boundary and haven't moved
            next.tick = tick_at_sqrt_ratio(sqrt_ratio_next_x96)?;
        }
        Ok(next)
    }
}

impl<TP: Clone + TickDataProvider> Pool<TP> {
    /// The pool state after a swap, revalidated through the constructor.
    #[inline]
    fn with_swap_result(&self, result: &SwapResult) -> Result<Self, Error> {
        Self::new_with_tick(
            self.currency0.clone(),
            self.currency1.clone(),
            self.fee,
            self.tick_spacing,
            self.hooks,
            result.sqrt_price_x96,
            result.liquidity,
            result.tick_current,
            self.tick_data_provider.clone(),
        )
    }

    /// Given an input amount of a currency, returns the computed output amount and the pool
    /// state after the swap. The input may be the native or wrapped counterpart of one of the
    /// pool's currencies.
    ///
    /// ## Arguments
    ///
    /// * `input_amount`: The input amount for which to quote the output amount
    /// * `sqrt_price_limit_x96`: The Q64.96 sqrt price limit
    #[inline]
    pub fn get_output_amount(
        &self,
        input_amount: &CurrencyAmount<impl BaseCurrency>,
        sqrt_price_limit_x96: Option<U160>,
    ) -> Result<SwapQuote<TP>, Error> {
        let input_currency = get_path_currency(&input_amount.currency, self)?;
        let zero_for_one = input_currency.equals(&self.currency0);
        let amount_specified = amount_specified(input_amount)?;

        let result = self.swap(zero_for_one, amount_specified, sqrt_price_limit_x96)?;
        let output_currency = if zero_for_one {
            self.currency1.clone()
        } else {
            self.currency0.clone()
        };
        Ok(SwapQuote {
            amount: CurrencyAmount::from_raw_amount(
                output_currency,
                -result.amount_calculated.to_big_int(),
            )?,
            remaining: CurrencyAmount::from_raw_amount(
                input_currency,
                result.amount_specified_remaining.to_big_int(),
            )?,
            pool: self.with_swap_result(&result)?,
            initialized_tick_crossings: result.initialized_tick_crossings,
        })
    }

    /// Given a desired output amount of a currency, returns the computed input amount and the
    /// pool state after the swap.
    ///
    /// ## Arguments
    ///
    /// * `output_amount`: The output amount for which to quote the input amount
    /// * `sqrt_price_limit_x96`: The Q64.96 sqrt price limit
    #[inline]
    pub fn get_input_amount(
        &self,
        output_amount: &CurrencyAmount<impl BaseCurrency>,
        sqrt_price_limit_x96: Option<U160>,
    ) -> Result<SwapQuote<TP>, Error> {
        let output_currency = get_path_currency(&output_amount.currency, self)?;
        let zero_for_one = output_currency.equals(&self.currency1);
        let amount_specified = -amount_specified(output_amount)?;

        let result = self.swap(zero_for_one, amount_specified, sqrt_price_limit_x96)?;
        let input_currency = if zero_for_one {
            self.currency0.clone()
        } else {
            self.currency1.clone()
        };
        Ok(SwapQuote {
            amount: CurrencyAmount::from_raw_amount(
                input_currency,
                result.amount_calculated.to_big_int(),
            )?,
            remaining: CurrencyAmount::from_raw_amount(
                output_currency,
                -result.amount_specified_remaining.to_big_int(),
            )?,
            pool: self.with_swap_result(&result)?,
            initialized_tick_crossings: result.initialized_tick_crossings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::TickListDataProvider, tests::*};
    use alloy_primitives::{address, b256};
    use uniswap_sdk_core::{
        prelude::{BigInt, Token},
        token,
    };
    use uniswap_v3_sdk::prelude::{encode_sqrt_ratio_x96, Error as V3Error, Tick};

    fn usdc_dai(fee: u32, hooks: Address) -> Result<Pool, Error> {
        Pool::new(
            USDC.clone().into(),
            DAI.clone().into(),
            fee,
            10,
            hooks,
            *SQRT_PRICE_1_1,
            0,
        )
    }

    mod constructor {
        use super::*;

        #[test]
        fn fails_when_the_fee_is_too_high() {
            assert_eq!(
                usdc_dai(1_000_000, Address::ZERO),
                Err(Error::FeeTooHigh(1_000_000))
            );
        }

        #[test]
        fn dynamic_fee_needs_a_hook() {
            assert_eq!(
                usdc_dai(DYNAMIC_FEE_FLAG, Address::ZERO),
                Err(Error::DynamicFeeWithoutHook)
            );
            let hook = address!("fff0000000000000000000000000000000000000");
            assert_eq!(usdc_dai(DYNAMIC_FEE_FLAG, hook).unwrap().fee, DYNAMIC_FEE_FLAG);
        }

        #[test]
        fn fails_when_currencies_are_the_same() {
            assert_eq!(
                Pool::new(
                    USDC.clone().into(),
                    USDC.clone().into(),
                    3000,
                    10,
                    Address::ZERO,
                    *SQRT_PRICE_1_1,
                    0,
                ),
                Err(Error::SameCurrency)
            );
        }

        #[test]
        fn fails_when_currencies_are_on_different_chains() {
            let other = token!(3, "C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", 18);
            assert_eq!(
                Pool::new(
                    USDC.clone().into(),
                    other.into(),
                    3000,
                    10,
                    Address::ZERO,
                    *SQRT_PRICE_1_1,
                    0,
                ),
                Err(Error::ChainIdMismatch)
            );
        }

        #[test]
        fn fails_on_non_positive_tick_spacing() {
            assert_eq!(
                Pool::new(
                    USDC.clone().into(),
                    DAI.clone().into(),
                    3000,
                    0,
                    Address::ZERO,
                    *SQRT_PRICE_1_1,
                    0,
                ),
                Err(Error::InvalidTickSpacing)
            );
        }

        #[test]
        fn fails_when_the_tick_does_not_match_the_price() {
            assert_eq!(
                Pool::new_with_tick(
                    USDC.clone().into(),
                    DAI.clone().into(),
                    3000,
                    10,
                    Address::ZERO,
                    *SQRT_PRICE_1_1,
                    0,
                    1,
                    NoTickDataProvider,
                ),
                Err(Error::InvalidPriceBounds)
            );
            // the price of the next tick is still accepted for the current tick
            let upper = sqrt_ratio_at_tick(1).unwrap();
            assert!(Pool::new_with_tick(
                USDC.clone().into(),
                DAI.clone().into(),
                3000,
                10,
                Address::ZERO,
                upper,
                0,
                0,
                NoTickDataProvider,
            )
            .is_ok());
        }

        #[test]
        fn sorts_the_currencies() {
            let pool = usdc_dai(100, Address::ZERO).unwrap();
            assert_eq!(pool.currency0, Currency::from(DAI.clone()));
            assert_eq!(pool.currency1, Currency::from(USDC.clone()));
            assert_eq!(pool.tick_current, 0);

            let native = Pool::new(
                USDC.clone().into(),
                ETHER.clone().into(),
                500,
                10,
                Address::ZERO,
                *SQRT_PRICE_1_1,
                0,
            )
            .unwrap();
            assert!(native.currency0.is_native());
            assert_eq!(native.pool_key.currency0, Address::ZERO);
        }
    }

    mod pool_id {
        use super::*;

        #[test]
        fn matches_the_on_chain_id() {
            let id = Pool::get_pool_id(
                &USDC.clone().into(),
                &DAI.clone().into(),
                100,
                10,
                Address::ZERO,
            )
            .unwrap();
            assert_eq!(
                id,
                b256!("503fb8d73fd2351c645ae9fea85381bac6b16ea0c2038e14dc1e96d447c8ffbb")
            );
            assert_eq!(USDC_DAI.pool_id, id);
        }

        #[test]
        fn is_invariant_to_currency_order() {
            let a: Currency = TOKEN0.clone().into();
            let b: Currency = ETHER.clone().into();
            let hook = address!("0000000000000000000000000000000000000100");
            assert_eq!(
                Pool::get_pool_id(&a, &b, 3000, 60, hook).unwrap(),
                Pool::get_pool_id(&b, &a, 3000, 60, hook).unwrap()
            );
            assert_eq!(
                Pool::get_pool_key(&a, &b, 3000, 60, hook).unwrap(),
                Pool::get_pool_key(&b, &a, 3000, 60, hook).unwrap()
            );
            assert_ne!(
                Pool::get_pool_id(&a, &b, 3000, 60, hook).unwrap(),
                Pool::get_pool_id(&a, &b, 500, 60, hook).unwrap()
            );
        }
    }

    mod prices {
        use super::*;

        #[test]
        fn token0_and_token1_prices() {
            let pool = Pool::new(
                USDC.clone().into(),
                DAI.clone().into(),
                500,
                10,
                Address::ZERO,
                encode_sqrt_ratio_x96(101e6 as u64, 100e18 as u128),
                0,
            )
            .unwrap();
            assert_eq!(pool.token0_price().to_significant(5, None).unwrap(), "1.01");
            assert_eq!(pool.token1_price().to_significant(5, None).unwrap(), "0.9901");
            assert_eq!(pool.price_of(&*DAI).unwrap(), pool.token0_price());
            assert_eq!(pool.price_of(&*USDC).unwrap(), pool.token1_price());
            assert_eq!(pool.price_of(&*WETH), Err(Error::InvalidCurrency));
        }

        #[test]
        fn involves_currency() {
            let pool = USDC_DAI.clone();
            assert!(pool.involves_currency(&*USDC));
            assert!(pool.involves_currency(&*DAI));
            assert!(!pool.involves_currency(&*WETH));
        }

        #[test]
        fn v4_involves_token_matches_native_and_wrapped() {
            let eth_pool = Pool::new(
                ETHER.clone().into(),
                USDC.clone().into(),
                500,
                10,
                Address::ZERO,
                *SQRT_PRICE_1_1,
                0,
            )
            .unwrap();
            assert!(!eth_pool.involves_currency(&*WETH));
            assert!(eth_pool.v4_involves_token(&*WETH));
            assert!(eth_pool.v4_involves_token(&*ETHER));
            assert!(!eth_pool.v4_involves_token(&*DAI));
        }
    }

    mod swap {
        use super::*;

        fn pool_with_liquidity(hooks: Address) -> Pool<TickListDataProvider> {
            Pool::new_with_tick_data_provider(
                USDC.clone().into(),
                DAI.clone().into(),
                500,
                10,
                hooks,
                *SQRT_PRICE_1_1,
                ONE_ETHER,
                TickListDataProvider::new(TICK_LIST.clone(), 10).unwrap(),
            )
            .unwrap()
        }

        #[test]
        fn get_output_amount_usdc_to_dai() {
            let pool = pool_with_liquidity(Address::ZERO);
            let input = CurrencyAmount::from_raw_amount(USDC.clone(), 100).unwrap();
            let quote = pool.get_output_amount(&input, None).unwrap();
            assert_eq!(quote.amount.currency, Currency::from(DAI.clone()));
            assert_eq!(quote.amount.quotient(), BigInt::from(98));
            assert!(quote.remaining.quotient().is_zero());
            assert_eq!(quote.initialized_tick_crossings, 0);
            assert!(quote.pool.sqrt_price_x96 > pool.sqrt_price_x96);
        }

        #[test]
        fn get_output_amount_dai_to_usdc() {
            let pool = pool_with_liquidity(Address::ZERO);
            let input = CurrencyAmount::from_raw_amount(DAI.clone(), 100).unwrap();
            let quote = pool.get_output_amount(&input, None).unwrap();
            assert_eq!(quote.amount.currency, Currency::from(USDC.clone()));
            assert_eq!(quote.amount.quotient(), BigInt::from(98));
            assert!(quote.pool.sqrt_price_x96 < pool.sqrt_price_x96);
        }

        #[test]
        fn get_input_amount_usdc_to_dai() {
            let pool = pool_with_liquidity(Address::ZERO);
            let output = CurrencyAmount::from_raw_amount(DAI.clone(), 98).unwrap();
            let quote = pool.get_input_amount(&output, None).unwrap();
            assert_eq!(quote.amount.currency, Currency::from(USDC.clone()));
            assert_eq!(quote.amount.quotient(), BigInt::from(100));
            assert!(quote.remaining.quotient().is_zero());
        }

        #[test]
        fn get_input_amount_dai_to_usdc() {
            let pool = pool_with_liquidity(Address::ZERO);
            let output = CurrencyAmount::from_raw_amount(USDC.clone(), 98).unwrap();
            let quote = pool.get_input_amount(&output, None).unwrap();
            assert_eq!(quote.amount.currency, Currency::from(DAI.clone()));
            assert_eq!(quote.amount.quotient(), BigInt::from(100));
        }

        #[test]
        fn rejects_currencies_outside_the_pool() {
            let pool = pool_with_liquidity(Address::ZERO);
            let input = CurrencyAmount::from_raw_amount(WETH.clone(), 100).unwrap();
            assert!(matches!(
                pool.get_output_amount(&input, None),
                Err(Error::InvalidCurrency)
            ));
        }

        #[test]
        fn rejects_hooks_with_swap_permissions() {
            let before_swap = address!("0000000000000000000000000000000000000080");
            let pool = pool_with_liquidity(before_swap);
            assert_eq!(
                pool.swap(true, I256::ONE, None),
                Err(Error::UnsupportedHook)
            );
            // hooks without swap callbacks are simulated normally
            let before_initialize = address!("0000000000000000000000000000000000002000");
            assert!(pool_with_liquidity(before_initialize)
                .swap(true, I256::ONE, None)
                .is_ok());
        }

        #[test]
        fn rejects_price_limits_on_the_wrong_side() {
            let pool = pool_with_liquidity(Address::ZERO);
            assert_eq!(
                pool.swap(true, I256::ONE, Some(pool.sqrt_price_x96)),
                Err(Error::PriceLimitOutOfRange)
            );
            assert_eq!(
                pool.swap(false, I256::ONE, Some(pool.sqrt_price_x96 - U160::ONE)),
                Err(Error::PriceLimitOutOfRange)
            );
            assert_eq!(
                pool.swap(true, I256::ONE, Some(MIN_SQRT_RATIO - U160::ONE)),
                Err(Error::PriceLimitOutOfRange)
            );
            assert_eq!(
                pool.swap(false, I256::ONE, Some(MAX_SQRT_RATIO + U160::ONE)),
                Err(Error::PriceLimitOutOfRange)
            );
        }

        #[test]
        fn stops_at_the_price_limit() {
            let pool = pool_with_liquidity(Address::ZERO);
            let limit = sqrt_ratio_at_tick(-10).unwrap();
            let result = pool
                .swap(true, I256::try_from(ONE_ETHER).unwrap(), Some(limit))
                .unwrap();
            assert_eq!(result.sqrt_price_x96, limit);
            assert!(result.amount_specified_remaining.is_positive());
            assert_eq!(result.tick_current, -10);
        }

        #[test]
        fn pools_without_tick_data_cannot_swap() {
            let input = CurrencyAmount::from_raw_amount(USDC.clone(), 100).unwrap();
            assert!(matches!(
                USDC_DAI.get_output_amount(&input, None),
                Err(Error::V3(V3Error::NoTickDataError))
            ));
        }

        #[test]
        fn crosses_initialized_ticks() {
            let ticks = vec![
                Tick::new(-887270, ONE_ETHER, ONE_ETHER as i128),
                Tick::new(-20, ONE_ETHER, ONE_ETHER as i128),
                Tick::new(20, ONE_ETHER, -(ONE_ETHER as i128)),
                Tick::new(887270, ONE_ETHER, -(ONE_ETHER as i128)),
            ];
            let pool = Pool::new_with_tick_data_provider(
                TOKEN0.clone().into(),
                TOKEN1.clone().into(),
                0,
                10,
                Address::ZERO,
                *SQRT_PRICE_1_1,
                2 * ONE_ETHER,
                TickListDataProvider::new(ticks, 10).unwrap(),
            )
            .unwrap();
            let input = CurrencyAmount::from_raw_amount(TOKEN0.clone(), ONE_ETHER / 10).unwrap();
            let quote = pool.get_output_amount(&input, None).unwrap();
            assert_eq!(quote.initialized_tick_crossings, 1);
            assert_eq!(quote.pool.liquidity, ONE_ETHER);
            assert!(quote.pool.tick_current < -20);
            assert!(quote.remaining.quotient().is_zero());
        }

        #[test]
        fn partial_fill_reports_the_remaining_amount() {
            let ticks = vec![
                Tick::new(-10, ONE_ETHER, ONE_ETHER as i128),
                Tick::new(10, ONE_ETHER, -(ONE_ETHER as i128)),
            ];
            let pool = Pool::new_with_tick_data_provider(
                TOKEN0.clone().into(),
                TOKEN1.clone().into(),
                500,
                10,
                Address::ZERO,
                *SQRT_PRICE_1_1,
                ONE_ETHER,
                TickListDataProvider::new(ticks, 10).unwrap(),
            )
            .unwrap();
            let input = CurrencyAmount::from_raw_amount(TOKEN0.clone(), ONE_ETHER).unwrap();
            let quote = pool.get_output_amount(&input, None).unwrap();
            assert!(!quote.remaining.quotient().is_zero());
            assert_eq!(quote.pool.liquidity, 0);
            assert_eq!(quote.initialized_tick_crossings, 1);
            assert!(quote.amount.quotient() < BigInt::from(ONE_ETHER / 1000));
        }

        fn pool_with_fee(fee: u32) -> Pool<TickListDataProvider> {
            Pool::new_with_tick_data_provider(
                USDC.clone().into(),
                DAI.clone().into(),
                fee,
                10,
                Address::ZERO,
                *SQRT_PRICE_1_1,
                ONE_ETHER,
                TickListDataProvider::new(TICK_LIST.clone(), 10).unwrap(),
            )
            .unwrap()
        }

        proptest::proptest! {
            #[test]
            fn higher_fees_never_pay_more(raw in 1_u64..1_000_000_000_000_000) {
                let input = CurrencyAmount::from_raw_amount(USDC.clone(), raw).unwrap();
                let low = pool_with_fee(500).get_output_amount(&input, None).unwrap();
                let medium =
                    pool_with_fee(3000).get_output_amount(&input, None).unwrap();
                proptest::prop_assert!(low.amount.as_fraction() >= medium.amount.as_fraction());
            }

            #[test]
            fn exact_output_then_exact_input_returns_the_output(
                raw in 1_u64..100_000_000_000_000_000,
                zero_for_one in proptest::bool::ANY,
            ) {
                // liquidity spans the full range, so no tick is crossed
                let pool = pool_with_liquidity(Address::ZERO);
                let currency: Currency =
                    if zero_for_one { DAI.clone().into() } else { USDC.clone().into() };
                let output = CurrencyAmount::from_raw_amount(currency, raw).unwrap();
                let required = pool.get_input_amount(&output, None).unwrap();
                proptest::prop_assert!(required.remaining.quotient().is_zero());
                let bought = pool.get_output_amount(&required.amount, None).unwrap();
                proptest::prop_assert_eq!(bought.amount.quotient(), output.quotient());
                proptest::prop_assert_eq!(bought.amount.currency.clone(), output.currency.clone());
            }

            #[test]
            fn swapping_back_never_returns_more_than_the_input(
                raw in 1_u64..100_000_000_000_000_000,
                zero_for_one in proptest::bool::ANY,
            ) {
                let pool = pool_with_liquidity(Address::ZERO);
                let currency: Currency =
                    if zero_for_one { DAI.clone().into() } else { USDC.clone().into() };
                let input = CurrencyAmount::from_raw_amount(currency, raw).unwrap();
                let there = pool.get_output_amount(&input, None).unwrap();
                let back = there.pool.get_output_amount(&there.amount, None).unwrap();
                proptest::prop_assert!(back.remaining.quotient().is_zero());
                proptest::prop_assert_eq!(back.amount.currency.clone(), input.currency.clone());
                proptest::prop_assert!(back.amount.quotient() <= input.quotient());
            }
        }
    }
}
