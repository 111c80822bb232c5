use uniswap_sdk_core::error::Error as CoreError;
use uniswap_v3_sdk::error::Error as V3Error;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum Error {
    /// Thrown when an error occurs in the core library.
    #[cfg_attr(feature = "std", error("{0}"))]
    Core(CoreError),

    /// Thrown when an error occurs in the v3 library, e.g. tick math or a tick list lookup.
    #[cfg_attr(feature = "std", error("{0}"))]
    V3(V3Error),

    /// Fee is not below 100% in pips and is not the dynamic fee flag.
    #[cfg_attr(feature = "std", error("fee {0} is too high"))]
    FeeTooHigh(u32),

    /// The dynamic fee flag requires a hook to set the fee.
    #[cfg_attr(feature = "std", error("dynamic fee pool without a hook"))]
    DynamicFeeWithoutHook,

    #[cfg_attr(feature = "std", error("tick spacing must be positive"))]
    InvalidTickSpacing,

    #[cfg_attr(feature = "std", error("currency0 and currency1 are the same"))]
    SameCurrency,

    #[cfg_attr(feature = "std", error("currencies are on different chains"))]
    ChainIdMismatch,

    #[cfg_attr(feature = "std", error("currency is not in the pool"))]
    InvalidCurrency,

    /// The sqrt price does not lie within the range of the current tick.
    #[cfg_attr(feature = "std", error("sqrt price is outside the current tick"))]
    InvalidPriceBounds,

    #[cfg_attr(feature = "std", error("price limit out of range"))]
    PriceLimitOutOfRange,

    /// The pool has a hook that alters swap accounting.
    #[cfg_attr(feature = "std", error("unsupported hook"))]
    UnsupportedHook,

    #[cfg_attr(feature = "std", error("insufficient liquidity"))]
    InsufficientLiquidity,

    #[cfg_attr(feature = "std", error("overflow"))]
    Overflow,

    /// The tick list is unsorted or off the spacing, or its net liquidity is not zero.
    #[cfg_attr(feature = "std", error("invalid tick list"))]
    InvalidTickList,

    #[cfg_attr(feature = "std", error("tick {0} not found"))]
    TickNotFound(i32),

    #[cfg_attr(feature = "std", error("route has no pools"))]
    EmptyRoute,

    #[cfg_attr(feature = "std", error("input currency is not in the first pool"))]
    InputNotInvolved,

    #[cfg_attr(feature = "std", error("output currency is not in the last pool"))]
    OutputNotInvolved,

    #[cfg_attr(feature = "std", error("route path is not continuous"))]
    PathNotContinuous,

    #[cfg_attr(feature = "std", error("input currency mismatch"))]
    InputCurrencyMismatch,

    #[cfg_attr(feature = "std", error("output currency mismatch"))]
    OutputCurrencyMismatch,

    #[cfg_attr(feature = "std", error("pools are duplicated across swaps"))]
    DuplicatePools,

    #[cfg_attr(feature = "std", error("trade has no swaps"))]
    NoSwaps,

    #[cfg_attr(feature = "std", error("trade has multiple routes"))]
    MultipleRoutes,

    #[cfg_attr(feature = "std", error("slippage tolerance is negative"))]
    InvalidSlippageTolerance,

    #[cfg_attr(feature = "std", error("no pools to search"))]
    NoPools,

    #[cfg_attr(feature = "std", error("max hops must be positive"))]
    InvalidMaxHops,

    /// A recursive search step was entered without a path to extend.
    #[cfg_attr(feature = "std", error("invalid recursion"))]
    InvalidRecursion,

    #[cfg_attr(feature = "std", error("max size must be positive"))]
    InvalidMaxSize,
}

impl From<CoreError> for Error {
    #[inline]
    fn from(error: CoreError) -> Self {
        Self::Core(error)
    }
}

impl From<V3Error> for Error {
    #[inline]
    fn from(error: V3Error) -> Self {
        Self::V3(error)
    }
}

impl Error {
    /// Whether the error means a pool cannot serve this particular swap, as opposed to a
    /// malformed input or a failing data source.
    #[inline]
    #[must_use]
    pub const fn is_pool_unusable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientLiquidity
                | Self::UnsupportedHook
                | Self::PriceLimitOutOfRange
                | Self::V3(V3Error::InsufficientLiquidity)
        )
    }
}
