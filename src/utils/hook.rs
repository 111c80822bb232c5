//! Hook permissions are encoded in the low 14 bits of the hook contract's address.

use alloy_primitives::Address;

/// Bit index of each hook callback in the address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HookOptions {
    AfterRemoveLiquidityReturnsDelta = 0,
    AfterAddLiquidityReturnsDelta = 1,
    AfterSwapReturnsDelta = 2,
    BeforeSwapReturnsDelta = 3,
    AfterDonate = 4,
    BeforeDonate = 5,
    AfterSwap = 6,
    BeforeSwap = 7,
    AfterRemoveLiquidity = 8,
    BeforeRemoveLiquidity = 9,
    AfterAddLiquidity = 10,
    BeforeAddLiquidity = 11,
    AfterInitialize = 12,
    BeforeInitialize = 13,
}

const PERMISSION_MASK: u16 = (1 << 14) - 1;

/// Returns the permission bits of a hook address.
#[inline]
#[must_use]
pub const fn permission_flags(address: Address) -> u16 {
    let bytes = address.0 .0;
    u16::from_be_bytes([bytes[18], bytes[19]]) & PERMISSION_MASK
}

#[inline]
#[must_use]
pub const fn has_permission(address: Address, hook_option: HookOptions) -> bool {
    permission_flags(address) & (1 << hook_option as u8) != 0
}

/// Whether the hook runs around swaps.
#[inline]
#[must_use]
pub const fn has_swap_permissions(address: Address) -> bool {
    has_permission(address, HookOptions::BeforeSwap)
        || has_permission(address, HookOptions::AfterSwap)
}
