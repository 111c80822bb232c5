/// Fees are expressed in hundredths of a bip, so this is 100%.
pub const MAX_FEE_PIPS: u32 = 1_000_000;

/// Marks a pool whose fee is set by its hook.
pub const DYNAMIC_FEE_FLAG: u32 = 0x800000;
