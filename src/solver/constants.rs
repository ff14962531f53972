/// The used-number set is a single `u64` bitmask
pub const MAX_NUMBERS: usize = u64::BITS as usize;

/// Unused numbers a branch must still have before it is worth handing to another worker
pub const SLACK_THRESHOLD: usize = 3;
