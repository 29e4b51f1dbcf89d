//! Exit codes of the `benchdelta` binary. These are part of its public contract.

pub const SUCCESS: i32 = 0;
pub const REGRESSION: i32 = 1; // --fail-on-regression and at least one regressed row
pub const CONFIG_ERROR: i32 = 2; // bad config, missing or malformed input
