//! Gas and size limits for the forwarder.

use near_sdk::Gas;

/// Gas `build_request` assigns to the wrapped call.
pub const DEFAULT_FORWARD_GAS: Gas = Gas::from_tgas(30);

/// Reserved for `on_forward_result`.
pub const SETTLE_GAS: Gas = Gas::from_tgas(10);

// Caps on caller-supplied and callee-returned bytes
pub const MAX_DATA_LEN: usize = 16 * 1024;
pub const MAX_RETURN_DATA_LEN: usize = 4 * 1024;
