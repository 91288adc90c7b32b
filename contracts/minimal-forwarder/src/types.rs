//! Settlement result of a forwarded call.

use anchor_types::HexBytes;
use near_sdk::PromiseError;
use near_sdk_macros::NearSchema;
use serde::{Deserialize, Serialize};

/// Outcome of the wrapped call. A failed call is reported here, never as a
/// failure of `execute` itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, NearSchema)]
#[serde(crate = "near_sdk::serde")]
#[abi(json)]
pub struct ForwardResult {
    pub success: bool,
    pub return_data: HexBytes,
}

impl ForwardResult {
    pub fn failed() -> Self {
        Self {
            success: false,
            return_data: HexBytes::default(),
        }
    }

    pub fn from_promise_result(result: Result<Vec<u8>, PromiseError>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                return_data: HexBytes(data),
            },
            Err(PromiseError::Failed) => Self::failed(),
            // Return data over the cap is dropped; the call itself succeeded.
            Err(_) => Self {
                success: true,
                return_data: HexBytes::default(),
            },
        }
    }
}
