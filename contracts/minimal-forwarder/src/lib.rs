//! Verifies EIP-712 signed forward requests, keeps per-signer nonces and
//! forwards the wrapped call with the verified sender appended to its input.

use crate::constants::{MAX_RETURN_DATA_LEN, SETTLE_GAS};
use crate::errors::ForwarderError;
use crate::events::ForwarderEvent;
use crate::state::{refund_deposit, ForwarderState};
use crate::types::ForwardResult;
use anchor_types::{
    append_sender, Address, ForwardRequest, HexBytes, SigningDomain, SigningPayload, RELAY_METHOD,
};
use near_sdk::json_types::{U128, U64};
use near_sdk::{env, near, AccountId, Gas, NearToken, PanicOnDefault, Promise};

pub mod constants;
pub mod errors;
mod events;
pub mod state;
pub mod types;
mod verify;

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct MinimalForwarder {
    state: ForwarderState,
}

#[near]
impl MinimalForwarder {
    #[init]
    pub fn new(chain_id: u64) -> Self {
        Self {
            state: ForwarderState::new(chain_id),
        }
    }

    pub fn version(&self) -> String {
        self.state.version.clone()
    }

    pub fn get_nonce(&self, from: Address) -> U64 {
        U64(self.state.get_nonce(&from))
    }

    pub fn get_domain(&self) -> SigningDomain {
        self.state.domain()
    }

    pub fn build_request(&self, from: Address, to: AccountId, data: HexBytes) -> ForwardRequest {
        self.state.build_request(from, to, data)
    }

    pub fn build_signing_payload(&self, request: ForwardRequest) -> SigningPayload {
        self.state.signing_payload(&request)
    }

    pub fn verify(&self, request: ForwardRequest, signature: HexBytes) -> bool {
        self.state.verify(&request, &signature.0).is_ok()
    }

    #[payable]
    #[handle_result]
    pub fn execute(
        &mut self,
        request: ForwardRequest,
        signature: HexBytes,
    ) -> Result<Promise, ForwarderError> {
        let available_gas = env::prepaid_gas().saturating_sub(env::used_gas());
        let attached = env::attached_deposit();
        self.state.consume(&request, &signature.0, attached, available_gas)?;

        let submitter = env::predecessor_account_id();
        refund_deposit(&submitter, attached.as_yoctonear().saturating_sub(request.value.0));

        Ok(Promise::new(request.to.clone())
            .function_call(
                RELAY_METHOD.to_string(),
                append_sender(&request.data.0, &request.from),
                NearToken::from_yoctonear(request.value.0),
                Gas::from_gas(request.gas.0),
            )
            .then(
                Self::ext(env::current_account_id())
                    .with_static_gas(SETTLE_GAS)
                    .on_forward_result(request.from, request.nonce, submitter, request.value),
            ))
    }

    /// Settles the wrapped call. A failed call hands `value` back to whoever
    /// submitted the request.
    #[private]
    pub fn on_forward_result(
        &mut self,
        from: Address,
        nonce: U64,
        submitter: AccountId,
        value: U128,
    ) -> ForwardResult {
        let result = if env::promise_results_count() == 1 {
            ForwardResult::from_promise_result(env::promise_result_checked(0, MAX_RETURN_DATA_LEN))
        } else {
            ForwardResult::failed()
        };
        ForwarderEvent::ForwardSettled {
            from,
            nonce,
            success: result.success,
        }
        .emit();
        if !result.success {
            refund_deposit(&submitter, value.0);
        }
        result
    }
}
