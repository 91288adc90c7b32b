use anchor_types::{
    typed_data_digest, Address, ForwardRequest, HexBytes, SigningDomain, SigningPayload,
};
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::json_types::{U128, U64};
use near_sdk::store::LookupMap;
use near_sdk::{env, AccountId, BorshStorageKey, Gas, NearToken, Promise};

use crate::constants::{DEFAULT_FORWARD_GAS, MAX_DATA_LEN, SETTLE_GAS};
use crate::errors::ForwarderError;
use crate::events::ForwarderEvent;
use crate::verify::recover_signer;

// Disjoint from the registry's prefixes.
#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh", use_discriminant = true)]
#[repr(u8)]
pub enum StorageKey {
    Nonces = 0x10,
}

#[derive(BorshSerialize, BorshDeserialize, near_sdk_macros::NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct ForwarderState {
    pub version: String,
    pub chain_id: u64,
    pub nonces: LookupMap<Address, u64>,
}

impl ForwarderState {
    pub fn new(chain_id: u64) -> Self {
        let state = Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            chain_id,
            nonces: LookupMap::new(StorageKey::Nonces),
        };
        ForwarderEvent::ForwarderInitialized {
            chain_id,
            verifying_contract: state.domain().verifying_contract,
        }
        .emit();
        state
    }

    /// Domain bound to this deployment's account and chain.
    pub fn domain(&self) -> SigningDomain {
        SigningDomain::for_account(self.chain_id, &env::current_account_id())
    }

    pub fn get_nonce(&self, from: &Address) -> u64 {
        self.nonces.get(from).copied().unwrap_or(0)
    }

    pub fn build_request(&self, from: Address, to: AccountId, data: HexBytes) -> ForwardRequest {
        ForwardRequest {
            nonce: U64(self.get_nonce(&from)),
            from,
            to,
            value: U128(0),
            gas: U64(DEFAULT_FORWARD_GAS.as_gas()),
            data,
        }
    }

    pub fn signing_payload(&self, request: &ForwardRequest) -> SigningPayload {
        SigningPayload::new(self.domain(), request)
    }

    /// Signature first, then nonce. Read-only.
    pub fn verify(
        &self,
        request: &ForwardRequest,
        signature: &[u8],
    ) -> Result<(), ForwarderError> {
        let digest = typed_data_digest(&self.domain(), request);
        if recover_signer(&digest, signature)? != request.from {
            return Err(ForwarderError::InvalidSignature);
        }
        if request.nonce.0 != self.get_nonce(&request.from) {
            return Err(ForwarderError::NonceReplay);
        }
        Ok(())
    }

    /// Validates the request against what the caller attached and commits the
    /// nonce. Nothing is written unless every check passes.
    pub fn consume(
        &mut self,
        request: &ForwardRequest,
        signature: &[u8],
        attached_deposit: NearToken,
        available_gas: Gas,
    ) -> Result<(), ForwarderError> {
        if request.data.0.len() > MAX_DATA_LEN {
            return Err(ForwarderError::InvalidInput(format!(
                "data exceeds {MAX_DATA_LEN} bytes"
            )));
        }
        self.verify(request, signature)?;

        let required_gas = request.gas.0.saturating_add(SETTLE_GAS.as_gas());
        if available_gas.as_gas() < required_gas {
            return Err(ForwarderError::InsufficientGas);
        }
        if attached_deposit.as_yoctonear() < request.value.0 {
            return Err(ForwarderError::InsufficientDeposit);
        }

        let next = request
            .nonce
            .0
            .checked_add(1)
            .ok_or_else(|| ForwarderError::InvalidInput("nonce overflow".to_string()))?;
        self.nonces.insert(request.from, next);

        ForwarderEvent::RequestForwarded {
            from: request.from,
            to: request.to.clone(),
            nonce: request.nonce,
        }
        .emit();
        Ok(())
    }
}

/// Sends `amount` yoctoNEAR back to `account_id`. Zero is a no-op.
pub(crate) fn refund_deposit(account_id: &AccountId, amount: u128) {
    if amount == 0 {
        return;
    }
    let _ = Promise::new(account_id.clone()).transfer(NearToken::from_yoctonear(amount));
    ForwarderEvent::DepositRefunded {
        account_id: account_id.clone(),
        amount: U128(amount),
    }
    .emit();
}
