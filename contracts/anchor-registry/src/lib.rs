//! Role-gated `didHash → docHash` registry. Accepts direct calls and calls
//! relayed by a trusted forwarder, which carry the original sender in the
//! trailing 20 bytes of the input.

use crate::errors::RegistryError;
use crate::state::RegistryState;
use anchor_types::{Hash32, Operation};
use near_sdk::{env, near, AccountId, PanicOnDefault};

pub mod errors;
mod events;
pub mod state;

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct AnchorRegistry {
    state: RegistryState,
}

#[near]
impl AnchorRegistry {
    #[init]
    #[handle_result]
    pub fn new(
        admins: Vec<AccountId>,
        members: Vec<AccountId>,
        trusted_forwarder: AccountId,
        version: String,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            state: RegistryState::new(admins, members, trusted_forwarder, version)?,
        })
    }

    pub fn version(&self) -> String {
        self.state.version.clone()
    }

    pub fn trusted_forwarder(&self) -> AccountId {
        self.state.trusted_forwarder.clone()
    }

    pub fn is_trusted_forwarder(&self, account_id: AccountId) -> bool {
        self.state.is_trusted_forwarder(&account_id)
    }

    pub fn is_admin(&self, account_id: AccountId) -> bool {
        self.state.is_admin(&account_id)
    }

    pub fn is_member(&self, account_id: AccountId) -> bool {
        self.state.is_member(&account_id)
    }

    pub fn get_admins(&self) -> Vec<AccountId> {
        self.state.get_admins()
    }

    pub fn get_members(&self) -> Vec<AccountId> {
        self.state.get_members()
    }

    pub fn dids(&self, did_hash: Hash32) -> Hash32 {
        self.state.dids(&did_hash)
    }

    #[handle_result]
    pub fn add_admin(&mut self, account_id: AccountId) -> Result<(), RegistryError> {
        self.state.add_admin(&env::predecessor_account_id(), account_id)
    }

    #[handle_result]
    pub fn remove_admin(&mut self, account_id: AccountId) -> Result<(), RegistryError> {
        self.state.remove_admin(&env::predecessor_account_id(), account_id)
    }

    #[handle_result]
    pub fn add_member(&mut self, account_id: AccountId) -> Result<(), RegistryError> {
        self.state.add_member(&env::predecessor_account_id(), account_id)
    }

    #[handle_result]
    pub fn remove_member(&mut self, account_id: AccountId) -> Result<(), RegistryError> {
        self.state.remove_member(&env::predecessor_account_id(), account_id)
    }

    #[handle_result]
    pub fn anchor_did(
        &mut self,
        did_hash: Hash32,
        doc_hash: Hash32,
    ) -> Result<Operation, RegistryError> {
        self.state.anchor_did(&env::predecessor_account_id(), did_hash, doc_hash)
    }

    /// Raw input: `borsh(RegistryCall) ‖ sender`.
    #[handle_result]
    pub fn relay_call(&mut self) -> Result<Option<Operation>, RegistryError> {
        let input = env::input().unwrap_or_default();
        self.state.relay_call(&env::predecessor_account_id(), &input)
    }
}
