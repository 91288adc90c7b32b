use crate::errors::RegistryError;
use crate::events::RegistryEvent;
use anchor_types::{split_sender, Hash32, Operation, RegistryCall};
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::store::{IterableSet, LookupMap};
use near_sdk::{log, AccountId, BorshStorageKey};

#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh", use_discriminant = true)]
#[repr(u8)]
pub enum StorageKey {
    Admins = 0x20,
    Members = 0x21,
    Dids = 0x22,
}

#[derive(BorshSerialize, BorshDeserialize, near_sdk_macros::NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct RegistryState {
    pub version: String,
    pub trusted_forwarder: AccountId,
    pub admins: IterableSet<AccountId>,
    pub members: IterableSet<AccountId>,
    pub dids: LookupMap<Hash32, Hash32>,
}

impl RegistryState {
    pub fn new(
        admins: Vec<AccountId>,
        members: Vec<AccountId>,
        trusted_forwarder: AccountId,
        version: String,
    ) -> Result<Self, RegistryError> {
        if admins.is_empty() {
            return Err(RegistryError::InvalidInput(
                "at least one admin is required".to_string(),
            ));
        }
        let mut state = Self {
            version,
            trusted_forwarder,
            admins: IterableSet::new(StorageKey::Admins),
            members: IterableSet::new(StorageKey::Members),
            dids: LookupMap::new(StorageKey::Dids),
        };
        state.admins.extend(admins);
        state.members.extend(members);

        RegistryEvent::RegistryInitialized {
            version: state.version.clone(),
            trusted_forwarder: state.trusted_forwarder.clone(),
            admins: state.get_admins(),
            members: state.get_members(),
        }
        .emit();
        Ok(state)
    }

    pub fn is_admin(&self, account_id: &AccountId) -> bool {
        self.admins.contains(account_id)
    }

    pub fn is_member(&self, account_id: &AccountId) -> bool {
        self.members.contains(account_id)
    }

    pub fn is_trusted_forwarder(&self, account_id: &AccountId) -> bool {
        &self.trusted_forwarder == account_id
    }

    pub fn get_admins(&self) -> Vec<AccountId> {
        self.admins.iter().cloned().collect()
    }

    pub fn get_members(&self) -> Vec<AccountId> {
        self.members.iter().cloned().collect()
    }

    fn require_admin(&self, caller: &AccountId) -> Result<(), RegistryError> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized)
        }
    }

    pub fn add_admin(
        &mut self,
        caller: &AccountId,
        account_id: AccountId,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        if self.admins.insert(account_id.clone()) {
            RegistryEvent::AdminAdded {
                account_id,
                by: caller.clone(),
            }
            .emit();
        }
        Ok(())
    }

    pub fn remove_admin(
        &mut self,
        caller: &AccountId,
        account_id: AccountId,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        if !self.is_admin(&account_id) {
            return Ok(());
        }
        if self.admins.len() == 1 {
            return Err(RegistryError::LastAdmin);
        }
        self.admins.remove(&account_id);
        RegistryEvent::AdminRemoved {
            account_id,
            by: caller.clone(),
        }
        .emit();
        Ok(())
    }

    pub fn add_member(
        &mut self,
        caller: &AccountId,
        account_id: AccountId,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        if self.members.insert(account_id.clone()) {
            RegistryEvent::MemberAdded {
                account_id,
                by: caller.clone(),
            }
            .emit();
        }
        Ok(())
    }

    pub fn remove_member(
        &mut self,
        caller: &AccountId,
        account_id: AccountId,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        if self.members.remove(&account_id) {
            RegistryEvent::MemberRemoved {
                account_id,
                by: caller.clone(),
            }
            .emit();
        }
        Ok(())
    }

    /// Zero `doc_hash` deletes. The operation is classified from the stored and
    /// new values alone.
    pub fn anchor_did(
        &mut self,
        caller: &AccountId,
        did_hash: Hash32,
        doc_hash: Hash32,
    ) -> Result<Operation, RegistryError> {
        if !self.is_member(caller) {
            return Err(RegistryError::Unauthorized);
        }
        let operation = Operation::classify(&self.dids(&did_hash), &doc_hash);
        match operation {
            Operation::Delete => {
                self.dids.remove(&did_hash);
            }
            Operation::Create | Operation::Update => {
                self.dids.insert(did_hash, doc_hash);
            }
        }
        RegistryEvent::DidAnchored {
            did_hash,
            doc_hash,
            operation,
            actor: caller.clone(),
        }
        .emit();
        Ok(operation)
    }

    pub fn dids(&self, did_hash: &Hash32) -> Hash32 {
        self.dids.get(did_hash).copied().unwrap_or(Hash32::ZERO)
    }

    /// Runs `call` with `caller` as the effective sender. Returns the operation
    /// for anchor writes.
    pub fn dispatch(
        &mut self,
        caller: &AccountId,
        call: RegistryCall,
    ) -> Result<Option<Operation>, RegistryError> {
        match call {
            RegistryCall::AnchorDid { did_hash, doc_hash } => {
                self.anchor_did(caller, did_hash, doc_hash).map(Some)
            }
            RegistryCall::AddAdmin { account_id } => {
                self.add_admin(caller, account_id).map(|_| None)
            }
            RegistryCall::RemoveAdmin { account_id } => {
                self.remove_admin(caller, account_id).map(|_| None)
            }
            RegistryCall::AddMember { account_id } => {
                self.add_member(caller, account_id).map(|_| None)
            }
            RegistryCall::RemoveMember { account_id } => {
                self.remove_member(caller, account_id).map(|_| None)
            }
        }
    }

    /// Entry for calls arriving through the forwarder: `input` is
    /// `borsh(RegistryCall) ‖ sender`, trusted only from the forwarder account.
    pub fn relay_call(
        &mut self,
        predecessor: &AccountId,
        input: &[u8],
    ) -> Result<Option<Operation>, RegistryError> {
        if !self.is_trusted_forwarder(predecessor) {
            log!("Rejected relay_call from untrusted account {}", predecessor);
            return Err(RegistryError::UntrustedForwarder);
        }
        let (data, sender) = split_sender(input).ok_or(RegistryError::MalformedCall)?;
        let call = RegistryCall::decode(data).map_err(|_| RegistryError::MalformedCall)?;
        let caller = sender
            .to_account_id()
            .map_err(|_| RegistryError::MalformedCall)?;

        let method = call.method_name();
        self.dispatch(&caller, call).inspect_err(|err| {
            log!("Rejected relayed {} from {}: {:?}", method, caller, err);
        })
    }
}
