use anchor_types::{Hash32, Operation};
use near_sdk::{near, AccountId};

#[near(event_json(standard = "nep297"))]
pub enum RegistryEvent {
    #[event_version("1.0.0")]
    RegistryInitialized {
        version: String,
        trusted_forwarder: AccountId,
        admins: Vec<AccountId>,
        members: Vec<AccountId>,
    },
    #[event_version("1.0.0")]
    DidAnchored {
        did_hash: Hash32,
        doc_hash: Hash32,
        operation: Operation,
        actor: AccountId,
    },
    #[event_version("1.0.0")]
    AdminAdded { account_id: AccountId, by: AccountId },
    #[event_version("1.0.0")]
    AdminRemoved { account_id: AccountId, by: AccountId },
    #[event_version("1.0.0")]
    MemberAdded { account_id: AccountId, by: AccountId },
    #[event_version("1.0.0")]
    MemberRemoved { account_id: AccountId, by: AccountId },
}
