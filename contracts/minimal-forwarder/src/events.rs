use anchor_types::Address;
use near_sdk::json_types::{U128, U64};
use near_sdk::{near, AccountId};

#[near(event_json(standard = "nep297"))]
pub enum ForwarderEvent {
    #[event_version("1.0.0")]
    ForwarderInitialized { chain_id: u64, verifying_contract: Address },
    #[event_version("1.0.0")]
    RequestForwarded { from: Address, to: AccountId, nonce: U64 },
    #[event_version("1.0.0")]
    ForwardSettled { from: Address, nonce: U64, success: bool },
    #[event_version("1.0.0")]
    DepositRefunded { account_id: AccountId, amount: U128 },
}
