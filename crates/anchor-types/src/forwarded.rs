//! Forwarded-sender convention: the forwarder calls [`RELAY_METHOD`] on the
//! target with `data ‖ from` as the raw argument bytes. The target trusts the
//! trailing 20 bytes only when its predecessor is the trusted forwarder.

use crate::Address;

pub const RELAY_METHOD: &str = "relay_call";

pub fn append_sender(data: &[u8], sender: &Address) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + Address::LEN);
    out.extend_from_slice(data);
    out.extend_from_slice(sender.as_bytes());
    out
}

/// `None` when the input is shorter than an address.
pub fn split_sender(input: &[u8]) -> Option<(&[u8], Address)> {
    let split = input.len().checked_sub(Address::LEN)?;
    let (data, sender) = input.split_at(split);
    Address::from_slice(sender).ok().map(|sender| (data, sender))
}
