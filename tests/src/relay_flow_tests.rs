// =============================================================================
// Relay Flow Integration Tests
// =============================================================================
// End-to-end flows through forwarder -> registry -> settlement:
// - Member anchors, updates and deletes a DID through the relay
// - Nonce advances on every accepted request, whatever the wrapped outcome
// - Replays and foreign-domain signatures are rejected before forwarding
// - Role management works for relayed admins

use crate::utils::{admin_id, forwarder_id, registry_id, Harness, TestSigner, CHAIN_ID};
use anchor_types::signer::sign_meta_tx_request;
use anchor_types::{Hash32, HexBytes, Operation, RegistryCall, SigningDomain};
use near_sdk::testing_env;

fn anchor(did: &str, doc: Option<&str>) -> RegistryCall {
    RegistryCall::AnchorDid {
        did_hash: Hash32::of_str(did),
        doc_hash: doc.map(Hash32::of_str).unwrap_or(Hash32::ZERO),
    }
}

fn return_operation(data: &HexBytes) -> Option<Operation> {
    serde_json::from_slice(&data.0).unwrap()
}

#[test]
fn test_member_anchor_lifecycle_through_relay() -> anyhow::Result<()> {
    let member = TestSigner::random();
    let mut harness = Harness::deploy(vec![member.account_id()])?;
    let did = Hash32::of_str("did:example:111");

    let created = harness.submit(&member, &anchor("did:example:111", Some("doc-v1")))?;
    assert!(created.success);
    assert_eq!(return_operation(&created.return_data), Some(Operation::Create));
    assert_eq!(harness.registry.dids(did), Hash32::of_str("doc-v1"));

    let updated = harness.submit(&member, &anchor("did:example:111", Some("doc-v2")))?;
    assert!(updated.success);
    assert_eq!(return_operation(&updated.return_data), Some(Operation::Update));
    assert_eq!(harness.registry.dids(did), Hash32::of_str("doc-v2"));

    let deleted = harness.submit(&member, &anchor("did:example:111", None))?;
    assert!(deleted.success);
    assert_eq!(return_operation(&deleted.return_data), Some(Operation::Delete));
    assert_eq!(harness.registry.dids(did), Hash32::ZERO);

    assert_eq!(harness.nonce_of(&member), 3);
    Ok(())
}

#[test]
fn test_non_member_request_fails_inside_but_consumes_nonce() -> anyhow::Result<()> {
    let member = TestSigner::random();
    let outsider = TestSigner::random();
    let mut harness = Harness::deploy(vec![member.account_id()])?;
    let did = Hash32::of_str("did:example:111");

    harness.submit(&member, &anchor("did:example:111", Some("doc-v1")))?;

    let result = harness.submit(&outsider, &anchor("did:example:111", Some("doc-evil")))?;
    assert!(!result.success);
    assert_eq!(harness.registry.dids(did), Hash32::of_str("doc-v1"));
    assert_eq!(harness.nonce_of(&outsider), 1);
    Ok(())
}

#[test]
fn test_replay_is_rejected_end_to_end() -> anyhow::Result<()> {
    let member = TestSigner::random();
    let mut harness = Harness::deploy(vec![member.account_id()])?;
    let did = Hash32::of_str("did:example:111");

    let call = anchor("did:example:111", Some("doc-v1"));
    let (request, signature) = harness.sign_call(&member, &call)?;
    assert!(harness.relay(&request, &signature)?.success);

    // The entry changes in between; a replay must not restore the old value.
    harness.submit(&member, &anchor("did:example:111", Some("doc-v2")))?;

    let replay = harness.relay(&request, &signature);
    assert!(replay.unwrap_err().to_string().contains("NonceReplay"));
    assert_eq!(harness.nonce_of(&member), 2);
    assert_eq!(harness.registry.dids(did), Hash32::of_str("doc-v2"));
    Ok(())
}

#[test]
fn test_signature_for_other_deployment_is_rejected() -> anyhow::Result<()> {
    let member = TestSigner::random();
    let mut harness = Harness::deploy(vec![member.account_id()])?;
    let call = anchor("did:example:111", Some("doc-v1"));
    let (request, _) = harness.sign_call(&member, &call)?;

    for domain in [
        SigningDomain::for_account(CHAIN_ID, &registry_id()),
        SigningDomain::for_account(CHAIN_ID + 1, &forwarder_id()),
    ] {
        let signature = sign_meta_tx_request(&member.secret_key, &domain, &request)?;
        let signature = HexBytes(signature.to_vec());
        let result = harness.relay(&request, &signature);
        assert!(result.unwrap_err().to_string().contains("InvalidSignature"));
    }
    assert_eq!(harness.nonce_of(&member), 0);
    assert_eq!(harness.registry.dids(Hash32::of_str("did:example:111")), Hash32::ZERO);
    Ok(())
}

#[test]
fn test_relayed_admin_manages_members() -> anyhow::Result<()> {
    let relayed_admin = TestSigner::random();
    let new_member = TestSigner::random();
    let mut harness = Harness::deploy(vec![])?;

    testing_env!(crate::utils::context(&admin_id(), &registry_id()).build());
    harness.registry.add_admin(relayed_admin.account_id()).unwrap();

    let added = harness.submit(
        &relayed_admin,
        &RegistryCall::AddMember {
            account_id: new_member.account_id(),
        },
    )?;
    assert!(added.success);
    assert_eq!(return_operation(&added.return_data), None);
    assert!(harness.registry.is_member(new_member.account_id()));

    let anchored = harness.submit(&new_member, &anchor("did:example:222", Some("doc-v1")))?;
    assert!(anchored.success);

    // Last-admin protection holds for relayed calls too.
    let last = harness.submit(
        &relayed_admin,
        &RegistryCall::RemoveAdmin {
            account_id: admin_id(),
        },
    )?;
    assert!(last.success);
    let refused = harness.submit(
        &relayed_admin,
        &RegistryCall::RemoveAdmin {
            account_id: relayed_admin.account_id(),
        },
    )?;
    assert!(!refused.success);
    assert!(harness.registry.is_admin(relayed_admin.account_id()));
    Ok(())
}

#[test]
fn test_garbage_data_settles_as_failure() -> anyhow::Result<()> {
    let member = TestSigner::random();
    let mut harness = Harness::deploy(vec![member.account_id()])?;

    testing_env!(crate::utils::context(&crate::utils::relayer_id(), &forwarder_id()).build());
    let request = harness
        .forwarder
        .build_request(member.address, registry_id(), HexBytes(vec![0xff; 3]));
    let domain = harness.forwarder.get_domain();
    let signature = HexBytes(sign_meta_tx_request(&member.secret_key, &domain, &request)?.to_vec());

    let result = harness.relay(&request, &signature)?;
    assert!(!result.success);
    assert_eq!(harness.nonce_of(&member), 1);
    Ok(())
}
