// =============================================================================
// Typed Data Integration Tests
// =============================================================================
// The payload the forwarder hands out is what a wallet signs:
// - JSON shape matches `eth_signTypedData_v4` input
// - Signing the payload digest and recovering yields the signer
// - A signature checks out through the forwarder's `verify` view

use crate::utils::{context, forwarder_id, registry_id, relayer_id, Harness, TestSigner, CHAIN_ID};
use anchor_types::eip712::{typed_data_json, SigningPayload};
use anchor_types::signer::{recover_signer, sign_digest};
use anchor_types::{Address, Hash32, HexBytes, RegistryCall};
use near_sdk::testing_env;
use serde_json::Value;

fn sample_call() -> RegistryCall {
    RegistryCall::AnchorDid {
        did_hash: Hash32::of_str("did:example:111"),
        doc_hash: Hash32::of_str("doc-v1"),
    }
}

#[test]
fn test_payload_json_is_wallet_ready() -> anyhow::Result<()> {
    let signer = TestSigner::random();
    let harness = Harness::deploy(vec![])?;

    testing_env!(context(&relayer_id(), &forwarder_id()).build());
    let request = harness
        .forwarder
        .build_request(signer.address, registry_id(), HexBytes(sample_call().encode()?));
    let payload = harness.forwarder.build_signing_payload(request.clone());

    let json: Value = serde_json::to_value(&payload)?;
    assert_eq!(json["primaryType"], "ForwardRequest");
    assert_eq!(json["domain"]["chainId"], CHAIN_ID);
    assert_eq!(
        json["domain"]["verifyingContract"],
        Address::from_account_id(&forwarder_id()).to_string()
    );
    assert_eq!(json["message"]["from"], signer.address.to_string());
    assert_eq!(json["message"]["nonce"], "0");
    assert_eq!(json["digest"], payload.digest.to_string());

    let typed = typed_data_json(&harness.forwarder.get_domain(), &request);
    assert_eq!(typed, payload.typed_data_json());
    assert!(typed.get("digest").is_none());

    let decoded: SigningPayload = serde_json::from_value(json)?;
    assert_eq!(decoded, payload);
    Ok(())
}

#[test]
fn test_sign_then_recover_yields_signer() -> anyhow::Result<()> {
    let signer = TestSigner::random();
    let harness = Harness::deploy(vec![])?;

    testing_env!(context(&relayer_id(), &forwarder_id()).build());
    let request = harness
        .forwarder
        .build_request(signer.address, registry_id(), HexBytes(sample_call().encode()?));
    let first = harness.forwarder.build_signing_payload(request.clone());
    let second = harness.forwarder.build_signing_payload(request.clone());
    assert_eq!(first.digest, second.digest);

    let signature = sign_digest(&signer.secret_key, &first.digest)?;
    assert_eq!(recover_signer(&first.digest, &signature)?, signer.address);
    assert!(harness
        .forwarder
        .verify(request, HexBytes(signature.to_vec())));
    Ok(())
}
