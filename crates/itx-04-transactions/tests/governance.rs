mod common;

use common::*;
use itx_02_accounts::{ChangeKind, NetworkAccount, WrappedStates};
use itx_03_multisig::MultisigOperation;
use itx_04_transactions::{
    ArchiverClient, ChangeConfigTx, ChangeNetworkParamTx, CollectingApplyResponse,
    InMemoryExecutionStore, InternalTx, InternalTxHandler, ResolutionError, StaticArchiver,
    DEFAULT_NETWORK_ACCOUNT,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn change_config(cycle: u64, config: Value) -> InternalTx {
    InternalTx::ChangeConfig(ChangeConfigTx {
        cycle,
        config,
        timestamp: NOW,
        chain_id: "0x1f92".to_string(),
        sign: Vec::new(),
    })
}

fn change_params(cycle: u64, config: Value) -> InternalTx {
    InternalTx::ChangeNetworkParam(ChangeNetworkParamTx {
        cycle,
        config,
        timestamp: NOW,
        chain_id: "0x1f92".to_string(),
        sign: Vec::new(),
    })
}

fn network_states() -> WrappedStates {
    states([network()])
}

fn network_copy(timestamp: u64) -> NetworkAccount {
    NetworkAccount {
        id: DEFAULT_NETWORK_ACCOUNT,
        timestamp,
        current: params(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_config_change_recorded_then_applied_at_cycle() {
    let fixture = Fixture::new();
    let service = fixture.service(Arc::new(InMemoryExecutionStore::new()));
    let tx = with_multisig(
        change_config(10, json!({"minMultisigSignatures": 4})),
        &fixture.signers[..3],
    );
    let mut states = network_states();

    assert!(service.validate_fields(&tx).success);
    assert!(service.validate(&tx).is_pass());
    assert!(service.validate_state(&tx, &states).is_pass());
    let mut response = CollectingApplyResponse::new();
    service
        .apply(&tx, [2; 32], NOW, &mut states, &mut response)
        .await
        .unwrap();
    assert_eq!(response.changed.len(), 1);

    let network = states.network_account(&DEFAULT_NETWORK_ACCOUNT).unwrap();
    assert_eq!(network.list_of_changes.len(), 1);
    assert_eq!(network.list_of_changes[0].kind, ChangeKind::Config);
    assert_eq!(network.list_of_changes[0].cycle, 10);
    assert_eq!(service.config().min_multisig_signatures, 3);

    assert_eq!(service.apply_pending_config_changes(network, 9).unwrap(), 0);
    assert_eq!(service.apply_pending_config_changes(network, 10).unwrap(), 1);
    assert_eq!(service.config().min_multisig_signatures, 4);

    // Three signers no longer meet the raised threshold.
    let next = with_multisig(
        change_config(11, json!({"emitInternalTxReceipts": true})),
        &fixture.signers[..3],
    );
    assert_eq!(service.validate(&next).reason, "Invalid signatures");
    let next = with_multisig(
        change_config(11, json!({"emitInternalTxReceipts": true})),
        &fixture.signers[..4],
    );
    assert!(service.validate(&next).is_pass());
}

#[tokio::test]
async fn test_key_rotation_needs_rotation_signers() {
    let mut fixture = Fixture::new();
    let keys: Vec<String> = fixture
        .signers
        .iter()
        .map(|k| k.address().to_string())
        .collect();
    let config_signers = keys[..3].to_vec();
    let rotation_signers = keys[2..].to_vec();
    fixture
        .config
        .permissions
        .set(MultisigOperation::ChangeConfig, config_signers);
    fixture
        .config
        .permissions
        .set(MultisigOperation::ChangeMultisigKeys, rotation_signers);
    let service = fixture.service(Arc::new(InMemoryExecutionStore::new()));

    let rotated: serde_json::Map<String, Value> =
        keys[..4].iter().map(|k| (k.clone(), json!(3))).collect();
    let rotation = json!({ "multisigKeys": rotated });

    let by_config_signers = with_multisig(change_config(5, rotation.clone()), &fixture.signers[..3]);
    assert!(service.validate_fields(&by_config_signers).success);
    assert_eq!(
        service.validate(&by_config_signers).reason,
        "Invalid signatures"
    );

    let by_rotation_signers = with_multisig(change_config(5, rotation), &fixture.signers[2..]);
    assert!(service.validate(&by_rotation_signers).is_pass());

    // A change that leaves the keys alone goes to the config signers.
    let plain = with_multisig(
        change_config(5, json!({"chainId": "0x1f92"})),
        &fixture.signers[..3],
    );
    assert!(service.validate(&plain).is_pass());
}

#[tokio::test]
async fn test_network_param_change_is_staged() {
    let fixture = Fixture::new();
    let service = fixture.service(Arc::new(InMemoryExecutionStore::new()));
    let tx = with_multisig(
        change_params(7, json!({"certCycleDuration": 20})),
        &fixture.signers[..3],
    );
    let mut states = network_states();

    assert!(service.validate(&tx).is_pass());
    service
        .apply(&tx, [3; 32], NOW, &mut states, &mut CollectingApplyResponse::new())
        .await
        .unwrap();

    let network = states.network_account(&DEFAULT_NETWORK_ACCOUNT).unwrap();
    assert_eq!(network.current, params());
    let next = network.next.as_ref().unwrap();
    assert_eq!(next.cert_cycle_duration, 20);
    assert_eq!(next.cycle_duration_ms, params().cycle_duration_ms);
    assert_eq!(network.list_of_changes[0].kind, ChangeKind::NetworkParam);
    assert_eq!(network.timestamp, NOW);
}

#[tokio::test]
async fn test_bad_network_param_changes() {
    let fixture = Fixture::new();
    let service = fixture.service(Arc::new(InMemoryExecutionStore::new()));
    let states = network_states();

    let unknown = with_multisig(change_params(7, json!({"warpFactor": 9})), &fixture.signers[..3]);
    assert_eq!(
        service.validate_state(&unknown, &states).reason,
        "Invalid change payload"
    );

    let zero_div = with_multisig(
        change_params(7, json!({"stabilityScaleDiv": 0})),
        &fixture.signers[..3],
    );
    assert_eq!(
        service.validate_state(&zero_div, &states).reason,
        "Invalid network parameters"
    );

    let not_object = with_multisig(change_params(7, json!([1, 2])), &fixture.signers[..3]);
    assert_eq!(
        service.validate_fields(&not_object).reason,
        "Invalid change payload"
    );

    let no_network = with_multisig(
        change_params(7, json!({"certCycleDuration": 20})),
        &fixture.signers[..3],
    );
    assert_eq!(
        service
            .validate_state(&no_network, &WrappedStates::new())
            .reason,
        "Network account not found"
    );
}

#[tokio::test]
async fn test_network_account_majority() {
    let fixture = Fixture::new();
    let archivers: Vec<Arc<dyn ArchiverClient>> = vec![
        Arc::new(StaticArchiver::new("a", network_copy(1))),
        Arc::new(StaticArchiver::new("b", network_copy(1))),
        Arc::new(StaticArchiver::new("c", network_copy(2))),
        Arc::new(StaticArchiver::unreachable("d")),
    ];
    let service = fixture
        .service(Arc::new(InMemoryExecutionStore::new()))
        .with_archivers(archivers);
    assert_eq!(service.resolve_network_account().await.unwrap(), network_copy(1));

    let split: Vec<Arc<dyn ArchiverClient>> = vec![
        Arc::new(StaticArchiver::new("a", network_copy(1))),
        Arc::new(StaticArchiver::new("b", network_copy(2))),
        Arc::new(StaticArchiver::unreachable("c")),
    ];
    let service = fixture
        .service(Arc::new(InMemoryExecutionStore::new()))
        .with_archivers(split);
    assert_eq!(
        service.resolve_network_account().await,
        Err(ResolutionError::NoMajority {
            best: 1,
            responders: 2
        })
    );

    let service = fixture.service(Arc::new(InMemoryExecutionStore::new()));
    assert_eq!(
        service.resolve_network_account().await,
        Err(ResolutionError::NoPeers)
    );
}

#[tokio::test]
async fn test_load_wrapped_states_through_host() {
    let fixture = Fixture::new();
    let host = Arc::new(TestHost::new());
    host.add(network());
    host.add(secure(0, 0, 100));
    host.add(eoa(source_eth(), 1000));
    let service = fixture.service_with_host(Arc::new(InMemoryExecutionStore::new()), host);

    let tx = InternalTx::from_json(json!({
        "internalTXType": "TransferFromSecureAccount",
        "accountName": SECURE_NAME,
        "amount": "50",
        "nonce": 1,
        "timestamp": NOW,
        "chainId": "0x1f92"
    }))
    .unwrap();
    let keys = service.crack(&tx).unwrap();
    let states = service.load_wrapped_states(&keys).await.unwrap();

    // The recipient is unknown to the host and stays absent.
    assert_eq!(states.len(), 3);
    assert_eq!(
        service.validate_state(&tx, &states).reason,
        "Recipient account not found"
    );
}
