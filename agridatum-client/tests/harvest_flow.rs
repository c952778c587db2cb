// agridatum-client/tests/harvest_flow.rs
// End-to-end flow against an in-process backend over real HTTP

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use agridatum_client::{
    ClientConfig, Credentials, HarvestClient, HarvestForm, RecordId, SigningChain,
    SigningStrategy, derive,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

const PHONE: &str = "+254700000001";
const PIN: &str = "123456";

#[derive(Clone, Default)]
struct Backend {
    submits: Arc<AtomicUsize>,
    last_submit: Arc<std::sync::Mutex<Option<Value>>>,
}

#[derive(Clone, Copy)]
enum KeyService {
    Healthy,
    Down,
    NoSignature,
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend(keys: KeyService, state: Backend) -> Router {
    let keys_handler = move |Json(body): Json<Value>| async move {
        assert!(body["seedInput"].is_string());
        assert_eq!(body["harvestData"]["phoneNumber"], PHONE);
        match keys {
            KeyService::Healthy => (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "publicKey": "ed25519_pk_remote",
                    "farmerAddress": "addr_test1remote",
                    "signature": "f".repeat(128),
                })),
            ),
            KeyService::Down => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "key service down" })),
            ),
            KeyService::NoSignature => (
                StatusCode::OK,
                Json(json!({ "publicKey": "pk", "farmerAddress": "addr" })),
            ),
        }
    };

    Router::new()
        .route("/api/keys/generate", post(keys_handler))
        .route("/api/harvest/submit", post(submit))
        .route("/api/harvest/verify", post(verify))
        .route("/api/harvest/records/{farmer_id}", get(records))
        .with_state(state)
}

async fn submit(State(state): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    state.submits.fetch_add(1, Ordering::SeqCst);
    *state.last_submit.lock().unwrap() = Some(body);
    Json(json!({
        "success": true,
        "data": { "id": 7 },
        "blockchain": { "submitted": true, "transactionHash": "abc123" }
    }))
}

async fn verify(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "record": {
            "id": body["recordId"].as_i64().unwrap_or(7),
            "farmerId": "f00d",
            "cropType": "Maize",
            "weightKg": 50.0,
            "timestamp": "2025-03-01T10:00:00.000Z",
            "farmerAddress": "addr_test1remote"
        },
        "verification": {
            "signatureValid": true,
            "blockchainIndexed": true,
            "blockchainValid": true,
            "transactionHash": "abc123"
        }
    }))
}

async fn records(
    Path(farmer_id): Path<String>,
    Query(query): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    assert_eq!(query.get("offset").map(String::as_str), Some("0"));
    Json(json!({
        "success": true,
        "data": [{
            "id": 3,
            "farmer_id": farmer_id,
            "phone_number": PHONE,
            "plot_location": "North Field",
            "crop_type": "Maize",
            "weight_kg": "12.50",
            "timestamp": "2025-02-01T09:00:00.000Z",
            "transaction_hash": null,
            "farmer_address": "addr_test1remote",
            "indexed_on_chain": false,
            "created_at": "2025-02-01T09:00:01.000Z",
            "public_key": "ed25519_pk_remote",
            "signature": "e".repeat(128)
        }],
        "pagination": { "limit": 100, "offset": 0 }
    }))
}

fn form(pin: &str, weight: f64) -> HarvestForm {
    HarvestForm::new(
        Credentials::new(PHONE, pin),
        "North Field - Section A",
        "Maize",
        Some(weight),
    )
}

#[tokio::test]
async fn test_login_submit_and_verify() {
    let state = Backend::default();
    let url = spawn(backend(KeyService::Healthy, state.clone())).await;

    let client = HarvestClient::new(ClientConfig::new(url)).unwrap();
    let mut client = client.login(Credentials::new(PHONE, PIN)).await.unwrap();

    assert_eq!(client.records().len(), 1);
    let loaded = client.records().get("3").unwrap();
    assert_eq!(loaded.weight_kg, 12.5);
    assert_eq!(loaded.farmer_id.as_deref(), Some(derive(PHONE, PIN).farmer_id.as_str()));
    assert_eq!(loaded.signature.as_ref().unwrap().len(), 32);

    let outcome = client.submit(&form(PIN, 50.0)).await;
    assert!(outcome.success, "{:?}", outcome.error);
    let record = outcome.record.unwrap();
    assert_eq!(record.id, "7");
    assert_eq!(record.transaction_hash.as_deref(), Some("abc123"));
    assert_eq!(record.indexed_on_chain, Some(true));
    assert_eq!(record.public_key, "ed25519_pk_remote");

    let ids: Vec<_> = client.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["7", "3"]);

    let sent = state.last_submit.lock().unwrap().clone().unwrap();
    assert_eq!(sent["signature"].as_str().unwrap().len(), 128);
    assert_eq!(sent["weightKg"], 50.0);

    let verification = client
        .api()
        .verify_harvest(Some(RecordId::from(7)), None)
        .await
        .unwrap();
    assert!(verification.verification.blockchain_valid);
    assert!(client.api().verify_transaction("abc123").await);

    let client = client.logout();
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn test_key_service_down_falls_back_to_local_stub() {
    let state = Backend::default();
    let url = spawn(backend(KeyService::Down, state.clone())).await;

    let config = ClientConfig::new(url).with_signing(SigningChain::new(vec![
        SigningStrategy::Remote,
        SigningStrategy::LocalStub,
    ]));
    let mut client = HarvestClient::new(config)
        .unwrap()
        .login(Credentials::new(PHONE, PIN))
        .await
        .unwrap();

    let outcome = client.submit(&form(PIN, 20.0)).await;
    assert!(outcome.success, "{:?}", outcome.error);
    assert!(outcome.record.unwrap().farmer_address.starts_with("addr_stub_"));
    assert_eq!(state.submits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_key_service_down_without_fallback_reports_error() {
    let state = Backend::default();
    let url = spawn(backend(KeyService::Down, state.clone())).await;

    let mut client = HarvestClient::new(ClientConfig::new(url))
        .unwrap()
        .login(Credentials::new(PHONE, PIN))
        .await
        .unwrap();

    let outcome = client.submit(&form(PIN, 20.0)).await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("key service down"));
    assert_eq!(state.submits.load(Ordering::SeqCst), 0);
    assert_eq!(client.records().len(), 1);
}

#[tokio::test]
async fn test_missing_signature_never_submits() {
    let state = Backend::default();
    let url = spawn(backend(KeyService::NoSignature, state.clone())).await;

    let config = ClientConfig::new(url).with_signing(SigningChain::new(vec![
        SigningStrategy::Remote,
        SigningStrategy::LocalStub,
    ]));
    let mut client = HarvestClient::new(config)
        .unwrap()
        .login(Credentials::new(PHONE, PIN))
        .await
        .unwrap();

    let outcome = client.submit(&form(PIN, 20.0)).await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Backend did not return a signature"));
    assert_eq!(state.submits.load(Ordering::SeqCst), 0);
    assert_eq!(client.records().len(), 1);
}

#[tokio::test]
async fn test_unreachable_backend_degrades_login() {
    // Nothing listens on the discard port
    let client = HarvestClient::new(ClientConfig::new("http://127.0.0.1:9").with_timeout(2))
        .unwrap()
        .login(Credentials::new(PHONE, PIN))
        .await
        .unwrap();
    assert!(client.records().is_empty());
}
