//! HTTP collaborator clients exercised against a local stand-in server.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use eventsure_gateway::chain::etherscan::{EtherscanClient, EtherscanSettings};
use eventsure_gateway::chain::{BlockExplorer, SortOrder};
use eventsure_gateway::error::ExternalServiceError;
use eventsure_gateway::persistence::supabase::{SupabaseRestClient, SupabaseSettings};
use eventsure_gateway::persistence::{Row, TableStore};
use eventsure_gateway::repository::EpisodeRepository;
use eventsure_gateway::service::EpisodeService;

async fn serve(app: Router) -> String {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

// Etherscan stand-in

async fn etherscan_api(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let param = |key: &str| params.get(key).map(String::as_str).unwrap_or_default();

    if param("apikey") != "key" || param("chainid") != "5000" {
        return Json(json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"}));
    }

    match (param("action"), param("address")) {
        ("txlistinternal", "0xfactory") => {
            assert_eq!(param("sort"), "desc");
            assert_eq!(param("endblock"), "9999999999");
            Json(json!({
                "status": "1",
                "message": "OK",
                "result": [{
                    "blockNumber": "100",
                    "timeStamp": "1736942400",
                    "hash": "0xparent",
                    "from": "0xfactory",
                    "to": "",
                    "value": "0",
                    "contractAddress": "0xepisode",
                    "input": "",
                    "type": "create",
                    "gas": "1",
                    "gasUsed": "1",
                    "traceId": "0",
                    "isError": "0",
                    "errCode": ""
                }]
            }))
        }
        ("txlistinternal", "0xbusyfactory") => {
            let page_size = param("offset").parse().unwrap_or(0_usize);
            let created: Vec<Value> = ["0xa", "0xb", "0xa", "0xc"]
                .into_iter()
                .take(page_size)
                .map(|address| json!({"contractAddress": address, "type": "create"}))
                .collect();
            Json(json!({"status": "1", "message": "OK", "result": created}))
        }
        ("txlistinternal", _) => Json(json!({
            "status": "0",
            "message": "No transactions found",
            "result": []
        })),
        ("getLogs", _) => {
            assert_eq!(param("toBlock"), "latest");
            Json(json!({
                "status": "1",
                "message": "OK",
                "result": [{
                    "address": "0xepisode",
                    "topics": ["0xdabf623a6bec72ad159e2d9533e7149ec45bfc657e39f49fb6a9509852dc77dc"],
                    "data": "0x01",
                    "blockNumber": "0x64",
                    "timeStamp": "0x6787b240",
                    "transactionHash": "0xtx"
                }]
            }))
        }
        _ => Json(json!({"status": "0", "message": "NOTOK", "result": "unknown action"})),
    }
}

async fn etherscan(api_key: &str) -> EtherscanClient {
    let base = serve(Router::new().route("/api", get(etherscan_api))).await;
    let Ok(client) = EtherscanClient::new(EtherscanSettings {
        api_key: api_key.to_string(),
        chain_id: "5000".to_string(),
        base_url: format!("{base}/api"),
        timeout: Duration::from_secs(5),
    }) else {
        panic!("client build failed");
    };
    client
}

#[tokio::test]
async fn etherscan_decodes_internal_transactions() {
    let client = etherscan("key").await;
    let Ok(calls) = client
        .internal_transactions("0xfactory", SortOrder::Desc)
        .await
    else {
        panic!("call failed");
    };
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].contract_address, "0xepisode");
    assert_eq!(calls[0].call_type, "create");
}

#[tokio::test]
async fn factory_listing_reads_a_full_page() {
    let explorer: Arc<dyn BlockExplorer> = Arc::new(etherscan("key").await);
    let service = EpisodeService::new(
        Arc::new(EpisodeRepository::new()),
        Some(explorer),
        Some("0xbusyfactory".to_string()),
    );
    let Ok(listing) = service.get_all_episodes().await else {
        panic!("listing failed");
    };
    assert_eq!(listing.episodes, vec!["0xa", "0xb", "0xc"]);
}

#[tokio::test]
async fn etherscan_no_records_is_empty() {
    let client = etherscan("key").await;
    let Ok(calls) = client
        .internal_transactions("0xnobody", SortOrder::Desc)
        .await
    else {
        panic!("call failed");
    };
    assert!(calls.is_empty());
}

#[tokio::test]
async fn etherscan_decodes_logs() {
    let client = etherscan("key").await;
    let Ok(logs) = client.event_logs("0xepisode").await else {
        panic!("call failed");
    };
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].block_number, "0x64");
    assert_eq!(logs[0].transaction_hash, "0xtx");
}

#[tokio::test]
async fn etherscan_remote_failure_carries_message() {
    let client = etherscan("wrong").await;
    let Err(ExternalServiceError::Remote { service, message }) = client.event_logs("0xa").await
    else {
        panic!("expected remote failure");
    };
    assert_eq!(service, "etherscan");
    assert!(message.contains("Invalid API Key"));
}

#[tokio::test]
async fn etherscan_transport_failure() {
    let Ok(client) = EtherscanClient::new(EtherscanSettings {
        api_key: "key".to_string(),
        chain_id: "1".to_string(),
        // Port 9 (discard) is not served locally.
        base_url: "http://127.0.0.1:9/api".to_string(),
        timeout: Duration::from_secs(2),
    }) else {
        panic!("client build failed");
    };
    assert!(matches!(
        client.event_logs("0xa").await,
        Err(ExternalServiceError::Transport { .. })
    ));
}

// Supabase stand-in

type Table = Arc<Mutex<Vec<Value>>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some("anon")
        && headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer anon")
}

async fn insert_row(
    State(table): State<Table>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(mut row): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "no key"})));
    }
    if name != "user_episodes" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "relation does not exist"})),
        );
    }
    if headers.get("prefer").and_then(|v| v.to_str().ok()) != Some("return=representation") {
        return (StatusCode::CREATED, Json(json!([])));
    }
    let mut rows = table.lock().await;
    row["id"] = json!(rows.len() + 1);
    row["created_at"] = json!("2025-01-15T12:00:00+00:00");
    rows.push(row.clone());
    (StatusCode::CREATED, Json(json!([row])))
}

async fn select_rows(
    State(table): State<Table>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "no key"})));
    }
    assert_eq!(params.get("select").map(String::as_str), Some("*"));
    let rows = table.lock().await;
    let matching: Vec<Value> = rows
        .iter()
        .filter(|row| {
            params.iter().filter(|(k, _)| *k != "select").all(|(k, v)| {
                row[k.as_str()]
                    .as_str()
                    .is_some_and(|cell| v.strip_prefix("eq.") == Some(cell))
            })
        })
        .cloned()
        .collect();
    (StatusCode::OK, Json(Value::Array(matching)))
}

async fn supabase(api_key: &str) -> SupabaseRestClient {
    let app = Router::new()
        .route("/rest/v1/{table}", get(select_rows).post(insert_row))
        .with_state(Table::default());
    let base = serve(app).await;
    let Ok(client) = SupabaseRestClient::new(SupabaseSettings {
        project_url: format!("{base}/"),
        api_key: api_key.to_string(),
        timeout: Duration::from_secs(5),
    }) else {
        panic!("client build failed");
    };
    client
}

fn row(user: &str, episode: &str) -> Row {
    let mut row = Row::new();
    row.insert("user".to_string(), json!(user));
    row.insert("episode".to_string(), json!(episode));
    row
}

#[tokio::test]
async fn supabase_insert_returns_representation() {
    let client = supabase("anon").await;
    let Ok(rows) = client.insert("user_episodes", row("alice", "ke902")).await else {
        panic!("insert failed");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!(1));
    assert_eq!(rows[0]["user"], json!("alice"));
}

#[tokio::test]
async fn supabase_select_filters_by_equality() {
    let client = supabase("anon").await;
    for (user, episode) in [("alice", "ke902"), ("bob", "ke902"), ("alice", "jejuTyphoon")] {
        let Ok(_) = client.insert("user_episodes", row(user, episode)).await else {
            panic!("insert failed");
        };
    }
    let Ok(alice) = client.select_where_eq("user_episodes", "user", "alice").await else {
        panic!("select failed");
    };
    assert_eq!(alice.len(), 2);

    let Ok(ke902) = client
        .select_where_eq("user_episodes", "episode", "ke902")
        .await
    else {
        panic!("select failed");
    };
    assert_eq!(ke902.len(), 2);
}

#[tokio::test]
async fn supabase_error_status_is_reported() {
    let client = supabase("anon").await;
    let Err(ExternalServiceError::UnexpectedStatus { status, body, .. }) =
        client.insert("missing", row("alice", "ke902")).await
    else {
        panic!("expected status error");
    };
    assert_eq!(status, 500);
    assert!(body.contains("relation does not exist"));

    let bad_key = supabase("other").await;
    assert!(matches!(
        bad_key.select_where_eq("user_episodes", "user", "alice").await,
        Err(ExternalServiceError::UnexpectedStatus { status: 401, .. })
    ));
}
