//! # carsales-server
//!
//! Thin HTTP server over the keyed store. `/api/data` speaks the
//! DataTables server-side protocol consumed by the browser grid; the
//! filter/sort/page logic itself lives in `carsales-records`, this binary
//! only decodes request parameters and reads the store.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use carsales_records::query::{run_query, OrderClause, QueryPage, QueryParams};
use carsales_store::CarStore;

/// carsales-server - serve the imported records to the table view
#[derive(Parser)]
#[command(name = "carsales-server", version, about, long_about = None)]
struct Cli {
    /// SQLite store to serve records from
    #[arg(long, value_name = "PATH")]
    db: PathBuf,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: String,
}

#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<CarStore>>,
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Health check endpoint handler.
async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// DataTables data endpoint handler.
async fn data(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<QueryPage>, (StatusCode, String)> {
    let params = parse_datatables_params(&raw);

    let records = {
        let store = state
            .store
            .lock()
            .map_err(|_| internal("store lock poisoned".to_string()))?;
        store.all().map_err(|e| internal(e.to_string()))?
    };

    Ok(Json(run_query(&records, &params)))
}

fn internal(message: String) -> (StatusCode, String) {
    tracing::error!(error = %message, "data endpoint failed");
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Decode the DataTables request shape: `draw`, `search[value]`,
/// `order[i][column]` (a column index resolved through `columns[i][data]`),
/// `order[i][dir]`, `start`, `length`.
fn parse_datatables_params(raw: &HashMap<String, String>) -> QueryParams {
    let draw = raw.get("draw").and_then(|v| v.parse().ok()).unwrap_or(0);
    let start = raw.get("start").and_then(|v| v.parse().ok()).unwrap_or(0);
    let length = raw.get("length").and_then(|v| v.parse().ok()).unwrap_or(10);
    let search = raw
        .get("search[value]")
        .filter(|s| !s.is_empty())
        .cloned();

    let mut order = Vec::new();
    let mut index = 0;
    loop {
        let Some(column_index) = raw.get(&format!("order[{index}][column]")) else {
            break;
        };
        let Some(column) = raw.get(&format!("columns[{column_index}][data]")) else {
            break;
        };
        let descending = raw
            .get(&format!("order[{index}][dir]"))
            .is_some_and(|dir| dir == "desc");
        order.push(OrderClause {
            column: column.clone(),
            descending,
        });
        index += 1;
    }

    QueryParams {
        draw,
        search,
        order,
        start,
        length,
    }
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/data", get(data))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let store = CarStore::open(&cli.db)
        .with_context(|| format!("failed to open store at {}", cli.db.display()))?;
    let state = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    let app = create_router(state);
    tracing::info!(addr = %cli.addr, db = %cli.db.display(), "carsales-server listening");

    let listener = tokio::net::TcpListener::bind(&cli.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use carsales_records::CarSaleRecord;
    use tower::ServiceExt;

    fn record(id: i64, plate: &str, color: &str) -> CarSaleRecord {
        CarSaleRecord {
            id,
            model: 2014,
            brand: format!("Brand {id}"),
            transmission: "AT".to_string(),
            plate_no: plate.to_string(),
            mileage: Some(id * 1_000),
            color: color.to_string(),
            price: 300_000.0 + id as f64,
        }
    }

    fn seeded_state(count: i64, maroon_every: i64) -> AppState {
        let mut store = CarStore::open_in_memory().unwrap();
        let records: Vec<CarSaleRecord> = (1..=count)
            .map(|i| {
                let color = if i % maroon_every == 0 { "Maroon" } else { "Silver" };
                record(i, &format!("PLT-{i:03}"), color)
            })
            .collect();
        store.upsert_all(&records).unwrap();
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    async fn get_json(app: Router, uri: &str) -> serde_json::Value {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = create_router(seeded_state(1, 2));
        let value = get_json(app, "/health").await;
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn data_endpoint_filters_and_pages() {
        // 20 records, every 7th is maroon (7 and 14), plus a forced third.
        let state = seeded_state(20, 7);
        {
            let mut store = state.store.lock().unwrap();
            let extra = record(3, "PLT-003", "Maroon");
            store.upsert_all(&[extra]).unwrap();
        }
        let app = create_router(state);

        let value = get_json(
            app,
            "/api/data?draw=2&start=0&length=2&search%5Bvalue%5D=maroon",
        )
        .await;

        assert_eq!(value["recordsTotal"], 20);
        assert_eq!(value["recordsFiltered"], 3);
        assert_eq!(value["data"].as_array().unwrap().len(), 2);
        assert_eq!(value["draw"], 2);
    }

    #[tokio::test]
    async fn data_endpoint_applies_order_clauses() {
        let app = create_router(seeded_state(5, 100));

        // Sort by id descending: order[0] points at column index 0, which
        // the columns map resolves to "id".
        let value = get_json(
            app,
            "/api/data?draw=1&start=0&length=5\
             &order%5B0%5D%5Bcolumn%5D=0&order%5B0%5D%5Bdir%5D=desc\
             &columns%5B0%5D%5Bdata%5D=id",
        )
        .await;

        let ids: Vec<i64> = value["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, [5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn unknown_order_column_is_not_an_error() {
        let app = create_router(seeded_state(3, 100));

        let value = get_json(
            app,
            "/api/data?draw=1&start=0&length=3\
             &order%5B0%5D%5Bcolumn%5D=0&columns%5B0%5D%5Bdata%5D=owner",
        )
        .await;

        assert_eq!(value["recordsFiltered"], 3);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn datatables_params_decode() {
        let mut raw = HashMap::new();
        raw.insert("draw".to_string(), "4".to_string());
        raw.insert("start".to_string(), "10".to_string());
        raw.insert("length".to_string(), "25".to_string());
        raw.insert("search[value]".to_string(), "vios".to_string());
        raw.insert("order[0][column]".to_string(), "5".to_string());
        raw.insert("order[0][dir]".to_string(), "desc".to_string());
        raw.insert("columns[5][data]".to_string(), "mileage".to_string());

        let params = parse_datatables_params(&raw);
        assert_eq!(params.draw, 4);
        assert_eq!(params.start, 10);
        assert_eq!(params.length, 25);
        assert_eq!(params.search.as_deref(), Some("vios"));
        assert_eq!(
            params.order,
            vec![OrderClause {
                column: "mileage".to_string(),
                descending: true,
            }]
        );
    }
}
