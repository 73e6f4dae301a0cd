use axum::{extract::State, response::Result, Json};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

use super::GatewayState;

pub async fn health_check(State(state): State<GatewayState>) -> Result<Json<Value>> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "folio-gateway",
        "upstream": state.config.upstream_url,
        "document_kinds": state.config.document_kinds.iter().collect::<Vec<_>>(),
    })))
}
