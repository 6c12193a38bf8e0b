//! HTTP surface: a single assistant endpoint
//!
//! `POST /agent` takes `{user_id, query}` and answers with the reply
//! text plus any generated file paths. `GET /` reports liveness.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::Agent;

#[derive(Debug, Deserialize)]
pub struct AgentRequest {
    pub user_id: String,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AgentReply {
    pub text: String,
    pub chart_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
}

pub async fn start(address: String, agent: Arc<Agent>) -> Result<()> {
    let app = router(agent);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Serving assistant endpoint on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(agent: Arc<Agent>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/agent", post(agent_endpoint))
        .layer(TraceLayer::new_for_http())
        .with_state(agent)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "finbot backend is running" }))
}

async fn agent_endpoint(
    State(agent): State<Arc<Agent>>,
    Json(request): Json<AgentRequest>,
) -> Json<AgentReply> {
    let response = agent.process_query(&request.user_id, &request.query).await;
    Json(AgentReply {
        text: response.text,
        chart_path: response.chart_path,
        csv_path: response.csv_path,
        pdf_path: response.pdf_path,
    })
}
