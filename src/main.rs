use std::sync::Arc;

use tokio::net::TcpListener;

mod event;
mod llm;
mod pipeline;
mod plan;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, demo mode only");
            None
        }
    };

    let state = state::AppState::from_env(llm);
    let app = routes::app(state);

    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");
    tracing::info!(%port, "slidesmith listening");
    axum::serve(listener, app).await.expect("server failed");
}
