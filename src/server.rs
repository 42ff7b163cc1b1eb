use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Config, StoreBackend};
use crate::handlers;
use crate::state::AppState;
use crate::store::{MemoryStore, RecordStore, RemoteStore};

/// Build the application state and Axum router from a [`Config`].
///
/// Selects the record store backend here, at the boundary; nothing past
/// this point knows which implementation it is talking to.
pub fn build_app(config: Config) -> Result<(AppState, Router), Box<dyn std::error::Error>> {
    let store: Arc<dyn RecordStore> = match &config.backend {
        StoreBackend::Remote { base_url } => {
            tracing::info!("Using remote record store at {}", base_url);
            Arc::new(RemoteStore::new(base_url)?)
        }
        StoreBackend::Memory { demo_data } => {
            tracing::info!(demo_data = *demo_data, "Using in-memory record store");
            if *demo_data {
                Arc::new(MemoryStore::with_demo_data())
            } else {
                Arc::new(MemoryStore::new())
            }
        }
    };

    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let app = Router::new()
        .merge(handlers::routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok((state, app))
}

/// Bind the router to `host:port` and spawn the server as a tokio task.
///
/// Returns the actual port the server bound to (useful when `port` is 0
/// for OS-assigned ports) and a [`JoinHandle`] for the server task.
pub async fn serve(
    app: Router,
    host: &str,
    port: u16,
) -> Result<(u16, JoinHandle<()>), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    Ok((actual_port, handle))
}
