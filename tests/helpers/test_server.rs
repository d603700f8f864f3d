use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use coursefind::config::SearchConfig;
use coursefind::web::{create_router, AppState, WebServer};
use coursefind::{CorpusSource, RankingEngine};

pub fn app_state(corpus: Arc<dyn CorpusSource>) -> AppState {
    let engine = Arc::new(RankingEngine::new(corpus));
    AppState::new(engine, &SearchConfig::default())
}

/// Router without server middleware, for `oneshot` requests
pub fn test_router(corpus: Arc<dyn CorpusSource>) -> axum::Router {
    create_router(app_state(corpus))
}

/// A real server on an ephemeral port
pub struct TestServer {
    pub base_url: String,
    ct: CancellationToken,
    join: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    pub async fn start(corpus: Arc<dyn CorpusSource>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();
        let ct = CancellationToken::new();

        let server = WebServer::new(app_state(corpus));
        let join = tokio::spawn(server.serve(listener, ct.clone()));

        Self {
            base_url: format!("http://{}", addr),
            ct,
            join,
        }
    }

    pub async fn stop(self) {
        self.ct.cancel();
        self.join.await.unwrap().unwrap();
    }
}
