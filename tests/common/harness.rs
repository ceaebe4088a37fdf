//! Test server harness.

use faqdesk::corpus::{FaqEntry, load_corpus};
use faqdesk::embedding::MiniLmEmbedder;
use faqdesk::gateway::{HandlerState, create_router};
use faqdesk::generation::{AnswerGenerator, EscalationPicker};
use faqdesk::policy::{FaqAgent, PolicyConfig};
use faqdesk::session::JsonlSessionLog;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

/// The corpus shipped in `data/faq.yaml`.
pub fn sample_corpus_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/faq.yaml")
}

pub fn sample_corpus() -> Vec<FaqEntry> {
    load_corpus(&sample_corpus_path()).expect("sample corpus should load")
}

#[derive(Clone)]
pub struct TestServerConfig {
    pub corpus: Option<Vec<FaqEntry>>,
    pub policy: PolicyConfig,
    pub generator: Option<Arc<dyn AnswerGenerator>>,
    pub chat_page_path: Option<PathBuf>,
    pub escalation_seed: u64,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            corpus: None,
            policy: PolicyConfig::default().with_escalation_threshold(0.5),
            generator: None,
            chat_page_path: None,
            escalation_seed: 11,
        }
    }
}

impl TestServerConfig {
    /// Every question with at least one candidate lands between the cutoffs.
    pub fn always_moderate(mut self) -> Self {
        self.policy = self
            .policy
            .with_escalation_threshold(0.0)
            .with_direct_answer_cutoff(1.0);
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn AnswerGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_corpus(mut self, corpus: Vec<FaqEntry>) -> Self {
        self.corpus = Some(corpus);
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    temp_dir: TempDir,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn session_log_path(&self) -> PathBuf {
        session_log_in(self.temp_dir.path())
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn session_log_in(dir: &Path) -> PathBuf {
    dir.join("logs").join("sessions.jsonl")
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server on an ephemeral port.
///
/// - **Embedder**: stub (hashed bag-of-words, deterministic)
/// - **Generator**: whatever the config supplies, none by default
/// - **Session log**: JSONL file in a temp directory owned by the server
/// - **Index**: built before the listener accepts connections
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let temp_dir = TempDir::new().map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let corpus = config.corpus.unwrap_or_else(sample_corpus);
    let embedder =
        MiniLmEmbedder::stub().map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let mut agent = FaqAgent::new(embedder, corpus, config.policy)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?
        .with_escalation(EscalationPicker::seeded(config.escalation_seed));
    if let Some(generator) = config.generator {
        agent = agent.with_generator(generator);
    }
    agent
        .build_index()
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let session_log = Arc::new(JsonlSessionLog::new(session_log_in(temp_dir.path())));
    let mut state = HandlerState::new(Arc::new(agent), session_log);
    if let Some(path) = config.chat_page_path {
        state = state.with_chat_page(path);
    }

    let app = create_router(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
        temp_dir,
    })
}
