//! faqdesk HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use faqdesk::config::Config;
use faqdesk::corpus::load_corpus;
use faqdesk::embedding::MiniLmEmbedder;
use faqdesk::gateway::{HandlerState, create_router};
use faqdesk::generation::{EscalationPicker, QwenGenerator};
use faqdesk::policy::FaqAgent;
use faqdesk::session::JsonlSessionLog;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        escalation_threshold = config.escalation_threshold,
        direct_answer_cutoff = config.direct_answer_cutoff,
        "faqdesk starting"
    );

    let corpus = load_corpus(&config.corpus_path)?;

    let embedder = MiniLmEmbedder::load(config.embedder_config()?)?;

    let mut agent = FaqAgent::new(embedder, corpus, config.policy_config())?;

    match config.generation_config() {
        Some(generation_config) => {
            let generator = QwenGenerator::load(generation_config)?;
            agent = agent.with_generator(Arc::new(generator));
        }
        None => tracing::warn!(
            "No FAQDESK_GENERATOR_PATH configured, moderate-confidence questions get the stored answer"
        ),
    }

    if let Some(seed) = config.generation_seed {
        agent = agent.with_escalation(EscalationPicker::seeded(seed));
    }

    let agent = Arc::new(agent);

    tracing::info!(entries = agent.index().len(), "Building FAQ index...");
    let builder = Arc::clone(&agent);
    tokio::task::spawn_blocking(move || builder.build_index()).await??;

    let session_log = Arc::new(JsonlSessionLog::new(config.session_log_path.clone()));

    let mut state = HandlerState::new(agent, session_log);
    if let Some(path) = &config.chat_page_path {
        state = state.with_chat_page(path.clone());
    }

    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("faqdesk shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("FAQDESK_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
