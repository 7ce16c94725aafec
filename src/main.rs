use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newslens::classifier::SourceRegistry;
use newslens::client::AnalysisClient;
use newslens::config::ClientConfig;
use newslens::session::{AnalysisSession, SubmitOutcome};
use newslens::view::{render, ScreenView};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("newslens=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // -----------------------------
    // Config / Dependencies
    // -----------------------------
    let config = ClientConfig::from_env()?;
    let registry = config.load_registry()?;
    let client = Arc::new(AnalysisClient::from_config(&config)?);

    info!(
        base_url = client.base_url(),
        timeout_secs = config.request_timeout.as_secs(),
        sources = registry.len(),
        "newslens starting"
    );

    println!("🔍 Fake News Explained");
    report_health(&client).await;

    let mut session = AnalysisSession::new(client.clone(), config.request_timeout);
    show(&session, &registry);

    // -----------------------------
    // Input loop
    // -----------------------------
    let stdin = io::stdin();
    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            ":q" | ":quit" => break,
            ":health" => {
                report_health(&client).await;
                continue;
            }
            _ => {}
        }

        session.set_input(line.trim_end_matches(|c: char| c == '\r' || c == '\n'));
        if session.submit() == SubmitOutcome::Ignored {
            continue;
        }

        show(&session, &registry);
        session.settle().await;
        show(&session, &registry);
    }

    println!("👋 Bye");
    Ok(())
}

fn show(session: &AnalysisSession, registry: &SourceRegistry) {
    println!("{}", render(&ScreenView::from_state(session.state(), registry)));
}

async fn report_health(client: &AnalysisClient) {
    if client.check_health().await {
        println!("✅ Analysis service is up at {}", client.base_url());
    } else {
        warn!(base_url = client.base_url(), "analysis service health check failed");
        println!(
            "⚠️  Analysis service at {} is not responding",
            client.base_url()
        );
    }
}
