use anyhow::Context;
use banter::config::SessionConfig;
use banter::session::Session;
use banter::transcript::ChannelSink;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banter=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let topic = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if topic.trim().is_empty() {
        eprintln!("usage: banter <topic>");
        std::process::exit(2);
    }

    info!("Starting Banter podcast engine");

    let config = match SessionConfig::default_path() {
        Some(path) if path.exists() => {
            info!("loading config from {}", path.display());
            SessionConfig::load(&path)?
        }
        _ => SessionConfig::default(),
    };

    let (sink, entries) = ChannelSink::unbounded();
    let printer = std::thread::spawn(move || {
        for entry in entries.iter() {
            println!("[{}] {}", entry.label(), entry.text);
        }
    });

    let session =
        Session::new(config, Arc::new(sink)).context("could not set up the session")?;
    let mut handle = session.start(&topic);

    tokio::select! {
        outcome = handle.wait() => {
            info!("run ended on its own: {outcome:?}");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("stop requested");
            handle.stop();
            let outcome = handle.wait().await;
            info!("run ended: {outcome:?}");
        }
    }

    drop(session);
    let _ = printer.join();
    Ok(())
}
