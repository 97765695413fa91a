use std::sync::Arc;

use anyhow::Result;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faceboinks::app::feed::FeedRepository;
use faceboinks::config::AppConfig;
use faceboinks::infra::api::FeedApiClient;
use faceboinks::infra::prefs::RedbPreferences;
use faceboinks::{FeedSession, PostView};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store = RedbPreferences::open(&config.prefs_path)?;
    let api = FeedApiClient::new(config.feed_api_url.clone())?;
    let mut session = FeedSession::open(FeedRepository::new(api), Arc::new(store));

    tracing::info!(api = %config.feed_api_url, "loading feed");
    session.load();

    tokio::select! {
        _ = session.settle() => {}
        _ = shutdown_signal() => return Ok(()),
    }

    for row in session.view() {
        print_post(&row)?;
    }
    Ok(())
}

fn print_post(row: &PostView<'_>) -> Result<()> {
    let post = row.post;
    let edited = if row.edited { " (edited)" } else { "" };
    println!(
        "#{} {} · {}{}",
        post.id,
        post.author,
        post.created_at.format(&Rfc3339)?,
        edited
    );
    println!("  {}", post.content);
    if post.has_image() {
        println!("  [image] {}", post.image_url);
    }
    let liked = if row.liked { " ♥" } else { "" };
    println!("  Like ({}){} · {} comments", post.likes, liked, post.comments.len());
    for comment in &post.comments {
        println!("    - {}", comment);
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
