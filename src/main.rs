use anyhow::Context;
use docsum::{api, config, logging, processing::SummarizationService};
use std::{io, net::Ipv4Addr, ops::RangeInclusive, sync::Arc};
use tokio::net::TcpListener;

const FALLBACK_PORTS: RangeInclusive<u16> = 4100..=4199;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_config();
    logging::init_tracing();
    let config = config::get_config();

    let service = SummarizationService::new(config)
        .context("failed to initialize summarization backend")?;
    tracing::info!(
        provider = service.provider(),
        chunk_words = config.chunk_words,
        batch_width = config.batch_concurrency,
        "Summarization service ready"
    );
    let app = api::create_router(Arc::new(service));

    let (listener, port) = bind_listener(config.server_port, FALLBACK_PORTS).await?;
    tracing::info!("Listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Bind the configured port, or the first free port of `fallback` when none is configured.
async fn bind_listener(
    port: Option<u16>,
    fallback: RangeInclusive<u16>,
) -> io::Result<(TcpListener, u16)> {
    if let Some(port) = port {
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
        return Ok((listener, port));
    }

    let (first, last) = (*fallback.start(), *fallback.end());
    for port in fallback {
        match TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await {
            Ok(listener) => return Ok((listener, port)),
            Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "Port already in use; trying next");
            }
            Err(err) => return Err(err),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AddrNotAvailable,
        format!("No available port found in range {first}-{last}"),
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
