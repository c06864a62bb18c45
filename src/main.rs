//! Response lifecycle demo.
//!
//! Runs one response through a two-stage pipeline:
//!
//! ```text
//! main ──spawn──▶ producer (fill payload) ──take()──▶ finalizer (304 check)
//!   ▲                                                     │ drop guard
//!   └────────────── completion handler (oneshot) ◀────────┘
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tokio::sync::oneshot;

use response_lifecycle::config::{load_config, ResponseConfig};
use response_lifecycle::http::{CompletionHandler, FinalizeGuard, LivenessProbe, Response, ResponseError};
use response_lifecycle::observability::init_logging;

#[derive(Parser)]
#[command(name = "response-lifecycle")]
#[command(about = "Build, relocate and finalize a JSON response", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ETag the client already holds.
    #[arg(long)]
    if_none_match: Option<String>,

    /// Status code the producer sets.
    #[arg(short, long, default_value_t = 200)]
    status: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ResponseConfig::default(),
    };
    init_logging(&config.logging)?;

    tracing::info!(
        buffer_capacity = config.stream.buffer_capacity,
        "response-lifecycle v0.1.0 starting"
    );

    // The connection owner keeps this flag; clearing it tells producers to stop.
    let connection_alive = Arc::new(AtomicBool::new(true));
    let (done_tx, done_rx) = oneshot::channel::<Response>();

    let mut res = Response::new();
    res.set_liveness_probe(LivenessProbe::from_flag(connection_alive.clone()));
    res.set_completion_handler(CompletionHandler::new(move |r| {
        if done_tx.send(r.take()).is_err() {
            tracing::warn!("Transport stopped waiting for the response");
        }
    }));

    let (stage_tx, stage_rx) = oneshot::channel::<Response>();
    let producer = tokio::spawn(produce(res, cli.status, stage_tx));

    let if_none_match = cli.if_none_match.clone();
    let finalizer = tokio::spawn(async move {
        let Ok(res) = stage_rx.await else {
            return;
        };
        let mut guard = FinalizeGuard::new(res);
        if let Some(tag) = if_none_match {
            guard.set_expected_hash(tag);
        }
        guard.set_hash_and_handle_not_modified();
    });

    producer.await??;
    finalizer.await?;
    let mut finished = done_rx.await?;
    connection_alive.store(false, Ordering::Release);

    finished.render_payload()?;
    finished.prepare_payload()?;
    print_response(&finished);

    tracing::info!(response_id = %finished.id(), "Shutdown complete");
    Ok(())
}

/// First stage: fill the payload and relocate the response to the next stage.
async fn produce(
    mut res: Response,
    status: u16,
    next: oneshot::Sender<Response>,
) -> Result<(), ResponseError> {
    if !res.is_alive() {
        tracing::warn!(response_id = %res.id(), "Connection closed before producing");
        return Ok(());
    }
    res.set_status_code(status)?;
    res.set_payload(json!({
        "Name": "Demo Resource",
        "Status": { "State": "Enabled", "Health": "OK" },
        "Members": [1, 2, 3],
    }));
    if next.send(res.take()).is_err() {
        tracing::warn!("Finalizer stage went away");
    }
    Ok(())
}

fn print_response(res: &Response) {
    let message = res.message();
    println!("{:?} {} {}", message.version(), res.status_code(), res.reason());
    for (name, value) in message.headers() {
        println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    println!();
    if !res.body().is_empty() {
        println!("{}", res.body());
    }
}
