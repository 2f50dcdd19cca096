// TODO! Add TLS support for the http-server source

use clap::Parser;
use darkroom::commands::base::Cli;
use tracing_subscriber::prelude::*;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let cli_args = Cli::parse();

    let (tx, rx): (
        tokio::sync::mpsc::Sender<String>,
        tokio::sync::mpsc::Receiver<String>,
    ) = tokio::sync::mpsc::channel(10);

    log::info!("Launching payload processor tokio channel...");
    let processor = tokio::spawn(darkroom::event_handler::handle_received_payloads(
        rx,
        cli_args.output_directory.clone(),
        cli_args.config(),
    ));

    cli_args.handle(tx).await?;

    // sources hang up the channel when they finish; let the processor
    // drain whatever is still queued before exiting
    if let Err(err) = processor.await {
        log::error!("Payload processor task failed: {}", err);
    }

    Ok(())
}
