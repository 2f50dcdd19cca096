use actix_web::{web, App, HttpServer};

/// HTTP POST endpoint handler that receives one scanned payload as plain
/// text and forwards it to the background processing queue.
///
/// Classification happens in the processor, not here, so scanner noise is
/// still ACKed with 200 and reported downstream where the diagnostics
/// live. Only empty bodies are rejected outright; queue send errors are
/// converted to the appropriate HTTP response error type.
pub async fn post_handler(
    req_body: String,
    tx: actix_web::web::Data<tokio::sync::mpsc::Sender<String>>,
) -> actix_web::Result<(), crate::error::http::HTTPResponseError> {
    log::info!("{} bytes received", req_body.len());
    log::debug!("Data received: {}", req_body);

    if req_body.trim().is_empty() {
        return Err(crate::error::http::HTTPResponseError::EmptyPayload);
    }

    tx.send(req_body).await?;

    Ok(())
}

/// CLI arguments for the HTTP source subcommand.
///
/// Provides configuration for where the Actix web server should listen.
#[derive(Debug, clap::Args)]
pub struct HTTPServerTypeSubCommand {
    /// HTTP server listen address
    #[arg(short = 'l', long = "listen", default_value = "127.0.0.1:8080")]
    pub http_server: std::net::SocketAddr,
}

impl HTTPServerTypeSubCommand {
    /// Start the Actix web server and register the POST endpoint scanners
    /// deliver payloads to.
    ///
    /// The server registers a single route at `/` which requires the
    /// `Content-Type: text/plain` header. One worker is enough here:
    /// payloads are queued for the background processor, the endpoint
    /// itself does no decoding work.
    pub async fn handle(
        &self,
        transfer_channel: tokio::sync::mpsc::Sender<String>,
    ) -> std::io::Result<()> {
        log::info!("Launching darkroom application on {}", self.http_server);

        HttpServer::new(move || {
            App::new()
                .wrap(tracing_actix_web::TracingLogger::default())
                .app_data(actix_web::web::Data::new(transfer_channel.clone()))
                .route(
                    "/",
                    web::post()
                        .guard(actix_web::guard::Header("Content-Type", "text/plain"))
                        .to(post_handler),
                )
        })
        .workers(1)
        .bind(&self.http_server)?
        .run()
        .await
    }
}
