use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::handlers::{AppState, HttpResponse, error_response, route};
use crate::logging::{log_error_stderr, log_info};

// Start the HTTP server with Tokio
pub fn start_server(config: ServerConfig) -> (tokio::task::JoinHandle<()>, Arc<AtomicBool>) {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let shutdown_clone = Arc::clone(&shutdown_signal);

    let handle = tokio::spawn(async move {
        let ip = config
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or([127, 0, 0, 1].into());
        let addr = SocketAddr::from((ip, config.port));
        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                log_error_stderr(&format!("Failed to start bingo server: {e}"));
                return;
            }
        };
        log_info(&format!(
            "Server starting on http://{addr} (keeping {} recent games)",
            config.game_count
        ));

        let state = Arc::new(AppState::new(config));

        loop {
            if shutdown_clone.load(Ordering::Relaxed) {
                break;
            }

            // Accept connections with a timeout so the shutdown flag is polled
            let accept_result =
                tokio::time::timeout(std::time::Duration::from_millis(100), listener.accept())
                    .await;

            match accept_result {
                Ok(Ok((stream, _))) => {
                    let state = Arc::clone(&state);
                    let io = TokioIo::new(stream);

                    tokio::spawn(async move {
                        let service =
                            service_fn(move |req| handle_request(req, Arc::clone(&state)));

                        if let Err(err) = http1::Builder::new().serve_connection(io, service).await
                        {
                            log_error_stderr(&format!("Error serving connection: {err:?}"));
                        }
                    });
                }
                Ok(Err(e)) => {
                    log_error_stderr(&format!("Error accepting connection: {e}"));
                    break;
                }
                Err(_) => {
                    // Timeout occurred, continue to check shutdown signal
                }
            }
        }
        log_info("Bingo server shutting down...");
    });

    (handle, shutdown_signal)
}

// Read the whole body, then hand the request to the router
async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<HttpResponse, Infallible> {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            log_error_stderr(&format!("Failed to read request body: {e}"));
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ));
        }
    };
    let response = route(
        &parts.method,
        parts.uri.path(),
        parts.uri.query(),
        &body,
        &state,
    );
    log_info(&format!(
        "{} {} -> {}",
        parts.method,
        parts.uri.path(),
        response.status()
    ));
    Ok(response)
}
