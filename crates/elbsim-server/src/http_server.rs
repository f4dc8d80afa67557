//! HTTP Server for the Simulator
//!
//! This module provides the HTTP/1.1 server built on hyper. It accepts
//! Query-protocol requests and forwards their parameters to the
//! [`Dispatcher`].
//!
//! # Architecture
//!
//! The HTTP server:
//! - Accepts connections on a bound TCP listener until told to shut down
//! - Spawns a tokio task for each connection
//! - Collects parameters from the form-encoded body of POST, PUT and PATCH
//!   requests and from the query string
//! - Renders the dispatcher's result as an XML response or `ErrorResponse`
//!
//! A response that cannot be encoded is a bug in the simulator, not a client
//! error, so the handling task panics instead of answering.

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request};
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::dispatcher::Dispatcher;
use elbsim_common::protocol::error::{Result, SimError};
use elbsim_common::transport::{HttpTransport, HyperResponse};

/// HTTP front end of one simulator instance.
pub struct HttpServer {
    dispatcher: Arc<Dispatcher>,
}

impl HttpServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Serves connections from `listener` until `shutdown` fires.
    ///
    /// Connections already accepted keep being served after shutdown; only
    /// the accept loop stops.
    ///
    /// # Arguments
    ///
    /// * `listener` - A bound listener, typically on an ephemeral port
    /// * `shutdown` - Fires (or is dropped) to stop the accept loop
    ///
    /// # Returns
    ///
    /// `Ok(())` after shutdown, or a `SimError` if accepting fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use elbsim_server::{Dispatcher, HttpServer, ServerConfig};
    /// use std::sync::Arc;
    /// use tokio::net::TcpListener;
    /// use tokio::sync::oneshot;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let dispatcher = Arc::new(Dispatcher::new(&ServerConfig::default()));
    ///     let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    ///     let (_tx, rx) = oneshot::channel();
    ///     HttpServer::new(dispatcher).serve(listener, rx).await.unwrap();
    /// }
    /// ```
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown: oneshot::Receiver<()>,
    ) -> Result<()> {
        let addr = listener
            .local_addr()
            .map_err(|e| SimError::Transport(format!("Failed to get local address: {}", e)))?;
        tracing::info!("HTTP server listening on {}", addr);

        loop {
            let (stream, peer) = tokio::select! {
                accepted = listener.accept() => accepted.map_err(|e| {
                    SimError::Transport(format!("Failed to accept connection: {}", e))
                })?,
                _ = &mut shutdown => {
                    tracing::info!("HTTP server shutting down");
                    return Ok(());
                }
            };
            tracing::trace!("Accepted connection from {}", peer);

            let io = TokioIo::new(stream);
            let dispatcher = self.dispatcher.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let dispatcher = dispatcher.clone();
                    async move { Self::handle_request(dispatcher, req).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::error!("Error serving connection: {}", err);
                }
            });
        }
    }

    /// Handles one HTTP request.
    async fn handle_request(
        dispatcher: Arc<Dispatcher>,
        req: Request<Incoming>,
    ) -> Result<HyperResponse> {
        let query = req.uri().query().map(str::to_string);
        let content_type = match *req.method() {
            Method::POST | Method::PUT | Method::PATCH => req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            _ => None,
        };

        let body = req
            .into_body()
            .collect()
            .await
            .map_err(|e| SimError::Transport(format!("Failed to read request body: {}", e)))?
            .to_bytes();

        let params = HttpTransport::parse_params(query.as_deref(), content_type.as_deref(), &body);

        let encoded = match dispatcher.dispatch(&params) {
            Ok(response) => HttpTransport::to_http_response(&response),
            Err(err) => HttpTransport::to_http_error(&err),
        };

        match encoded {
            Ok(response) => Ok(response),
            Err(e) => panic!("Failed to encode response: {}", e),
        }
    }
}
