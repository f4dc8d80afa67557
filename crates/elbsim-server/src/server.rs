use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::dispatcher::Dispatcher;
use crate::http_server::HttpServer;
use elbsim_common::protocol::error::{Result, SimError};

/// A running simulator.
///
/// Besides serving the protocol over HTTP, the handle exposes the calls a
/// test harness uses to provision state out of band: load balancers can be
/// created and removed directly, and instances only exist once provisioned
/// here. These calls take the same lock as request dispatch.
///
/// Dropping the handle stops the accept loop.
///
/// # Example
///
/// ```no_run
/// use elbsim_server::{Server, ServerConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let server = Server::start(ServerConfig::default()).await.unwrap();
///     server.new_load_balancer("lb1");
///     let instance = server.new_instance();
///     println!("{} serving {}", server.url(), instance);
/// }
/// ```
pub struct Server {
    addr: SocketAddr,
    url: String,
    dispatcher: Arc<Dispatcher>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<()>>>,
}

impl Server {
    /// Binds `config.bind_addr` and starts serving in the background.
    ///
    /// # Arguments
    ///
    /// * `config` - Bind address and region of the simulator
    ///
    /// # Returns
    ///
    /// A handle to the running server, or a `SimError` if binding fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use elbsim_server::{Server, ServerConfig};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let config = ServerConfig::default().with_region("eu-west-1");
    ///     let server = Server::start(config).await.unwrap();
    ///     println!("listening on {}", server.url());
    ///     server.shutdown().await.unwrap();
    /// }
    /// ```
    pub async fn start(config: ServerConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr).await.map_err(|e| {
            SimError::Transport(format!("Failed to bind to {}: {}", config.bind_addr, e))
        })?;
        let addr = listener.local_addr()?;

        let dispatcher = Arc::new(Dispatcher::new(&config));
        let (shutdown, rx) = oneshot::channel();
        let task = tokio::spawn(HttpServer::new(dispatcher.clone()).serve(listener, rx));

        Ok(Self {
            addr,
            url: format!("http://{}", addr),
            dispatcher,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:49152`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting connections. Calling it again does nothing.
    pub fn quit(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The accept loop may already be gone after an accept error.
            let _ = shutdown.send(());
        }
    }

    /// Stops accepting connections and waits for the accept loop to finish.
    pub async fn shutdown(mut self) -> Result<()> {
        self.quit();
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| SimError::Transport(format!("Server task failed: {}", e)))?,
            None => Ok(()),
        }
    }

    pub fn new_load_balancer(&self, name: &str) {
        self.dispatcher.with_store(|s| s.add_load_balancer(name));
    }

    /// Removes a load balancer; unknown names are ignored.
    pub fn remove_load_balancer(&self, name: &str) {
        self.dispatcher.with_store(|s| s.remove_load_balancer(name));
    }

    /// Provisions an instance with a synthesized `i-<n>` id.
    pub fn new_instance(&self) -> String {
        self.dispatcher.with_store(|s| s.add_instance(None))
    }

    pub fn new_instance_with_id(&self, id: &str) -> String {
        self.dispatcher.with_store(|s| s.add_instance(Some(id.to_string())))
    }

    /// Removes an instance; unknown ids are ignored.
    pub fn remove_instance(&self, id: &str) {
        self.dispatcher.with_store(|s| s.remove_instance(id));
    }

    pub fn load_balancers(&self) -> Vec<String> {
        self.dispatcher.with_store(|s| s.load_balancers())
    }

    pub fn instances(&self) -> Vec<String> {
        self.dispatcher.with_store(|s| s.instances())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.quit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_binds_ephemeral_port() {
        let server = Server::start(ServerConfig::default()).await.unwrap();
        assert_ne!(server.local_addr().port(), 0);
        assert_eq!(server.url(), format!("http://{}", server.local_addr()));
    }

    #[tokio::test]
    async fn test_lifecycle_surface() {
        let server = Server::start(ServerConfig::default()).await.unwrap();

        server.new_load_balancer("lb1");
        assert_eq!(server.load_balancers(), vec!["lb1".to_string()]);
        server.remove_load_balancer("lb1");
        server.remove_load_balancer("lb1");
        assert!(server.load_balancers().is_empty());

        assert_eq!(server.new_instance(), "i-1");
        assert_eq!(server.new_instance_with_id("i-custom"), "i-custom");
        assert_eq!(server.new_instance(), "i-2");
        server.remove_instance("i-1");
        assert_eq!(server.instances(), vec!["i-custom".to_string(), "i-2".to_string()]);
        assert_eq!(server.new_instance(), "i-3");
    }

    #[tokio::test]
    async fn test_independent_servers_do_not_share_state() {
        let first = Server::start(ServerConfig::default()).await.unwrap();
        let second = Server::start(ServerConfig::default()).await.unwrap();

        first.new_load_balancer("lb1");
        assert_eq!(first.new_instance(), "i-1");
        assert!(second.load_balancers().is_empty());
        assert_eq!(second.new_instance(), "i-1");
        assert_ne!(first.url(), second.url());
    }

    #[tokio::test]
    async fn test_shutdown_completes() {
        let mut server = Server::start(ServerConfig::default()).await.unwrap();
        server.quit();
        server.quit();
        assert!(server.shutdown().await.is_ok());
    }
}
