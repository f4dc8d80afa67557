//! # ELB Simulator CLI
//!
//! Runs a standalone simulator so that clients outside the test process can
//! talk to it.
//!
//! ## Usage
//!
//! ```bash
//! # Ephemeral port on loopback
//! elbsim
//!
//! # Fixed address, two pre-provisioned instances and a load balancer
//! elbsim -b 127.0.0.1:8080 --instances 2 --load-balancer web
//!
//! # Different region in synthesized DNS names
//! elbsim --region eu-west-1
//! ```
//!
//! The bind address falls back to the `ELBSIM_BIND` environment variable when
//! `-b` is not given. Logging honours `RUST_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use argh::FromArgs;
use elbsim_server::config::DEFAULT_REGION;
use elbsim_server::{Server, ServerConfig};
use std::net::SocketAddr;

const BIND_ENV: &str = "ELBSIM_BIND";

#[derive(FromArgs)]
/// In-memory Elastic Load Balancing API simulator
struct Cli {
    /// address to bind (default: 127.0.0.1:0, or $ELBSIM_BIND)
    #[argh(option, short = 'b')]
    bind: Option<String>,

    /// region used in synthesized DNS names
    #[argh(option, default = "DEFAULT_REGION.to_string()")]
    region: String,

    /// number of instances to provision at startup
    #[argh(option, default = "0")]
    instances: usize,

    /// name of a load balancer to provision at startup (repeatable)
    #[argh(option)]
    load_balancer: Vec<String>,
}

/// Picks the bind address: the flag, then the environment, then the default.
fn resolve_bind(flag: Option<String>, env: Option<String>) -> Result<SocketAddr> {
    match flag.or(env) {
        Some(addr) => addr
            .parse()
            .with_context(|| format!("Invalid bind address: '{}'", addr)),
        None => Ok(ServerConfig::default().bind_addr),
    }
}

fn provision(server: &Server, instances: usize, load_balancers: &[String]) {
    for name in load_balancers {
        server.new_load_balancer(name);
        tracing::info!("Provisioned load balancer {}", name);
    }
    for _ in 0..instances {
        let id = server.new_instance();
        tracing::info!("Provisioned instance {}", id);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    // Set default log level to INFO, but allow RUST_LOG env var to override
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let bind_addr = resolve_bind(cli.bind, std::env::var(BIND_ENV).ok())?;
    let config = ServerConfig::default()
        .with_bind_addr(bind_addr)
        .with_region(cli.region);

    let server = Server::start(config).await?;
    provision(&server, cli.instances, &cli.load_balancer);
    tracing::info!("ELB simulator available at {}", server.url());

    tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;
    tracing::info!("Stopping");
    server.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bind_defaults_to_ephemeral() {
        let addr = resolve_bind(None, None).unwrap();
        assert_eq!(addr, ServerConfig::default().bind_addr);
    }

    #[test]
    fn test_resolve_bind_flag_beats_env() {
        let addr = resolve_bind(
            Some("127.0.0.1:9000".into()),
            Some("127.0.0.1:9001".into()),
        )
        .unwrap();
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn test_resolve_bind_uses_env() {
        let addr = resolve_bind(None, Some("0.0.0.0:8080".into())).unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_resolve_bind_rejects_garbage() {
        let err = resolve_bind(Some("localhost".into()), None).unwrap_err();
        assert!(err.to_string().contains("Invalid bind address"));
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::from_args(
            &["elbsim"],
            &[
                "-b",
                "127.0.0.1:8080",
                "--instances",
                "2",
                "--load-balancer",
                "a",
                "--load-balancer",
                "b",
            ],
        )
        .unwrap();
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(cli.instances, 2);
        assert_eq!(cli.load_balancer, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cli.region, "us-east-1");
    }

    #[tokio::test]
    async fn test_provision() {
        let server = Server::start(ServerConfig::default()).await.unwrap();
        provision(&server, 3, &["web".to_string()]);
        assert_eq!(server.instances(), vec!["i-1", "i-2", "i-3"]);
        assert_eq!(server.load_balancers(), vec!["web"]);
    }
}
