use std::net::{Ipv4Addr, SocketAddr};

/// Region used in synthesized DNS names unless configured otherwise.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Settings for one simulator instance.
///
/// The default binds an ephemeral port on the loopback interface, which is
/// what tests want: every server gets its own address.
///
/// # Example
///
/// ```
/// use elbsim_server::ServerConfig;
///
/// let config = ServerConfig::default()
///     .with_bind_addr("127.0.0.1:8080".parse().unwrap())
///     .with_region("eu-west-1");
/// assert_eq!(config.region, "eu-west-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub region: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ephemeral_loopback() {
        let config = ServerConfig::default();
        assert!(config.bind_addr.ip().is_loopback());
        assert_eq!(config.bind_addr.port(), 0);
        assert_eq!(config.region, "us-east-1");
    }
}
