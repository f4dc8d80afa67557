//! ELB Simulator Server
//!
//! This crate provides an in-memory simulator of the Elastic Load Balancing
//! API. Client code can be pointed at [`Server::url`] and exercised against
//! realistic request/response cycles, while the test harness provisions
//! instances and load balancers directly through the [`Server`] handle.
//!
//! Four actions are supported: `CreateLoadBalancer`, `DeleteLoadBalancer`,
//! `RegisterInstancesWithLoadBalancer` and
//! `DeregisterInstancesFromLoadBalancer`.

pub mod actions;
pub mod config;
pub mod dispatcher;
pub mod http_server;
pub mod server;
pub mod store;
pub mod validation;

pub use config::ServerConfig;
pub use dispatcher::Dispatcher;
pub use http_server::HttpServer;
pub use server::Server;
pub use store::StateStore;
