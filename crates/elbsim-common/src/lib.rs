//! ELB Simulator Common Types and Transport
//!
//! This crate provides the protocol definitions and HTTP helpers shared by the
//! simulator server and by client code exercised against it.
//!
//! # Overview
//!
//! The simulator speaks the Elastic Load Balancing "Query" protocol:
//!
//! - **Requests**: an `Action` field plus action-specific fields, form encoded
//!   in the query string or in an `application/x-www-form-urlencoded` body
//! - **Responses**: XML documents shaped like the real service's responses
//! - **Errors**: an `ErrorResponse` XML document carrying a code and message,
//!   with the HTTP status taken from the error
//!
//! # Components
//!
//! - [`protocol`] - Parameters, response documents and the error taxonomy
//! - [`transport`] - Conversion between hyper requests/responses and protocol types
//!
//! # Example
//!
//! ```
//! use elbsim_common::{ActionResponse, Params};
//!
//! let params = Params::parse(b"Action=DeleteLoadBalancer&LoadBalancerName=lb1");
//! assert_eq!(params.action(), Some("DeleteLoadBalancer"));
//!
//! let response = ActionResponse::delete_load_balancer("req0");
//! assert!(response.to_xml().unwrap().contains("<RequestId>req0</RequestId>"));
//! ```

pub mod protocol;
pub mod transport;

pub use protocol::*;
