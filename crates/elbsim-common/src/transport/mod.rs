//! Simulator Transport Layer
//!
//! HTTP helpers that sit between hyper and the protocol types: parameter
//! extraction from incoming requests and rendering of response and error
//! documents.

pub mod http;

pub use http::{HttpTransport, HyperResponse};
