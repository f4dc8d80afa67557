//! HTTP Transport Utilities
//!
//! This module converts between hyper's HTTP types and the protocol types.
//!
//! # Components
//!
//! - **[`HttpTransport`]**: Parameter extraction and document rendering
//! - **[`HyperResponse`]**: Type alias for the responses the server sends
//!
//! # Example
//!
//! ```
//! use elbsim_common::transport::http::HttpTransport;
//! use elbsim_common::{ActionResponse, ElbError};
//! use hyper::StatusCode;
//!
//! let params = HttpTransport::parse_params(
//!     Some("Action=DeleteLoadBalancer"),
//!     Some("application/x-www-form-urlencoded"),
//!     b"LoadBalancerName=lb1",
//! );
//! assert_eq!(params.get("LoadBalancerName"), Some("lb1"));
//!
//! let ok = ActionResponse::delete_load_balancer("req0");
//! let ok = HttpTransport::to_http_response(&ok).unwrap();
//! assert_eq!(ok.status(), StatusCode::OK);
//!
//! let err = HttpTransport::to_http_error(&ElbError::UnrecognizedAction).unwrap();
//! assert_eq!(err.status(), StatusCode::BAD_REQUEST);
//! ```

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use crate::protocol::error::{ElbError, Result};
use crate::protocol::{ActionResponse, ErrorResponse, Params};

/// Type alias for hyper responses with a full body
pub type HyperResponse = Response<Full<Bytes>>;

const XML_CONTENT_TYPE: &str = "text/xml";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP transport utility functions
pub struct HttpTransport;

impl HttpTransport {
    /// Collects the parameters of a request.
    ///
    /// The body is read as a form only when `content_type` names
    /// `application/x-www-form-urlencoded`; any other body is ignored. Body
    /// fields come before query-string fields, so a field given in both
    /// places resolves to the body's value.
    ///
    /// # Arguments
    ///
    /// * `query` - The request URI's query string, if any
    /// * `content_type` - The request's `Content-Type` header value, if any
    /// * `body` - Raw HTTP body bytes
    ///
    /// # Returns
    ///
    /// The merged parameter set
    ///
    /// # Example
    ///
    /// ```
    /// use elbsim_common::transport::http::HttpTransport;
    ///
    /// let params = HttpTransport::parse_params(
    ///     Some("Action=DeleteLoadBalancer&LoadBalancerName=a"),
    ///     Some("application/x-www-form-urlencoded"),
    ///     b"LoadBalancerName=b",
    /// );
    /// assert_eq!(params.get("LoadBalancerName"), Some("b"));
    /// ```
    pub fn parse_params(query: Option<&str>, content_type: Option<&str>, body: &[u8]) -> Params {
        let mut params = Params::new();
        if content_type.is_some_and(Self::is_form_content_type) {
            params.extend_from(body);
        }
        if let Some(query) = query {
            params.extend_from(query.as_bytes());
        }
        params
    }

    /// Whether a `Content-Type` value denotes a form-encoded body.
    ///
    /// Media-type parameters such as `charset` are ignored.
    pub fn is_form_content_type(content_type: &str) -> bool {
        content_type
            .split(';')
            .next()
            .map(str::trim)
            .is_some_and(|media| media.eq_ignore_ascii_case(FORM_CONTENT_TYPE))
    }

    /// Renders a successful action as a 200 response.
    ///
    /// # Arguments
    ///
    /// * `response` - The action's result document
    ///
    /// # Returns
    ///
    /// A Hyper HTTP response with an XML body, or a `SimError` if the
    /// document cannot be encoded
    ///
    /// # Example
    ///
    /// ```
    /// use elbsim_common::transport::http::HttpTransport;
    /// use elbsim_common::ActionResponse;
    ///
    /// let response = ActionResponse::delete_load_balancer("req0");
    /// let http_response = HttpTransport::to_http_response(&response).unwrap();
    /// assert_eq!(http_response.status(), 200);
    /// ```
    pub fn to_http_response(response: &ActionResponse) -> Result<HyperResponse> {
        let body = response.to_xml()?;
        Ok(Self::xml_response(StatusCode::OK, body))
    }

    /// Renders a protocol error as an `ErrorResponse` with the error's status.
    ///
    /// # Arguments
    ///
    /// * `error` - The protocol error to report
    ///
    /// # Returns
    ///
    /// A Hyper HTTP response carrying the `ErrorResponse` document, or a
    /// `SimError` if the document cannot be encoded
    ///
    /// # Example
    ///
    /// ```
    /// use elbsim_common::transport::http::HttpTransport;
    /// use elbsim_common::ElbError;
    ///
    /// let error = ElbError::LoadBalancerNotFound("web".into());
    /// let http_response = HttpTransport::to_http_error(&error).unwrap();
    /// assert_eq!(http_response.status(), 400);
    /// ```
    pub fn to_http_error(error: &ElbError) -> Result<HyperResponse> {
        let body = ErrorResponse::from(error).to_xml()?;
        let status = StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
        Ok(Self::xml_response(status, body))
    }

    /// Builds an XML response with the given status.
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code to use
    /// * `body` - Encoded XML document
    pub fn xml_response(status: StatusCode, body: String) -> HyperResponse {
        let mut response = Response::new(Full::new(Bytes::from(body)));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE));
        response
    }
}
