//! Response Documents
//!
//! This module defines the XML documents returned by the simulator. Their
//! element layout follows the real service, so clients that decode real
//! responses decode these as well.
//!
//! # Response Flow
//!
//! 1. A handler validates and applies an action
//! 2. It returns an [`ActionResponse`] (or an [`ElbError`])
//! 3. The transport renders either one with [`ActionResponse::to_xml`] or
//!    [`ErrorResponse::to_xml`]
//!
//! Documents also implement `Deserialize` so tests and client code can read
//! them back with `quick_xml::de::from_str`.

use serde::{Deserialize, Serialize};

use super::error::{ElbError, Result};

/// Namespace of the 2012-06-01 Elastic Load Balancing API.
pub const XMLNS: &str = "http://elasticloadbalancing.amazonaws.com/doc/2012-06-01/";

fn xmlns() -> String {
    XMLNS.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseMetadata {
    #[serde(rename = "RequestId")]
    pub request_id: String,
}

impl ResponseMetadata {
    fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "CreateLoadBalancerResponse")]
pub struct CreateLoadBalancerResponse {
    #[serde(rename = "@xmlns", default = "xmlns")]
    pub xmlns: String,
    #[serde(rename = "CreateLoadBalancerResult")]
    pub result: CreateLoadBalancerResult,
    #[serde(rename = "ResponseMetadata")]
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateLoadBalancerResult {
    #[serde(rename = "DNSName")]
    pub dns_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "DeleteLoadBalancerResponse")]
pub struct DeleteLoadBalancerResponse {
    #[serde(rename = "@xmlns", default = "xmlns")]
    pub xmlns: String,
    #[serde(rename = "ResponseMetadata")]
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "RegisterInstancesWithLoadBalancerResponse")]
pub struct RegisterInstancesWithLoadBalancerResponse {
    #[serde(rename = "@xmlns", default = "xmlns")]
    pub xmlns: String,
    #[serde(rename = "RegisterInstancesWithLoadBalancerResult")]
    pub result: RegisterInstancesWithLoadBalancerResult,
    #[serde(rename = "ResponseMetadata")]
    pub metadata: ResponseMetadata,
}

impl RegisterInstancesWithLoadBalancerResponse {
    /// Registered instance ids, in request order.
    pub fn instance_ids(&self) -> Vec<&str> {
        self.result
            .instances
            .members
            .iter()
            .map(|m| m.instance_id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterInstancesWithLoadBalancerResult {
    #[serde(rename = "Instances")]
    pub instances: Instances,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Instances {
    #[serde(rename = "member", default)]
    pub members: Vec<InstanceMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceMember {
    #[serde(rename = "InstanceId")]
    pub instance_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "DeregisterInstancesFromLoadBalancerResponse")]
pub struct DeregisterInstancesFromLoadBalancerResponse {
    #[serde(rename = "@xmlns", default = "xmlns")]
    pub xmlns: String,
    #[serde(rename = "ResponseMetadata")]
    pub metadata: ResponseMetadata,
}

/// Successful outcome of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResponse {
    CreateLoadBalancer(CreateLoadBalancerResponse),
    DeleteLoadBalancer(DeleteLoadBalancerResponse),
    RegisterInstances(RegisterInstancesWithLoadBalancerResponse),
    DeregisterInstances(DeregisterInstancesFromLoadBalancerResponse),
}

impl ActionResponse {
    pub fn create_load_balancer(request_id: &str, dns_name: impl Into<String>) -> Self {
        ActionResponse::CreateLoadBalancer(CreateLoadBalancerResponse {
            xmlns: xmlns(),
            result: CreateLoadBalancerResult {
                dns_name: dns_name.into(),
            },
            metadata: ResponseMetadata::new(request_id),
        })
    }

    pub fn delete_load_balancer(request_id: &str) -> Self {
        ActionResponse::DeleteLoadBalancer(DeleteLoadBalancerResponse {
            xmlns: xmlns(),
            metadata: ResponseMetadata::new(request_id),
        })
    }

    pub fn register_instances(request_id: &str, instance_ids: Vec<String>) -> Self {
        let members = instance_ids
            .into_iter()
            .map(|instance_id| InstanceMember { instance_id })
            .collect();
        ActionResponse::RegisterInstances(RegisterInstancesWithLoadBalancerResponse {
            xmlns: xmlns(),
            result: RegisterInstancesWithLoadBalancerResult {
                instances: Instances { members },
            },
            metadata: ResponseMetadata::new(request_id),
        })
    }

    pub fn deregister_instances(request_id: &str) -> Self {
        ActionResponse::DeregisterInstances(DeregisterInstancesFromLoadBalancerResponse {
            xmlns: xmlns(),
            metadata: ResponseMetadata::new(request_id),
        })
    }

    pub fn request_id(&self) -> &str {
        match self {
            ActionResponse::CreateLoadBalancer(r) => &r.metadata.request_id,
            ActionResponse::DeleteLoadBalancer(r) => &r.metadata.request_id,
            ActionResponse::RegisterInstances(r) => &r.metadata.request_id,
            ActionResponse::DeregisterInstances(r) => &r.metadata.request_id,
        }
    }

    /// Renders the response document.
    pub fn to_xml(&self) -> Result<String> {
        let xml = match self {
            ActionResponse::CreateLoadBalancer(r) => quick_xml::se::to_string(r)?,
            ActionResponse::DeleteLoadBalancer(r) => quick_xml::se::to_string(r)?,
            ActionResponse::RegisterInstances(r) => quick_xml::se::to_string(r)?,
            ActionResponse::DeregisterInstances(r) => quick_xml::se::to_string(r)?,
        };
        Ok(xml)
    }
}

/// `ErrorResponse` document wrapping a protocol error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename = "ErrorResponse")]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    #[serde(rename = "StatusCode")]
    pub status_code: u16,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl ErrorResponse {
    pub fn to_xml(&self) -> Result<String> {
        Ok(quick_xml::se::to_string(self)?)
    }
}

impl From<&ElbError> for ErrorResponse {
    fn from(err: &ElbError) -> Self {
        Self {
            error: ErrorDetail {
                status_code: err.status_code(),
                code: err.code().to_string(),
                message: err.to_string(),
            },
        }
    }
}
