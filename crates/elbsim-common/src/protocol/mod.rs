pub mod error;
pub mod params;
pub mod responses;


pub use error::{ElbError, Result, SimError};
pub use params::Params;
pub use responses::{
    ActionResponse, CreateLoadBalancerResponse, CreateLoadBalancerResult,
    DeleteLoadBalancerResponse, DeregisterInstancesFromLoadBalancerResponse, ErrorDetail,
    ErrorResponse, InstanceMember, Instances, RegisterInstancesWithLoadBalancerResponse,
    RegisterInstancesWithLoadBalancerResult, ResponseMetadata, XMLNS,
};
