//! Action handlers.
//!
//! Each supported action is a type implementing [`Action`]. Handlers run all
//! of their validation before touching the store, so a rejected request
//! leaves the store unchanged.

use elbsim_common::{ActionResponse, ElbError, Params};

use crate::store::StateStore;
use crate::validation::{
    indexed_members, require_composition, require_fields, require_instance_exists,
    require_load_balancer_exists,
};

const LOAD_BALANCER_NAME: &str = "LoadBalancerName";
const FIRST_INSTANCE_ID: &str = "Instances.member.1.InstanceId";

/// A protocol action.
pub trait Action: Send + Sync {
    /// Value of the `Action` field that selects this handler.
    fn name(&self) -> &'static str;

    /// Validates `params` and applies the action to `store`.
    fn execute(
        &self,
        store: &mut StateStore,
        params: &Params,
        request_id: &str,
    ) -> Result<ActionResponse, ElbError>;
}

/// `CreateLoadBalancer`
pub struct CreateLoadBalancer {
    region: String,
}

impl CreateLoadBalancer {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    fn dns_name(&self, name: &str) -> String {
        format!("{}-some-aws-stuff.{}.elb.amazonaws.com", name, self.region)
    }
}

impl Action for CreateLoadBalancer {
    fn name(&self) -> &'static str {
        "CreateLoadBalancer"
    }

    fn execute(
        &self,
        store: &mut StateStore,
        params: &Params,
        request_id: &str,
    ) -> Result<ActionResponse, ElbError> {
        require_composition(params, &[("AvailabilityZones.member.1", "Subnets.member.1")])?;
        require_fields(
            params,
            &[
                "Listeners.member.1.InstancePort",
                "Listeners.member.1.InstanceProtocol",
                "Listeners.member.1.Protocol",
                "Listeners.member.1.LoadBalancerPort",
                LOAD_BALANCER_NAME,
            ],
        )?;

        // Accepted for compatibility; not echoed back.
        let _path = params.get("Path").unwrap_or("/");

        let name = params.get(LOAD_BALANCER_NAME).unwrap_or_default();
        store.add_load_balancer(name);
        Ok(ActionResponse::create_load_balancer(request_id, self.dns_name(name)))
    }
}

/// `DeleteLoadBalancer`. Deleting an unknown load balancer succeeds.
pub struct DeleteLoadBalancer;

impl Action for DeleteLoadBalancer {
    fn name(&self) -> &'static str {
        "DeleteLoadBalancer"
    }

    fn execute(
        &self,
        store: &mut StateStore,
        params: &Params,
        request_id: &str,
    ) -> Result<ActionResponse, ElbError> {
        require_fields(params, &[LOAD_BALANCER_NAME])?;
        store.remove_load_balancer(params.get(LOAD_BALANCER_NAME).unwrap_or_default());
        Ok(ActionResponse::delete_load_balancer(request_id))
    }
}

/// Shared checks of the registration actions: the load balancer and every
/// listed instance must exist. Returns the instance ids in request order.
fn validate_registration<'a>(
    store: &StateStore,
    params: &'a Params,
) -> Result<Vec<&'a str>, ElbError> {
    require_fields(params, &[LOAD_BALANCER_NAME, FIRST_INSTANCE_ID])?;
    require_load_balancer_exists(store, params.get(LOAD_BALANCER_NAME).unwrap_or_default())?;

    let ids = indexed_members(params, "Instances", "InstanceId");
    for id in &ids {
        require_instance_exists(store, id)?;
    }
    Ok(ids)
}

/// `RegisterInstancesWithLoadBalancer`
pub struct RegisterInstances;

impl Action for RegisterInstances {
    fn name(&self) -> &'static str {
        "RegisterInstancesWithLoadBalancer"
    }

    fn execute(
        &self,
        store: &mut StateStore,
        params: &Params,
        request_id: &str,
    ) -> Result<ActionResponse, ElbError> {
        let ids = validate_registration(store, params)?;
        Ok(ActionResponse::register_instances(
            request_id,
            ids.into_iter().map(str::to_string).collect(),
        ))
    }
}

/// `DeregisterInstancesFromLoadBalancer`
pub struct DeregisterInstances;

impl Action for DeregisterInstances {
    fn name(&self) -> &'static str {
        "DeregisterInstancesFromLoadBalancer"
    }

    fn execute(
        &self,
        store: &mut StateStore,
        params: &Params,
        request_id: &str,
    ) -> Result<ActionResponse, ElbError> {
        validate_registration(store, params)?;
        Ok(ActionResponse::deregister_instances(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_params(name: &str) -> Params {
        Params::new()
            .with("AvailabilityZones.member.1", "us-east-1a")
            .with("Listeners.member.1.InstancePort", "80")
            .with("Listeners.member.1.InstanceProtocol", "HTTP")
            .with("Listeners.member.1.Protocol", "HTTP")
            .with("Listeners.member.1.LoadBalancerPort", "80")
            .with("LoadBalancerName", name)
    }

    fn instance_params(lb: &str, ids: &[&str]) -> Params {
        ids.iter()
            .enumerate()
            .fold(Params::new().with("LoadBalancerName", lb), |p, (i, id)| {
                p.with(format!("Instances.member.{}.InstanceId", i + 1), *id)
            })
    }

    #[test]
    fn test_create_load_balancer() {
        let mut store = StateStore::new();
        let response = CreateLoadBalancer::new("us-east-1")
            .execute(&mut store, &create_params("lb1"), "req0")
            .unwrap();

        match response {
            ActionResponse::CreateLoadBalancer(r) => assert_eq!(
                r.result.dns_name,
                "lb1-some-aws-stuff.us-east-1.elb.amazonaws.com"
            ),
            other => panic!("unexpected response: {:?}", other),
        }
        assert!(store.load_balancer_exists("lb1"));
    }

    #[test]
    fn test_create_uses_configured_region() {
        let mut store = StateStore::new();
        let response = CreateLoadBalancer::new("eu-west-1")
            .execute(&mut store, &create_params("web"), "req0")
            .unwrap();
        let xml = response.to_xml().unwrap();
        assert!(xml.contains("web-some-aws-stuff.eu-west-1.elb.amazonaws.com"));
    }

    #[test]
    fn test_create_with_subnet_instead_of_zone() {
        let mut store = StateStore::new();
        let params = Params::new()
            .with("Subnets.member.1", "subnet-1")
            .with("Listeners.member.1.InstancePort", "80")
            .with("Listeners.member.1.InstanceProtocol", "HTTP")
            .with("Listeners.member.1.Protocol", "HTTP")
            .with("Listeners.member.1.LoadBalancerPort", "80")
            .with("LoadBalancerName", "lb1");
        assert!(CreateLoadBalancer::new("us-east-1")
            .execute(&mut store, &params, "req0")
            .is_ok());
    }

    #[test]
    fn test_create_checks_composition_before_required_fields() {
        let mut store = StateStore::new();
        let params = Params::new().with("LoadBalancerName", "lb1");
        let err = CreateLoadBalancer::new("us-east-1")
            .execute(&mut store, &params, "req0")
            .unwrap_err();
        assert!(err.to_string().contains("must be specified"));
        assert!(store.load_balancers().is_empty());
    }

    #[test]
    fn test_create_reports_first_missing_listener_field() {
        let mut store = StateStore::new();
        let params = Params::new()
            .with("AvailabilityZones.member.1", "us-east-1a")
            .with("LoadBalancerName", "lb1");
        let err = CreateLoadBalancer::new("us-east-1")
            .execute(&mut store, &params, "req0")
            .unwrap_err();
        assert_eq!(err.to_string(), "Listeners.member.1.InstancePort is required.");
        assert!(!store.load_balancer_exists("lb1"));
    }

    #[test]
    fn test_delete_load_balancer() {
        let mut store = StateStore::new();
        store.add_load_balancer("lb1");
        let params = Params::new().with("LoadBalancerName", "lb1");

        let response = DeleteLoadBalancer.execute(&mut store, &params, "req4").unwrap();
        assert_eq!(response, ActionResponse::delete_load_balancer("req4"));
        assert!(!store.load_balancer_exists("lb1"));
    }

    #[test]
    fn test_delete_unknown_load_balancer_succeeds() {
        let mut store = StateStore::new();
        let params = Params::new().with("LoadBalancerName", "ghost");
        assert!(DeleteLoadBalancer.execute(&mut store, &params, "req0").is_ok());
    }

    #[test]
    fn test_delete_requires_name() {
        let mut store = StateStore::new();
        let err = DeleteLoadBalancer
            .execute(&mut store, &Params::new(), "req0")
            .unwrap_err();
        assert_eq!(err, ElbError::missing_field("LoadBalancerName"));
    }

    #[test]
    fn test_register_instances() {
        let mut store = StateStore::new();
        store.add_load_balancer("lb1");
        let first = store.add_instance(None);
        let second = store.add_instance(None);

        let params = instance_params("lb1", &[second.as_str(), first.as_str()]);
        let response = RegisterInstances.execute(&mut store, &params, "req1").unwrap();
        match response {
            ActionResponse::RegisterInstances(r) => {
                assert_eq!(r.instance_ids(), vec!["i-2", "i-1"]);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_register_requires_first_instance() {
        let mut store = StateStore::new();
        store.add_load_balancer("lb1");
        let err = RegisterInstances
            .execute(&mut store, &instance_params("lb1", &[]), "req0")
            .unwrap_err();
        assert_eq!(err, ElbError::missing_field("Instances.member.1.InstanceId"));
    }

    #[test]
    fn test_register_unknown_load_balancer() {
        let mut store = StateStore::new();
        let id = store.add_instance(None);
        let err = RegisterInstances
            .execute(&mut store, &instance_params("lb1", &[id.as_str()]), "req0")
            .unwrap_err();
        assert_eq!(err, ElbError::LoadBalancerNotFound("lb1".into()));
    }

    #[test]
    fn test_register_fails_fast_on_unknown_instance() {
        let mut store = StateStore::new();
        store.add_load_balancer("lb1");
        store.add_instance(None);

        let params = instance_params("lb1", &["i-1", "i-999", "i-998"]);
        let err = RegisterInstances.execute(&mut store, &params, "req0").unwrap_err();
        assert_eq!(err, ElbError::InvalidInstance("i-999".into()));
    }

    #[test]
    fn test_deregister_instances() {
        let mut store = StateStore::new();
        store.add_load_balancer("lb1");
        let id = store.add_instance(None);

        let response = DeregisterInstances
            .execute(&mut store, &instance_params("lb1", &[id.as_str()]), "req2")
            .unwrap();
        assert_eq!(response, ActionResponse::deregister_instances("req2"));
        assert!(store.instance_exists(&id));
    }

    #[test]
    fn test_deregister_unknown_instance() {
        let mut store = StateStore::new();
        store.add_load_balancer("lb1");
        let err = DeregisterInstances
            .execute(&mut store, &instance_params("lb1", &["i-5"]), "req0")
            .unwrap_err();
        assert_eq!(err.code(), "InvalidInstance");
    }

    #[test]
    fn test_deregister_unknown_load_balancer() {
        let mut store = StateStore::new();
        let id = store.add_instance(None);
        let err = DeregisterInstances
            .execute(&mut store, &instance_params("lb1", &[id.as_str()]), "req0")
            .unwrap_err();
        assert_eq!(err, ElbError::LoadBalancerNotFound("lb1".into()));
        assert_eq!(err.code(), "LoadBalancerNotFound");
    }

    #[test]
    fn test_deregister_fails_fast_on_unknown_instance() {
        let mut store = StateStore::new();
        store.add_load_balancer("lb1");
        store.add_instance(None);

        let params = instance_params("lb1", &["i-1", "i-7", "i-8"]);
        let err = DeregisterInstances.execute(&mut store, &params, "req0").unwrap_err();
        assert_eq!(err, ElbError::InvalidInstance("i-7".into()));
        assert!(store.load_balancer_exists("lb1"));
        assert_eq!(store.instances(), vec!["i-1"]);
    }
}
