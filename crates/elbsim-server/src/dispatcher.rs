//! Action Dispatcher
//!
//! The dispatcher maps the `Action` field of a request to its handler and runs
//! the handler against the state store.
//!
//! # Architecture
//!
//! - **Registry**: action name to [`Action`] trait object, built once per
//!   dispatcher
//! - **Serialization**: one mutex guards the store; a handler holds it for
//!   its whole run (validation, mutation, response construction)
//! - **Request ids**: drawn from the store only once an action is recognized,
//!   so unknown actions leave the counter untouched
//!
//! # Example
//!
//! ```
//! use elbsim_server::{Dispatcher, ServerConfig};
//! use elbsim_common::Params;
//!
//! let dispatcher = Dispatcher::new(&ServerConfig::default());
//! let params = Params::new()
//!     .with("Action", "DeleteLoadBalancer")
//!     .with("LoadBalancerName", "lb1");
//! let response = dispatcher.dispatch(&params).unwrap();
//! assert_eq!(response.request_id(), "req0");
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use elbsim_common::{ActionResponse, ElbError, Params};

use crate::actions::{
    Action, CreateLoadBalancer, DeleteLoadBalancer, DeregisterInstances, RegisterInstances,
};
use crate::config::ServerConfig;
use crate::store::StateStore;

pub struct Dispatcher {
    actions: HashMap<&'static str, Box<dyn Action>>,
    store: Mutex<StateStore>,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty store and the four supported actions.
    pub fn new(config: &ServerConfig) -> Self {
        let actions: Vec<Box<dyn Action>> = vec![
            Box::new(CreateLoadBalancer::new(config.region.clone())),
            Box::new(DeleteLoadBalancer),
            Box::new(RegisterInstances),
            Box::new(DeregisterInstances),
        ];

        Self {
            actions: actions.into_iter().map(|a| (a.name(), a)).collect(),
            store: Mutex::new(StateStore::new()),
        }
    }

    /// Runs the action named by the request's `Action` field.
    ///
    /// Unknown or missing actions are rejected without touching the store.
    /// A recognized action draws the next request id and runs with the store
    /// lock held until its response is built.
    ///
    /// # Arguments
    ///
    /// * `params` - The merged parameter set of the request
    ///
    /// # Returns
    ///
    /// The action's response document, or the `ElbError` to report
    ///
    /// # Example
    ///
    /// ```
    /// use elbsim_server::{Dispatcher, ServerConfig};
    /// use elbsim_common::{ElbError, Params};
    ///
    /// let dispatcher = Dispatcher::new(&ServerConfig::default());
    /// let err = dispatcher
    ///     .dispatch(&Params::new().with("Action", "DescribeLoadBalancers"))
    ///     .unwrap_err();
    /// assert_eq!(err, ElbError::UnrecognizedAction);
    /// ```
    pub fn dispatch(&self, params: &Params) -> Result<ActionResponse, ElbError> {
        let name = params.action().unwrap_or_default();
        let Some(action) = self.actions.get(name) else {
            tracing::info!("Unrecognized action: {:?}", name);
            return Err(ElbError::UnrecognizedAction);
        };

        let mut store = self.lock();
        let request_id = store.next_request_id();
        tracing::debug!("Dispatching {} as {}", name, request_id);

        let result = action.execute(&mut *store, params, &request_id);
        if let Err(e) = &result {
            tracing::info!("{} {} rejected: {}: {}", name, request_id, e.code(), e);
        }
        result
    }

    /// Runs `f` against the store under the dispatch lock.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut StateStore) -> R) -> R {
        let mut store = self.lock();
        f(&mut *store)
    }

    fn lock(&self) -> MutexGuard<'_, StateStore> {
        // Handlers validate before mutating, so a panic mid-request cannot
        // leave the store half-updated.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
