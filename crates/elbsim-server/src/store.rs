/// In-memory model of load balancers and instances.
///
/// The store never fails: removals of unknown entries are no-ops and lookups
/// simply answer whether an entry exists. It is not synchronized on its own;
/// the [`Dispatcher`](crate::Dispatcher) owns it behind a single lock.
#[derive(Debug, Default)]
pub struct StateStore {
    load_balancers: Vec<String>,
    instances: Vec<String>,
    /// Next request sequence number, rendered in hex
    request_seq: u64,
    /// Last synthesized instance number
    instance_seq: u64,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a load balancer. Names are not deduplicated.
    pub fn add_load_balancer(&mut self, name: impl Into<String>) {
        self.load_balancers.push(name.into());
    }

    /// Removes the first load balancer with this name, if any.
    pub fn remove_load_balancer(&mut self, name: &str) {
        if let Some(pos) = self.load_balancers.iter().position(|lb| lb == name) {
            self.load_balancers.remove(pos);
        }
    }

    pub fn load_balancer_exists(&self, name: &str) -> bool {
        self.load_balancers.iter().any(|lb| lb == name)
    }

    /// Records an instance and returns its id.
    ///
    /// Without an explicit id, one is synthesized as `i-<n>` from a counter
    /// that starts at 1 and is never rewound.
    pub fn add_instance(&mut self, explicit_id: Option<String>) -> String {
        let id = explicit_id.unwrap_or_else(|| {
            self.instance_seq += 1;
            format!("i-{}", self.instance_seq)
        });
        self.instances.push(id.clone());
        id
    }

    /// Removes the first instance with this id, if any.
    pub fn remove_instance(&mut self, id: &str) {
        if let Some(pos) = self.instances.iter().position(|i| i == id) {
            self.instances.remove(pos);
        }
    }

    pub fn instance_exists(&self, id: &str) -> bool {
        self.instances.iter().any(|i| i == id)
    }

    /// Returns `req<HEX>` and advances the request counter.
    pub fn next_request_id(&mut self) -> String {
        let id = format!("req{:X}", self.request_seq);
        self.request_seq += 1;
        id
    }

    pub fn load_balancers(&self) -> Vec<String> {
        self.load_balancers.clone()
    }

    pub fn instances(&self) -> Vec<String> {
        self.instances.clone()
    }
}
