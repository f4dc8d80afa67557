//! Request validation.
//!
//! Checks come in two kinds: rules over the parameter set alone (required
//! fields, composition pairs) and membership checks against the
//! [`StateStore`]. Each returns the first violation it finds.

use elbsim_common::protocol::params::member_key;
use elbsim_common::{ElbError, Params};

use crate::store::StateStore;

/// Fails on the first field of `names`, in order, that is absent or empty.
pub fn require_fields(params: &Params, names: &[&str]) -> Result<(), ElbError> {
    match names.iter().find(|name| !params.contains(name)) {
        Some(missing) => Err(ElbError::missing_field(missing)),
        None => Ok(()),
    }
}

/// Checks that exactly one field of every pair is present.
///
/// Some fields cannot appear together in a request, such as
/// `AvailabilityZones.member.1` and `Subnets.member.1`, yet one of them is
/// always needed. Pairs are checked in order and independently.
pub fn require_composition(params: &Params, pairs: &[(&str, &str)]) -> Result<(), ElbError> {
    for &(first, second) in pairs {
        match (params.contains(first), params.contains(second)) {
            (true, true) => return Err(ElbError::conflicting_fields(first, second)),
            (false, false) => return Err(ElbError::missing_one_of(first, second)),
            _ => {}
        }
    }
    Ok(())
}

pub fn require_load_balancer_exists(store: &StateStore, name: &str) -> Result<(), ElbError> {
    if store.load_balancer_exists(name) {
        Ok(())
    } else {
        Err(ElbError::LoadBalancerNotFound(name.to_string()))
    }
}

pub fn require_instance_exists(store: &StateStore, id: &str) -> Result<(), ElbError> {
    if store.instance_exists(id) {
        Ok(())
    } else {
        Err(ElbError::InvalidInstance(id.to_string()))
    }
}

/// Values of `Prefix.member.<i>.Field` for `i = 1, 2, …`, stopping at the
/// first absent or empty one.
pub fn indexed_members<'a>(params: &'a Params, prefix: &str, field: &str) -> Vec<&'a str> {
    (1..)
        .map(|i| params.get(&member_key(prefix, i, field)))
        .take_while(Option::is_some)
        .flatten()
        .collect()
}
