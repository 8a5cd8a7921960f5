// libs/booking-cell/src/services/compatibility.rs
//! Compatibility of not-yet-selected services with the current selection.
//!
//! This is a greedy check against the employees already bound to selected
//! services, not a full assignment solver: a service is offered as long as
//! one of its candidates is someone already in play.

use std::collections::HashSet;

use tracing::debug;

use crate::models::ServicePair;

/// Ids of the employees bound to selected pairs.
pub fn assigned_employee_ids(pairs: &[ServicePair]) -> HashSet<String> {
    pairs
        .iter()
        .filter(|pair| pair.is_selected)
        .filter_map(|pair| pair.employee.as_ref())
        .map(|employee| employee.id.clone())
        .collect()
}

/// Recalculate `is_compatible` and `reason` for every pair.
///
/// Selected pairs are always compatible. With no employee bound anywhere,
/// every pair is compatible. Otherwise an unselected pair is compatible iff
/// one of its candidates is already assigned to a selected service.
pub fn recompute(mut pairs: Vec<ServicePair>) -> Vec<ServicePair> {
    let assigned = assigned_employee_ids(&pairs);

    // (service name, bound employee id) of every selected pair with an employee
    let bound: Vec<(String, String)> = pairs
        .iter()
        .filter(|pair| pair.is_selected)
        .filter_map(|pair| {
            pair.employee
                .as_ref()
                .map(|employee| (pair.service.name.clone(), employee.id.clone()))
        })
        .collect();

    for pair in pairs.iter_mut() {
        if pair.is_selected || assigned.is_empty() {
            pair.is_compatible = true;
            pair.reason = None;
            continue;
        }

        let candidate_ids: HashSet<&str> = pair
            .candidate_employees
            .iter()
            .map(|employee| employee.id.as_str())
            .collect();

        if candidate_ids.iter().any(|id| assigned.contains(*id)) {
            pair.is_compatible = true;
            pair.reason = None;
            continue;
        }

        let conflicting: Vec<&str> = bound
            .iter()
            .filter(|(_, employee_id)| !candidate_ids.contains(employee_id.as_str()))
            .map(|(name, _)| name.as_str())
            .collect();

        debug!(
            "Service {} conflicts with selected services {:?}",
            pair.service.id, conflicting
        );

        pair.is_compatible = false;
        pair.reason = Some(format!(
            "No available employee can also perform {}",
            conflicting.join(", ")
        ));
    }

    pairs
}
