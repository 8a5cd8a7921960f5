// libs/booking-cell/src/services/selection.rs
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::models::{BookingError, Employee, Service, ServicePair};
use crate::services::compatibility::recompute;
use crate::services::employees::EmployeeDirectory;

/// The service/employee pairs of one booking in progress.
///
/// Every mutating call recomputes compatibility before returning, so the
/// pairs observed from outside are always consistent.
#[derive(Debug, Clone, Default)]
pub struct ServiceEmployeeSelection {
    pairs: Vec<ServicePair>,
}

impl ServiceEmployeeSelection {
    /// Build unselected pairs for `catalog`, looking up every service's
    /// employees concurrently. A failed lookup leaves that service with no
    /// candidates instead of failing the whole selection.
    pub async fn initialize(catalog: Vec<Service>, directory: &dyn EmployeeDirectory) -> Self {
        debug!("Initializing selection for {} services", catalog.len());

        let lookups = catalog.iter().map(|service| async move {
            match directory.employees_for_service(&service.id).await {
                Ok(employees) => employees,
                Err(e) => {
                    warn!("Employee lookup failed for service {}: {}", service.id, e);
                    Vec::new()
                }
            }
        });

        // join_all yields results in input order
        let candidates = join_all(lookups).await;

        let pairs = catalog
            .into_iter()
            .zip(candidates)
            .map(|(service, employees)| ServicePair::new(service, employees))
            .collect();

        Self::from_pairs(pairs)
    }

    pub fn from_pairs(pairs: Vec<ServicePair>) -> Self {
        Self {
            pairs: recompute(pairs),
        }
    }

    fn position(&self, service_id: &str) -> Result<usize, BookingError> {
        self.pairs
            .iter()
            .position(|pair| pair.service.id == service_id)
            .ok_or_else(|| BookingError::UnknownService(service_id.to_string()))
    }

    fn refresh(&mut self) {
        self.pairs = recompute(std::mem::take(&mut self.pairs));
    }

    /// Select or deselect a service.
    ///
    /// Deselecting drops the bound employee. Selecting binds the only
    /// candidate when there is exactly one and the service was compatible.
    pub fn toggle_service(&mut self, service_id: &str) -> Result<(), BookingError> {
        let index = self.position(service_id)?;
        let pair = &mut self.pairs[index];

        if pair.is_selected {
            pair.is_selected = false;
            pair.employee = None;
            debug!("Deselected service {}", service_id);
        } else {
            pair.is_selected = true;
            if pair.candidate_employees.len() == 1 && pair.is_compatible {
                pair.employee = pair.candidate_employees.first().cloned();
                debug!("Auto-assigned sole employee to service {}", service_id);
            }
            debug!("Selected service {}", service_id);
        }

        self.refresh();
        Ok(())
    }

    /// Bind `employee` to a service. Membership in the candidate list is
    /// left to the caller.
    pub fn assign_employee(&mut self, service_id: &str, employee: Employee) -> Result<(), BookingError> {
        let index = self.position(service_id)?;

        info!("Assigning employee {} to service {}", employee.id, service_id);
        self.pairs[index].employee = Some(employee);

        self.refresh();
        Ok(())
    }

    pub fn pairs(&self) -> &[ServicePair] {
        &self.pairs
    }

    pub fn pair(&self, service_id: &str) -> Option<&ServicePair> {
        self.pairs.iter().find(|pair| pair.service.id == service_id)
    }

    /// Selected pairs that already have an employee
    pub fn selected_pairs(&self) -> Vec<&ServicePair> {
        self.pairs
            .iter()
            .filter(|pair| pair.is_selected && pair.employee.is_some())
            .collect()
    }

    pub fn can_proceed(&self) -> bool {
        let mut selected = self.pairs.iter().filter(|pair| pair.is_selected).peekable();
        selected.peek().is_some() && selected.all(|pair| pair.employee.is_some())
    }

    pub fn into_pairs(self) -> Vec<ServicePair> {
        self.pairs
    }
}
