// libs/booking-cell/src/services/booking.rs
use std::collections::HashSet;

use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::{
    BookingError, Employee, SelectionOperation, SelectionRequest, SelectionResponse, Service,
};
use crate::services::catalog::CatalogService;
use crate::services::employees::{EmployeeDirectory, SupabaseEmployeeDirectory};
use crate::services::selection::ServiceEmployeeSelection;

pub struct BookingSelectionService {
    catalog: CatalogService,
    directory: Box<dyn EmployeeDirectory>,
}

impl BookingSelectionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            catalog: CatalogService::new(config),
            directory: Box::new(SupabaseEmployeeDirectory::new(config)),
        }
    }

    /// Eligible employees for one service; a failed lookup reads as "nobody available"
    pub async fn employees_for_service(&self, service_id: &str) -> Vec<Employee> {
        self.directory
            .employees_for_service(service_id)
            .await
            .unwrap_or_else(|e| {
                warn!("Employee lookup failed for service {}: {}", service_id, e);
                Vec::new()
            })
    }

    pub async fn services_for_business(&self, business_id: &str) -> Result<Vec<Service>, BookingError> {
        self.catalog
            .services_for_business(business_id)
            .await
            .map_err(|e| BookingError::Lookup(e.to_string()))
    }

    /// Build the pairs for the requested services and replay the customer's
    /// operations in order.
    pub async fn evaluate_selection(&self, request: SelectionRequest) -> Result<SelectionResponse, BookingError> {
        let mut seen = HashSet::new();
        let service_ids: Vec<String> = request
            .service_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        debug!(
            "Evaluating selection over {} services with {} operations",
            service_ids.len(),
            request.operations.len()
        );

        let catalog = self.catalog.services_by_ids(&service_ids).await?;
        let mut selection = ServiceEmployeeSelection::initialize(catalog, self.directory.as_ref()).await;

        for operation in request.operations {
            apply_operation(&mut selection, operation)?;
        }

        let can_proceed = selection.can_proceed();
        let selected = selection.selected_pairs().into_iter().cloned().collect();

        Ok(SelectionResponse {
            pairs: selection.into_pairs(),
            selected,
            can_proceed,
        })
    }
}

/// Apply one customer operation. Unlike `assign_employee` itself, an employee
/// id from the wire must name one of the pair's candidates.
pub fn apply_operation(
    selection: &mut ServiceEmployeeSelection,
    operation: SelectionOperation,
) -> Result<(), BookingError> {
    match operation {
        SelectionOperation::Toggle(service_id) => selection.toggle_service(&service_id),
        SelectionOperation::Assign { service_id, employee_id } => {
            let pair = selection
                .pair(&service_id)
                .ok_or_else(|| BookingError::UnknownService(service_id.clone()))?;

            // only selected pairs may carry an employee
            if !pair.is_selected {
                return Err(BookingError::ServiceNotSelected(service_id));
            }

            let employee = pair
                .candidate(&employee_id)
                .cloned()
                .ok_or_else(|| BookingError::EmployeeNotCandidate {
                    service_id: service_id.clone(),
                    employee_id: employee_id.clone(),
                })?;

            selection.assign_employee(&service_id, employee)
        }
    }
}
