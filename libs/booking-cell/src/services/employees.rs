// libs/booking-cell/src/services/employees.rs
use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Employee, EmployeeServiceRow};

/// Source of the employees able to perform a given service.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn employees_for_service(&self, service_id: &str) -> Result<Vec<Employee>>;
}

pub struct SupabaseEmployeeDirectory {
    supabase: SupabaseClient,
}

impl SupabaseEmployeeDirectory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl EmployeeDirectory for SupabaseEmployeeDirectory {
    async fn employees_for_service(&self, service_id: &str) -> Result<Vec<Employee>> {
        debug!("Fetching employees for service: {}", service_id);

        let path = format!(
            "/rest/v1/employee_services?service_id=eq.{}&select=employees(id,first_name,last_name,position,avatar_url)",
            urlencoding::encode(service_id)
        );

        let rows: Vec<EmployeeServiceRow> = self.supabase
            .request(Method::GET, &path, None, None)
            .await?;

        let employees = normalize_employee_rows(rows);
        debug!("Service {} has {} eligible employees", service_id, employees.len());

        Ok(employees)
    }
}

/// Flatten embedded `employees` relations into one list, dropping empty
/// relations and repeated ids while keeping first-seen order.
pub fn normalize_employee_rows(rows: Vec<EmployeeServiceRow>) -> Vec<Employee> {
    let mut seen = HashSet::new();

    rows.into_iter()
        .filter_map(|row| row.employees)
        .flat_map(|employees| employees.into_vec())
        .filter(|employee| seen.insert(employee.id.clone()))
        .collect()
}
