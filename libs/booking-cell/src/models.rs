use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub avatar_url: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    pub business_id: Option<String>,
    pub name: String,
    pub duration_minutes: Option<i32>,
    pub price: Option<f64>,
}

/// A bookable service together with who can perform it and what the
/// customer has picked so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicePair {
    pub service: Service,
    pub employee: Option<Employee>,
    pub candidate_employees: Vec<Employee>,
    pub is_selected: bool,
    pub is_compatible: bool,
    pub reason: Option<String>,
}

impl ServicePair {
    pub fn new(service: Service, candidate_employees: Vec<Employee>) -> Self {
        Self {
            service,
            employee: None,
            candidate_employees,
            is_selected: false,
            is_compatible: true,
            reason: None,
        }
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidate_employees.is_empty()
    }

    pub fn candidate(&self, employee_id: &str) -> Option<&Employee> {
        self.candidate_employees.iter().find(|e| e.id == employee_id)
    }
}

/// PostgREST returns an embedded relation as an object or an array depending
/// on how it infers cardinality.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Row of `employee_services` with the `employees` relation embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeServiceRow {
    pub employees: Option<OneOrMany<Employee>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOperation {
    Toggle(String),
    Assign {
        service_id: String,
        employee_id: String,
    },
}

/// Body of `POST /booking/selection`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub operations: Vec<SelectionOperation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub pairs: Vec<ServicePair>,
    pub selected: Vec<ServicePair>,
    pub can_proceed: bool,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Service {0} is not selected")]
    ServiceNotSelected(String),

    #[error("Employee {employee_id} cannot perform service {service_id}")]
    EmployeeNotCandidate {
        service_id: String,
        employee_id: String,
    },

    #[error("Lookup failed: {0}")]
    Lookup(String),
}
