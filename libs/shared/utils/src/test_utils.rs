use std::sync::Arc;
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub token_secret: Option<String>,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub public_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            token_secret: Some("test-secret-key-for-action-links".to_string()),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            public_base_url: "https://tuturno.test".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_supabase_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn without_secret(mut self) -> Self {
        self.token_secret = None;
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            appointment_token_secret: self.token_secret.clone(),
            public_base_url: self.public_base_url.clone(),
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn employee_response(employee_id: &str, first_name: &str, last_name: &str) -> serde_json::Value {
        json!({
            "id": employee_id,
            "first_name": first_name,
            "last_name": last_name,
            "position": "Stylist",
            "avatar_url": null
        })
    }

    /// `employee_services` row whose embedded relation came back as a single object.
    pub fn employee_service_row(employee: serde_json::Value) -> serde_json::Value {
        json!({ "employees": employee })
    }

    /// `employee_services` row whose embedded relation came back as an array.
    pub fn employee_service_row_many(employees: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "employees": employees })
    }

    pub fn service_response(service_id: &str, business_id: &str, name: &str) -> serde_json::Value {
        json!({
            "id": service_id,
            "business_id": business_id,
            "name": name,
            "duration_minutes": 30,
            "price": 25.0,
            "is_active": true
        })
    }

    pub fn appointment_response(appointment_id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": appointment_id,
            "business_id": Uuid::new_v4(),
            "client_id": Uuid::new_v4(),
            "employee_id": Uuid::new_v4(),
            "service_id": Uuid::new_v4(),
            "start_time": "2026-12-01T10:00:00Z",
            "end_time": "2026-12-01T10:30:00Z",
            "status": status,
            "notes": null,
            "created_at": "2026-11-01T00:00:00Z",
            "updated_at": "2026-11-01T00:00:00Z"
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
