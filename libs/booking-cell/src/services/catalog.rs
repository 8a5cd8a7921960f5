// libs/booking-cell/src/services/catalog.rs
use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{BookingError, Service};

pub struct CatalogService {
    supabase: SupabaseClient,
}

impl CatalogService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Active services offered by a business
    pub async fn services_for_business(&self, business_id: &str) -> Result<Vec<Service>> {
        debug!("Fetching services for business: {}", business_id);

        let path = format!(
            "/rest/v1/services?business_id=eq.{}&is_active=eq.true&select=*&order=name.asc",
            urlencoding::encode(business_id)
        );

        self.supabase.request(Method::GET, &path, None, None).await
    }

    /// Services by id, in the order requested. Fails on any id the store does not know.
    pub async fn services_by_ids(&self, service_ids: &[String]) -> Result<Vec<Service>, BookingError> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_list = service_ids
            .iter()
            .map(|id| urlencoding::encode(&quote_list_item(id)).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        let path = format!("/rest/v1/services?id=in.({})&select=*", id_list);

        let found: Vec<Service> = self.supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| BookingError::Lookup(e.to_string()))?;

        service_ids
            .iter()
            .map(|id| {
                found
                    .iter()
                    .find(|service| &service.id == id)
                    .cloned()
                    .ok_or_else(|| BookingError::UnknownService(id.clone()))
            })
            .collect()
    }
}

/// Double-quote a value for a PostgREST `in.(...)` list so commas,
/// parentheses and quotes inside an id stay part of that id.
fn quote_list_item(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_list_item() {
        assert_eq!(quote_list_item("svc-1"), r#""svc-1""#);
        assert_eq!(quote_list_item("svc,1"), r#""svc,1""#);
        assert_eq!(quote_list_item("a(b)"), r#""a(b)""#);
        assert_eq!(quote_list_item(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote_list_item(r"back\slash"), r#""back\\slash""#);
    }
}
