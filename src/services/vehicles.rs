use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::models::vehicle::{Vehicle, VehiclePage};
use crate::services::backend::BackendClient;
use crate::services::notifications::NotificationCenter;

/// Vehicle listing administration: paginated browse, plate lookup, delete.
/// Plate lookups are cached with a TTL since hosts rarely re-register.
#[derive(Clone)]
pub struct VehicleService {
    backend: BackendClient,
    notifications: NotificationCenter,
    plate_cache: Arc<Cache<String, Vehicle>>,
}

impl VehicleService {
    pub fn new(backend: BackendClient, notifications: NotificationCenter) -> Self {
        let cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(Duration::from_secs(600)) // 10 minutes
            .build();

        Self {
            backend,
            notifications,
            plate_cache: Arc::new(cache),
        }
    }

    pub async fn list(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<VehiclePage, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .backend
            .post("/vehicle/search")
            .query(&[("page", page.to_string()), ("limit", limit.to_string())])
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let listing: VehiclePage = self.backend.read_json(response).await?;

        tracing::info!(
            "Fetched {} vehicles on page {}",
            listing.vehicles.len(),
            page
        );
        Ok(listing)
    }

    pub async fn find_by_plate(
        &self,
        plate: &str,
    ) -> Result<Vehicle, Box<dyn std::error::Error + Send + Sync>> {
        let key = normalize_plate(plate);

        if let Some(cached) = self.plate_cache.get(&key).await {
            tracing::debug!("Plate cache hit for {}", key);
            return Ok(cached);
        }

        let response = self.backend.get(&format!("/vehicle/{}", key)).send().await?;
        let vehicle: Vehicle = self.backend.read_json(response).await?;

        self.plate_cache.insert(key, vehicle.clone()).await;
        Ok(vehicle)
    }

    /// Remove a listing from the marketplace. Invalidates the plate cache so
    /// a later lookup reflects the deletion.
    pub async fn delete(
        &self,
        plate: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let key = normalize_plate(plate);

        let result = match self
            .backend
            .delete(&format!("/admin/vehicle/{}", key))
            .send()
            .await
        {
            Ok(response) => self
                .backend
                .read_json::<serde_json::Value>(response)
                .await
                .map(|_| ()),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => {
                self.plate_cache.invalidate(&key).await;
                self.notifications
                    .success(format!("Vehicle {} removed from the marketplace", key));
                Ok(())
            }
            Err(e) => {
                self.notifications
                    .error(format!("Failed to delete vehicle {}: {}", key, e));
                Err(e)
            }
        }
    }
}

fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plates_are_normalized_for_cache_keys() {
        assert_eq!(normalize_plate("  rad123a "), "RAD123A");
        assert_eq!(normalize_plate("RAD123A"), "RAD123A");
    }
}
