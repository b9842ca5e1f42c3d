use serde::{Deserialize, Serialize};

use crate::models::wallet::PaginationInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub plate_number: String,
    pub host_name: String,
    pub host_phone: String,
}

/// `POST /vehicle/search` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePage {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    pub pagination: Option<PaginationInfo>,
}
