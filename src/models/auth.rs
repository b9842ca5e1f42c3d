use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: String,
    pub user: AdminUser,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub user_type: String,
    pub status: String,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailField,
    #[serde(default)]
    pub phone: Option<String>,
}

/// The backend wraps emails with a verification flag.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailField {
    pub value: String,
    #[serde(default)]
    pub status: bool,
}
