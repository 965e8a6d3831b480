use serde::{Deserialize, Serialize};

/// Employee record as accepted by `POST /register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub work_experience: i64,
    pub phone_number: String,
}

/// Stored employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub work_experience: i64,
    pub phone_number: String,
    /// RFC 3339 commit timestamp of the registration
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub registered_at: Option<String>,
}

/// Response type for a successful registration
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub id: String,
    pub message: String,
}
