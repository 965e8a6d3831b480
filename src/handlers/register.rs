use crate::error::{ApiError, ErrorResponse};
use crate::models::{NewEmployee, RegisterResponse};
use crate::routes;
use crate::spanner::UniqueField;
use crate::state::AppState;
use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use uuid::Uuid;

pub const REGISTERED_MESSAGE: &str = "Employee is Registered";

/// Decode a registration body. Malformed JSON and missing fields are both rejected.
pub fn decode_employee(body: &[u8]) -> Result<NewEmployee, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// POST /register handler - Register a new employee
///
/// Email and phone number must both be unused; email is checked first.
///
/// @Method: POST
/// @Route: /register
#[utoipa::path(
    post,
    path = routes::REGISTER,
    request_body = NewEmployee,
    responses(
        (status = 200, description = "Employee registered", body = RegisterResponse),
        (status = 400, description = "Malformed employee record", body = ErrorResponse),
        (status = 409, description = "Email or phone number already registered", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let employee = decode_employee(&body)?;

    if state
        .spanner_client
        .exists_by(UniqueField::Email, &employee.email)
        .await?
    {
        tracing::info!("Rejected registration, email already in use: {}", employee.email);
        return Err(ApiError::DuplicateEmail);
    }

    if state
        .spanner_client
        .exists_by(UniqueField::PhoneNumber, &employee.phone_number)
        .await?
    {
        tracing::info!(
            "Rejected registration, phone number already in use: {}",
            employee.phone_number
        );
        return Err(ApiError::DuplicatePhone);
    }

    let id = Uuid::new_v4();
    state.spanner_client.insert(id, &employee).await?;

    tracing::info!("Registered employee with id: {}", id);
    Ok((
        StatusCode::OK,
        Json(RegisterResponse {
            id: id.to_string(),
            message: REGISTERED_MESSAGE.to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::router;
    use crate::spanner::tests::{emulator_client, sample_employee};
    use axum::{Router, body::Body, http::Request};
    use tower::ServiceExt;

    async fn setup_test_app() -> Option<Router> {
        let client = emulator_client("register-endpoint-test").await?;
        Some(router(AppState::new(client)))
    }

    fn register_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/register")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_decode_valid_employee() {
        let employee = decode_employee(
            br#"{"name":"Jane","email":"jane@example.com","age":25,"work_experience":3,"phone_number":"555-0100"}"#,
        )
        .unwrap();
        assert_eq!(employee.name, "Jane");
        assert_eq!(employee.work_experience, 3);
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let result = decode_employee(b"{invalid json}");
        assert!(matches!(result, Err(ApiError::JsonError(_))));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let result = decode_employee(br#"{"name":"Jane"}"#);
        assert!(matches!(result, Err(ApiError::JsonError(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let result = decode_employee(
            br#"{"name":"Jane","email":"j@example.com","age":"old","work_experience":3,"phone_number":"1"}"#,
        );
        assert!(matches!(result, Err(ApiError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_register_then_conflicts() {
        let Some(app) = setup_test_app().await else {
            return;
        };

        let tag = Uuid::new_v4().simple().to_string();
        let employee = sample_employee(&tag);
        let payload = serde_json::to_string(&employee).unwrap();

        let response = app
            .clone()
            .oneshot(register_request(payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let registered: RegisterResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(registered.message, REGISTERED_MESSAGE);
        assert!(Uuid::parse_str(&registered.id).is_ok());

        // same email
        let response = app
            .clone()
            .oneshot(register_request(payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("email"));

        // new email, same phone number
        let mut other = employee.clone();
        other.email = format!("another.{}@example.com", tag);
        let response = app
            .oneshot(register_request(serde_json::to_string(&other).unwrap()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("phone number"));
    }

    #[tokio::test]
    async fn test_register_malformed_body() {
        let Some(app) = setup_test_app().await else {
            return;
        };

        let response = app
            .oneshot(register_request("{invalid json}".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
