use crate::error::{ApiError, ErrorResponse};
use crate::models::Employee;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use uuid::Uuid;

pub fn parse_employee_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::InvalidId(id.to_string()))
}

/// GET /employee/:id handler - Fetch one employee
///
/// @Method: GET
/// @Route: /employee/550e8400-e29b-41d4-a716-446655440000
#[utoipa::path(
    get,
    path = routes::EMPLOYEE_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the employee")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn employee_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let id = parse_employee_id(&id_str)?;

    match state.spanner_client.read(id).await? {
        Some(employee) => {
            tracing::info!("Retrieved employee with id: {}", id);
            Ok((StatusCode::OK, Json(employee)))
        }
        None => {
            tracing::info!("Employee not found with id: {}", id);
            Err(ApiError::EmployeeNotFound(id_str))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::router;
    use crate::spanner::tests::{emulator_client, sample_employee};
    use axum::{Router, body::Body, http::Request};
    use tower::ServiceExt;

    async fn setup_test_app() -> Option<(Router, AppState)> {
        let client = emulator_client("employee-endpoint-test").await?;
        let state = AppState::new(client);
        Some((router(state.clone()), state))
    }

    fn get(uri: String) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_parse_employee_id() {
        assert!(parse_employee_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(matches!(
            parse_employee_id("invalid-id"),
            Err(ApiError::InvalidId(_))
        ));
        // 24-char hex ids from older clients are not valid here
        assert!(parse_employee_id("123456789012345678901234").is_err());
    }

    #[tokio::test]
    async fn test_employee_found() {
        let Some((app, state)) = setup_test_app().await else {
            return;
        };

        let id = Uuid::new_v4();
        let employee = sample_employee(&id.simple().to_string());
        state.spanner_client.insert(id, &employee).await.unwrap();

        let response = app.oneshot(get(format!("/employee/{}", id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let fetched: Employee = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched.id, id.to_string());
        assert_eq!(fetched.email, employee.email);
    }

    #[tokio::test]
    async fn test_employee_invalid_id() {
        let Some((app, _)) = setup_test_app().await else {
            return;
        };

        let response = app
            .oneshot(get("/employee/invalid-id".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_employee_not_found() {
        let Some((app, _)) = setup_test_app().await else {
            return;
        };

        let response = app
            .oneshot(get(format!("/employee/{}", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "Employee with this ID doesn't exist");
    }
}
