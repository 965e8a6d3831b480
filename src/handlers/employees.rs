use crate::error::{ApiError, ErrorResponse};
use crate::models::Employee;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// GET /employees handler - List all employees
///
/// @Method: GET
/// @Route: /employees
#[utoipa::path(
    get,
    path = routes::EMPLOYEES,
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "employees"
)]
pub async fn employees_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Employee>>), ApiError> {
    let employees = state.spanner_client.list_all().await?;
    tracing::info!("Listed {} employees", employees.len());
    Ok((StatusCode::OK, Json(employees)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::router;
    use crate::spanner::tests::{emulator_client, sample_employee};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_employees_lists_registered() {
        let Some(client) = emulator_client("employees-endpoint-test").await else {
            return;
        };
        let state = AppState::new(client);
        let app = router(state.clone());

        let id = Uuid::new_v4();
        state
            .spanner_client
            .insert(id, &sample_employee(&id.simple().to_string()))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/employees")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let employees: Vec<Employee> = serde_json::from_slice(&body).unwrap();
        assert!(employees.iter().any(|e| e.id == id.to_string()));
    }
}
