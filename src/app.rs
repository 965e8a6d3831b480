use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{employee_handler, employees_handler, register_handler};
use crate::routes;
use crate::state::AppState;

/// Build the service router with all routes, Swagger UI and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::REGISTER, post(register_handler))
        .route(routes::EMPLOYEE_ITEM, get(employee_handler))
        .route(routes::EMPLOYEES, get(employees_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
