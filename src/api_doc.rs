use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{Employee, NewEmployee, RegisterResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "employee-service API",
        version = "1.0.0",
        description = "Employee registration and lookup backed by Google Cloud Spanner"
    ),
    paths(
        handlers::register::register_handler,
        handlers::employee::employee_handler,
        handlers::employees::employees_handler
    ),
    components(schemas(NewEmployee, Employee, RegisterResponse, ErrorResponse)),
    tags(
        (name = "employees", description = "Employee record operations")
    )
)]
pub struct ApiDoc;
