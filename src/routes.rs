// Route path constants - single source of truth for all API paths

pub const REGISTER: &str = "/register";
pub const EMPLOYEE_ITEM: &str = "/employee/{id}";
pub const EMPLOYEES: &str = "/employees";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
