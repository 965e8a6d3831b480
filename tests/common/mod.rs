#![allow(dead_code)]

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const HANDLERS_SOURCE: &str = r#"
/// @Method: POST
/// @Route: /register
pub async fn register_handler() {}

/// @Method: GET
/// @Route: /employee/550e8400-e29b-41d4-a716-446655440000
pub async fn employee_handler() {}

/// @Method: GET
/// @Route: /employees
pub async fn employees_handler() {}
"#;

pub fn write(dir: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Run report with one execution per `(method, "a/b", code)`
pub fn report_json(executions: &[(&str, &str, u16)]) -> String {
    let executions: Vec<serde_json::Value> = executions
        .iter()
        .map(|(method, path, code)| {
            let path: Vec<&str> = path.split('/').collect();
            json!({
                "item": {
                    "name": format!("{} /{}", method, path.join("/")),
                    "request": { "method": method, "url": { "path": path } }
                },
                "response": { "code": code }
            })
        })
        .collect();
    json!({ "run": { "executions": executions } }).to_string()
}
