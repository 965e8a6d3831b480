//! Collection-run report parser.
//!
//! Reads the JSON report a Newman-compatible runner writes with
//! `--reporters json` and reduces it to the last observed status per path.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::{AnalyzeError, Result};
use super::{ObservedExecution, ObservedExecutions};

/// First path segment of the single-resource-by-id route.
///
/// Executions against `/employee/{id}` are all collapsed onto the bare
/// `/employee` key, so every concrete id counts as the same logical endpoint.
pub const SINGLE_RESOURCE_SEGMENT: &str = "employee";

#[derive(Debug, Deserialize)]
struct RunReport {
    run: Run,
}

#[derive(Debug, Default, Deserialize)]
struct Run {
    #[serde(default)]
    executions: Vec<Execution>,
}

#[derive(Debug, Default, Deserialize)]
struct Execution {
    #[serde(default)]
    item: Item,
    #[serde(default)]
    response: Response,
}

#[derive(Debug, Default, Deserialize)]
struct Item {
    #[serde(default)]
    request: Request,
}

#[derive(Debug, Default, Deserialize)]
struct Request {
    #[serde(default)]
    method: String,
    #[serde(default)]
    url: Url,
}

#[derive(Debug, Default, Deserialize)]
struct Url {
    #[serde(default)]
    path: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Response {
    #[serde(default)]
    code: u16,
}

/// Read and parse a run report file
pub fn parse_report(path: &Path) -> Result<ObservedExecutions> {
    let data = fs::read_to_string(path).map_err(|source| AnalyzeError::ReportRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report_str(&data)
}

/// Parse run report JSON. Later executions of the same path overwrite earlier ones.
pub fn parse_report_str(data: &str) -> Result<ObservedExecutions> {
    let report: RunReport = serde_json::from_str(data)?;

    let mut observed = ObservedExecutions::new();
    for execution in report.run.executions {
        let path = reconstruct_path(&execution.item.request.url.path);
        tracing::debug!(
            "Observed {} {} -> {}",
            execution.item.request.method,
            path,
            execution.response.code
        );
        observed.insert(
            path.clone(),
            ObservedExecution {
                method: execution.item.request.method,
                path,
                status_code: execution.response.code,
            },
        );
    }

    Ok(observed)
}

/// Join path segments into `/a/b`, collapsing `/employee/{id}` onto `/employee`
pub fn reconstruct_path(segments: &[String]) -> String {
    let segments = match segments {
        [first, second, ..] if first == SINGLE_RESOURCE_SEGMENT && !second.is_empty() => {
            &segments[..1]
        }
        _ => segments,
    };
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn execution(method: &str, path: &[&str], code: u16) -> serde_json::Value {
        json!({
            "item": {
                "name": format!("{} {}", method, path.join("/")),
                "request": {
                    "method": method,
                    "url": { "path": path }
                }
            },
            "response": { "code": code }
        })
    }

    fn report(executions: Vec<serde_json::Value>) -> String {
        json!({ "run": { "executions": executions } }).to_string()
    }

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconstruct_simple_path() {
        assert_eq!(reconstruct_path(&segments(&["employees"])), "/employees");
        assert_eq!(reconstruct_path(&segments(&["api", "v1", "items"])), "/api/v1/items");
        assert_eq!(reconstruct_path(&[]), "/");
    }

    #[test]
    fn test_single_resource_by_id_collapses() {
        assert_eq!(reconstruct_path(&segments(&["employee", "abc123"])), "/employee");
        assert_eq!(reconstruct_path(&segments(&["employee", "abc123", "x"])), "/employee");
        // empty id segment is left alone
        assert_eq!(reconstruct_path(&segments(&["employee", ""])), "/employee/");
        assert_eq!(reconstruct_path(&segments(&["employees", "abc123"])), "/employees/abc123");
    }

    #[test]
    fn test_parse_report_executions() {
        let data = report(vec![
            execution("POST", &["register"], 200),
            execution("GET", &["employee", "abc123"], 404),
            execution("GET", &["employees"], 200),
        ]);

        let observed = parse_report_str(&data).unwrap();
        assert_eq!(observed.len(), 3);
        assert_eq!(observed["/register"].status_code, 200);
        assert_eq!(observed["/register"].method, "POST");
        assert_eq!(observed["/employee"].status_code, 404);
        assert_eq!(observed["/employees"].status_code, 200);
    }

    #[test]
    fn test_last_execution_for_a_path_wins() {
        let data = report(vec![
            execution("POST", &["register"], 200),
            execution("POST", &["register"], 409),
        ]);

        let observed = parse_report_str(&data).unwrap();
        assert_eq!(observed["/register"].status_code, 409);
    }

    #[test]
    fn test_execution_without_response_defaults_to_zero() {
        let data = json!({
            "run": { "executions": [
                { "item": { "request": { "method": "GET", "url": { "path": ["employees"] } } } }
            ] }
        })
        .to_string();

        let observed = parse_report_str(&data).unwrap();
        assert_eq!(observed["/employees"].status_code, 0);
    }

    #[test]
    fn test_invalid_json_is_format_error() {
        let result = parse_report_str("{not json");
        assert!(matches!(result, Err(AnalyzeError::ReportFormat(_))));
    }

    #[test]
    fn test_wrong_shape_is_format_error() {
        let result = parse_report_str(r#"{"run": {"executions": "nope"}}"#);
        assert!(matches!(result, Err(AnalyzeError::ReportFormat(_))));

        let result = parse_report_str(r#"{"collection": {}}"#);
        assert!(matches!(result, Err(AnalyzeError::ReportFormat(_))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = parse_report(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(AnalyzeError::ReportRead { .. })));
    }

    #[test]
    fn test_parse_report_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("newman-report.json");
        fs::write(&path, report(vec![execution("GET", &["employees"], 200)])).unwrap();

        let observed = parse_report(&path).unwrap();
        assert_eq!(observed["/employees"].status_code, 200);
    }
}
