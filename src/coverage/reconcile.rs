use super::{CoverageResult, DeclaredEndpoints, ObservedExecutions, ReconciledEndpoint};

/// Status code that counts as a successful execution
pub const SUCCESS_STATUS: u16 = 200;

/// Decide coverage for every declared endpoint.
///
/// A declared path matches an observed path only when the two strings are
/// identical. Annotations embed example values (`/employee/<some-id>`) rather
/// than parameter patterns, so such routes never match the collapsed
/// `/employee` key and report `Not Covered`. There is no templated-path
/// matching.
///
/// Output has one entry per declared path, sorted by path.
pub fn reconcile(
    declared: &DeclaredEndpoints,
    observed: &ObservedExecutions,
    source: &str,
) -> Vec<ReconciledEndpoint> {
    declared
        .values()
        .map(|endpoint| {
            let result = match observed.get(&endpoint.path) {
                Some(execution) if execution.status_code == SUCCESS_STATUS => {
                    CoverageResult::Success
                }
                Some(_) => CoverageResult::Failure,
                None => CoverageResult::NotCovered,
            };

            let source = match result {
                CoverageResult::NotCovered => String::new(),
                _ => source.to_string(),
            };

            ReconciledEndpoint {
                method: endpoint.method.clone(),
                path: endpoint.path.clone(),
                result,
                source,
            }
        })
        .collect()
}
