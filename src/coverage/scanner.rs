//! Annotation scanner.
//!
//! Walks a source tree and records every function whose doc comment carries
//! both a `@Method:` and a `@Route:` line, for example:
//!
//! ```text
//! /// @Method: GET
//! /// @Route: /employees
//! pub async fn employees_handler(...) { ... }
//! ```
//!
//! Files are processed in sorted path order and declarations in source order,
//! so when two declarations claim the same path the first one always wins no
//! matter how the filesystem happens to enumerate the tree.

use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use syn::{Attribute, Expr, ImplItem, Item, Lit, Meta, TraitItem};
use walkdir::{DirEntry, WalkDir};

use super::error::{AnalyzeError, Result};
use super::{DeclaredEndpoint, DeclaredEndpoints};

pub const METHOD_MARKER: &str = "@Method:";
pub const ROUTE_MARKER: &str = "@Route:";

const SOURCE_EXTENSION: &str = "rs";

/// An annotated declaration found in a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub method: String,
    pub path: String,
}

/// Scan every Rust source file under `root`.
///
/// Fails only if `root` itself is unusable. Individual files that cannot be
/// read or parsed are logged and skipped.
pub fn scan_directory(root: &Path) -> Result<DeclaredEndpoints> {
    let metadata = fs::metadata(root).map_err(|e| AnalyzeError::ScanRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !metadata.is_dir() {
        return Err(AnalyzeError::ScanRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let files = collect_source_files(root);
    tracing::debug!("Scanning {} source files under {}", files.len(), root.display());
    Ok(scan_files(&files))
}

/// Scan an explicit list of files. The order of `files` does not affect the result.
pub fn scan_files(files: &[PathBuf]) -> DeclaredEndpoints {
    let mut ordered: Vec<&PathBuf> = files.iter().collect();
    ordered.sort();
    ordered.dedup();

    let mut endpoints = DeclaredEndpoints::new();
    for file in ordered {
        let declarations = match scan_file(file) {
            Ok(declarations) => declarations,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };

        for declaration in declarations {
            match endpoints.entry(declaration.path.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(DeclaredEndpoint {
                        method: declaration.method,
                        path: declaration.path,
                        file: file.clone(),
                    });
                }
                Entry::Occupied(existing) => {
                    tracing::warn!(
                        "Conflicting declaration for {} ({} in {}); keeping {} from {}",
                        declaration.path,
                        declaration.method,
                        file.display(),
                        existing.get().method,
                        existing.get().file.display()
                    );
                }
            }
        }
    }

    endpoints
}

/// Read and parse a single file
pub fn scan_file(file: &Path) -> Result<Vec<Declaration>> {
    let source = fs::read_to_string(file).map_err(|e| AnalyzeError::FileScan {
        path: file.to_path_buf(),
        reason: e.to_string(),
    })?;

    extract_declarations(&source).map_err(|e| AnalyzeError::FileScan {
        path: file.to_path_buf(),
        reason: format!("parse error: {}", e),
    })
}

/// Extract annotated declarations from Rust source text, in source order
pub fn extract_declarations(source: &str) -> syn::Result<Vec<Declaration>> {
    let file = syn::parse_file(source)?;
    let mut declarations = Vec::new();
    collect_items(&file.items, &mut declarations);
    Ok(declarations)
}

fn collect_items(items: &[Item], out: &mut Vec<Declaration>) {
    for item in items {
        match item {
            Item::Fn(item_fn) => push_annotated(&item_fn.attrs, out),
            Item::Impl(item_impl) => {
                for impl_item in &item_impl.items {
                    if let ImplItem::Fn(method) = impl_item {
                        push_annotated(&method.attrs, out);
                    }
                }
            }
            Item::Trait(item_trait) => {
                for trait_item in &item_trait.items {
                    if let TraitItem::Fn(method) = trait_item {
                        push_annotated(&method.attrs, out);
                    }
                }
            }
            Item::Mod(item_mod) => {
                if let Some((_, nested)) = &item_mod.content {
                    collect_items(nested, out);
                }
            }
            _ => {}
        }
    }
}

fn push_annotated(attrs: &[Attribute], out: &mut Vec<Declaration>) {
    let mut method = None;
    let mut route = None;

    for line in doc_lines(attrs) {
        // `/** */` blocks often carry a `*` gutter
        let text = line.trim();
        let text = text.strip_prefix('*').unwrap_or(text).trim_start();
        if let Some(value) = text.strip_prefix(METHOD_MARKER) {
            method = non_empty(value);
        } else if let Some(value) = text.strip_prefix(ROUTE_MARKER) {
            route = non_empty(value);
        }
    }

    if let (Some(method), Some(route)) = (method, route) {
        out.push(Declaration {
            method,
            path: normalize_route(&route),
        });
    }
}

/// Doc comment text, one entry per line. A `/** */` block may span several.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr_lit) => match &expr_lit.lit {
                    Lit::Str(s) => Some(s.value()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .flat_map(|doc| doc.lines().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn normalize_route(route: &str) -> String {
    if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{}", route)
    }
}

fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Error walking {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext == SOURCE_EXTENSION)
        })
        .map(DirEntry::into_path)
        .collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "target" || name.starts_with('.')
}
