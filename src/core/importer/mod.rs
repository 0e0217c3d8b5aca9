//! Cross-module resolution.
//!
//! The resolver never locates or loads modules itself. It asks an
//! [`Importer`] for the declaration behind a `(specifier, export)` pair and
//! continues resolving inside the returned module.

mod exports;
mod fs;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use swc_common::SourceMap;
use swc_ecma_ast::{Expr, Module};

pub use exports::{ExportTarget, find_export, star_exports};
pub use fs::{FsImporter, SOURCE_EXTENSIONS, resolve_import_path};

use crate::core::parsers::parse_source;

/// Maximum number of `export ... from` hops followed for one request.
pub const MAX_FORWARD_HOPS: usize = 16;

/// Name of an export.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExportName {
    Default,
    Named(String),
}

impl ExportName {
    /// `"default"` is the default export; anything else is a named export.
    pub fn from_str_name(name: &str) -> Self {
        if name == "default" {
            ExportName::Default
        } else {
            ExportName::Named(name.to_string())
        }
    }
}

/// A single request to an importer.
#[derive(Debug, Clone, Copy)]
pub struct ImportRequest<'r> {
    /// Module specifier as written: `"./constants"`
    pub source: &'r str,
    pub export: &'r ExportName,
    /// File containing the import, when known.
    pub from: Option<&'r Path>,
}

/// The declaration an importer found.
#[derive(Debug, Clone)]
pub struct ImportedNode {
    /// Exported expression; resolved against `module`'s top-level scope.
    pub expr: Box<Expr>,
    pub module: Arc<Module>,
    /// File the module was loaded from, used for further relative imports.
    pub path: Option<PathBuf>,
}

/// Resolves `(module specifier, export name)` pairs to declarations.
///
/// Implementations must be deterministic for a given request.
pub trait Importer: Sync {
    fn resolve(&self, request: &ImportRequest<'_>) -> Option<ImportedNode>;
}

/// Importer that never resolves anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreImporter;

impl Importer for IgnoreImporter {
    fn resolve(&self, _: &ImportRequest<'_>) -> Option<ImportedNode> {
        None
    }
}

/// Importer over an in-memory map of specifier to source text.
///
/// Sources are parsed on first use. Forwarding exports use the target
/// specifier as-is, so every module must be registered under the exact
/// specifier other modules use for it.
#[derive(Default)]
pub struct MemoryImporter {
    sources: HashMap<String, String>,
    parsed: Mutex<HashMap<String, Option<Arc<Module>>>>,
}

impl MemoryImporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, specifier: &str, code: &str) -> Self {
        self.sources
            .insert(specifier.to_string(), code.to_string());
        self
    }

    fn module(&self, specifier: &str) -> Option<Arc<Module>> {
        let mut parsed = self.parsed.lock().ok()?;
        parsed
            .entry(specifier.to_string())
            .or_insert_with(|| {
                let code = self.sources.get(specifier)?;
                let file_name = format!("{}.tsx", specifier.trim_start_matches("./"));
                parse_source(code.clone(), &file_name, Arc::new(SourceMap::default()))
                    .ok()
                    .map(|parsed| Arc::new(parsed.module))
            })
            .clone()
    }

    fn lookup(&self, specifier: &str, export: &ExportName, hops: usize) -> Option<ImportedNode> {
        if hops > MAX_FORWARD_HOPS {
            return None;
        }
        let module = self.module(specifier)?;

        match find_export(&module, export) {
            Some(ExportTarget::Expr(expr)) => Some(ImportedNode {
                expr,
                module,
                path: None,
            }),
            Some(ExportTarget::Forward { source, export }) => {
                self.lookup(&source, &export, hops + 1)
            }
            None if *export == ExportName::Default => None,
            None => star_exports(&module)
                .iter()
                .find_map(|source| self.lookup(source, export, hops + 1)),
        }
    }
}

impl Importer for MemoryImporter {
    fn resolve(&self, request: &ImportRequest<'_>) -> Option<ImportedNode> {
        self.lookup(request.source, request.export, 0)
    }
}
