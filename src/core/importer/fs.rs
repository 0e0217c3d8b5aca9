use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use swc_ecma_ast::Module;

use super::{
    ExportName, ExportTarget, ImportRequest, ImportedNode, Importer, MAX_FORWARD_HOPS,
    find_export, star_exports,
};
use crate::core::parsers::parse_file;

/// Extensions tried, in order, when a specifier has no file of its own.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Importer that loads relative imports from disk.
///
/// Only `./` and `../` specifiers are resolved; package imports are left
/// unresolved. Parsed modules (and failures) are cached for the lifetime
/// of the importer, so one instance can be shared across threads.
#[derive(Default)]
pub struct FsImporter {
    cache: Mutex<HashMap<PathBuf, Option<Arc<Module>>>>,
}

impl FsImporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&self, path: &Path) -> Option<Arc<Module>> {
        if let Ok(cache) = self.cache.lock()
            && let Some(cached) = cache.get(path)
        {
            return cached.clone();
        }

        // Parse outside the lock so other threads are not blocked on I/O.
        let module = parse_file(&path.to_string_lossy())
            .ok()
            .map(|parsed| Arc::new(parsed.module));

        let mut cache = self.cache.lock().ok()?;
        cache
            .entry(path.to_path_buf())
            .or_insert(module)
            .clone()
    }

    fn lookup(
        &self,
        from: &Path,
        specifier: &str,
        export: &ExportName,
        hops: usize,
    ) -> Option<ImportedNode> {
        if hops > MAX_FORWARD_HOPS {
            return None;
        }
        let path = resolve_import_path(from, specifier)?;
        let module = self.load(&path)?;

        match find_export(&module, export) {
            Some(ExportTarget::Expr(expr)) => Some(ImportedNode {
                expr,
                module,
                path: Some(path),
            }),
            Some(ExportTarget::Forward { source, export }) => {
                self.lookup(&path, &source, &export, hops + 1)
            }
            None if *export == ExportName::Default => None,
            None => star_exports(&module)
                .iter()
                .find_map(|source| self.lookup(&path, source, export, hops + 1)),
        }
    }
}

impl Importer for FsImporter {
    fn resolve(&self, request: &ImportRequest<'_>) -> Option<ImportedNode> {
        self.lookup(request.from?, request.source, request.export, 0)
    }
}

/// Resolve a relative import specifier to an existing source file.
///
/// Tries the path as written, then each of [`SOURCE_EXTENSIONS`] appended,
/// then `index.<ext>` inside it.
pub fn resolve_import_path(current_file: &Path, specifier: &str) -> Option<PathBuf> {
    if !(specifier.starts_with("./") || specifier.starts_with("../")) {
        return None;
    }

    let base_dir = current_file.parent()?;
    let resolved = base_dir.join(specifier);

    if resolved.is_file() {
        return Some(resolved);
    }

    for ext in SOURCE_EXTENSIONS {
        let mut with_ext = resolved.clone().into_os_string();
        with_ext.push(".");
        with_ext.push(ext);
        let with_ext = PathBuf::from(with_ext);
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }

    SOURCE_EXTENSIONS
        .iter()
        .map(|ext| resolved.join(format!("index.{}", ext)))
        .find(|index| index.is_file())
}
