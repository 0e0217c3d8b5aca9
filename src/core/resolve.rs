//! Static evaluation of key expressions.
//!
//! Resolution reduces a [`KeyExpr`] to a literal by following local
//! bindings, object-literal members and imports. Member chains are
//! resolved root-first: `a.b.c` looks up `a` with the pending path
//! `["b", "c"]`, so a path can cross into another module without the
//! resolver ever holding references into that module's tree.
//!
//! Every binding, member or import step counts towards a depth limit;
//! self-referential initializers and import cycles end as `Unknown`.

use std::path::Path;
use std::sync::Arc;

use crate::core::expr::{KeyExpr, MemberKey, ObjectEntry, format_number};
use crate::core::importer::{ExportName, ImportRequest, Importer};
use crate::core::scope::{Binding, ImportBinding, ImportedName, ScopeChain, module_scope};

/// Default bound on resolution steps.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Outcome of resolving an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Str(String),
    Num(f64),
    /// Regex or function: can never name a property.
    NonStatic,
    /// Known object literal without the requested member.
    Missing,
    /// Not statically reducible (missing binding, unsupported shape, import miss...).
    Unknown,
}

impl ResolvedValue {
    /// The property name this value stands for, if it is a literal.
    pub fn into_name(self) -> Option<String> {
        match self {
            ResolvedValue::Str(s) => Some(s),
            ResolvedValue::Num(n) => Some(format_number(n)),
            ResolvedValue::NonStatic | ResolvedValue::Missing | ResolvedValue::Unknown => None,
        }
    }
}

/// Lexical context of one resolution step.
#[derive(Debug, Clone, Copy)]
struct Env<'s> {
    scopes: ScopeChain<'s>,
    /// File the scopes belong to, for relative imports.
    file: Option<&'s Path>,
}

/// Resolves key expressions against scopes and an importer.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    importer: &'a dyn Importer,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(importer: &'a dyn Importer) -> Self {
        Self {
            importer,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve `expr` as seen from `scopes` in `file`.
    pub fn resolve(
        &self,
        expr: &KeyExpr,
        scopes: ScopeChain<'_>,
        file: Option<&Path>,
    ) -> ResolvedValue {
        self.resolve_path(expr, &[], Env { scopes, file }, 0)
    }

    /// Resolve `expr`, then follow `path` through object members.
    fn resolve_path(
        &self,
        expr: &KeyExpr,
        path: &[String],
        env: Env<'_>,
        depth: usize,
    ) -> ResolvedValue {
        if depth > self.max_depth {
            return ResolvedValue::Unknown;
        }

        match expr {
            KeyExpr::Str(s) if path.is_empty() => ResolvedValue::Str(s.clone()),
            KeyExpr::Num(n) if path.is_empty() => ResolvedValue::Num(*n),
            KeyExpr::Regex | KeyExpr::FunctionLike if path.is_empty() => ResolvedValue::NonStatic,
            KeyExpr::Ident(name) => self.resolve_binding(name, path, env, depth),
            KeyExpr::Member { object, property } => {
                let Some(head) = self.member_name(property, env, depth) else {
                    return ResolvedValue::Unknown;
                };
                let mut full_path = Vec::with_capacity(path.len() + 1);
                full_path.push(head);
                full_path.extend_from_slice(path);
                self.resolve_path(object, &full_path, env, depth + 1)
            }
            KeyExpr::Object(entries) => match path.split_first() {
                Some((head, rest)) => self.resolve_member(entries, head, rest, env, depth),
                None => ResolvedValue::Unknown,
            },
            _ => ResolvedValue::Unknown,
        }
    }

    fn member_name(&self, key: &MemberKey, env: Env<'_>, depth: usize) -> Option<String> {
        match key {
            MemberKey::Name(name) => Some(name.clone()),
            MemberKey::Computed(expr) => self.resolve_path(expr, &[], env, depth + 1).into_name(),
        }
    }

    /// Find `head` among object entries; later entries win, as in JavaScript.
    ///
    /// Only entries known not to define `head` are skipped. A later computed
    /// key or spread that cannot be reduced might define it, so the lookup
    /// stops there as `Unknown`.
    fn resolve_member(
        &self,
        entries: &[ObjectEntry],
        head: &str,
        rest: &[String],
        env: Env<'_>,
        depth: usize,
    ) -> ResolvedValue {
        for entry in entries.iter().rev() {
            match entry {
                ObjectEntry::Property { key, value } => match self.member_name(key, env, depth) {
                    Some(name) if name == head => {
                        return self.resolve_path(value, rest, env, depth + 1);
                    }
                    Some(_) => {}
                    None => return ResolvedValue::Unknown,
                },
                ObjectEntry::Spread(target) => {
                    let mut full_path = Vec::with_capacity(rest.len() + 1);
                    full_path.push(head.to_string());
                    full_path.extend_from_slice(rest);
                    match self.resolve_path(target, &full_path, env, depth + 1) {
                        ResolvedValue::Missing => {}
                        found => return found,
                    }
                }
            }
        }
        ResolvedValue::Missing
    }

    fn resolve_binding(
        &self,
        name: &str,
        path: &[String],
        env: Env<'_>,
        depth: usize,
    ) -> ResolvedValue {
        match env.scopes.lookup(name) {
            Some((Binding::Value(init), declaring)) => self.resolve_path(
                init,
                path,
                Env {
                    scopes: declaring,
                    file: env.file,
                },
                depth + 1,
            ),
            Some((Binding::Import(import), _)) => self.resolve_import(import, path, env, depth),
            Some((Binding::Opaque, _)) | None => ResolvedValue::Unknown,
        }
    }

    /// Ask the importer for the declaration and continue inside its module.
    fn resolve_import(
        &self,
        import: &ImportBinding,
        path: &[String],
        env: Env<'_>,
        depth: usize,
    ) -> ResolvedValue {
        let (export, rest) = match &import.imported {
            ImportedName::Default => (ExportName::Default, path),
            ImportedName::Named(name) => (ExportName::from_str_name(name), path),
            // `ns.foo` names the export `foo`; a bare namespace is an object.
            ImportedName::Namespace => match path.split_first() {
                Some((head, rest)) => (ExportName::from_str_name(head), rest),
                None => return ResolvedValue::Unknown,
            },
        };

        let request = ImportRequest {
            source: &import.source,
            export: &export,
            from: env.file,
        };
        let Some(imported) = self.importer.resolve(&request) else {
            return ResolvedValue::Unknown;
        };

        let scopes = [Arc::new(module_scope(&imported.module))];
        let value = KeyExpr::from(&*imported.expr);
        self.resolve_path(
            &value,
            rest,
            Env {
                scopes: ScopeChain::new(&scopes),
                file: imported.path.as_deref(),
            },
            depth + 1,
        )
    }
}
