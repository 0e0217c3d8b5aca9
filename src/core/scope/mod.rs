//! Lexical scopes and binding lookup.
//!
//! A `Scope` is an owned snapshot of the names one syntactic scope declares.
//! Chains are plain slices of shared scopes ordered outermost to innermost;
//! lookups walk them from the innermost end.

mod builder;

use std::collections::HashMap;
use std::sync::Arc;

pub use builder::{
    arrow_scope, block_scope, catch_scope, constructor_scope, for_head_scope, function_scope,
    getter_scope, module_scope, setter_scope,
};

use crate::core::expr::KeyExpr;

/// How a name was introduced.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Single static initializer (`const x = init`, or an unassigned `let`/`var`).
    Value(KeyExpr),
    /// Bound by an import declaration.
    Import(ImportBinding),
    /// Declared, but not statically reducible (params, destructuring, reassigned...).
    Opaque,
}

/// Where an imported name comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub source: String,
    pub imported: ImportedName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedName {
    /// `import foo from "m"`
    Default,
    /// `import { foo } from "m"` / `import { bar as foo } from "m"`
    Named(String),
    /// `import * as foo from "m"`
    Namespace,
}

/// Names declared directly by one syntactic scope.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Declare a name. A second declaration of the same name in one scope
    /// makes it opaque.
    pub fn declare(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings
            .entry(name.into())
            .and_modify(|existing| *existing = Binding::Opaque)
            .or_insert(binding);
    }

    /// Declare a name that is known to be opaque, overriding anything else.
    pub fn declare_opaque(&mut self, name: impl Into<String>) {
        self.bindings.insert(name.into(), Binding::Opaque);
    }
}

/// Read-only view of the scopes visible at some point, outermost first.
#[derive(Debug, Clone, Copy)]
pub struct ScopeChain<'s> {
    scopes: &'s [Arc<Scope>],
}

impl<'s> ScopeChain<'s> {
    pub fn new(scopes: &'s [Arc<Scope>]) -> Self {
        Self { scopes }
    }

    pub fn empty() -> ScopeChain<'static> {
        ScopeChain { scopes: &[] }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Find the nearest declaration of `name`, walking innermost first.
    ///
    /// Returns the binding together with the chain visible from the
    /// declaring scope, which is where its initializer must be resolved.
    pub fn lookup(&self, name: &str) -> Option<(&'s Binding, ScopeChain<'s>)> {
        self.scopes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, scope)| {
                scope.get(name).map(|binding| {
                    (
                        binding,
                        ScopeChain {
                            scopes: &self.scopes[..=index],
                        },
                    )
                })
            })
    }

    /// Initializer of the nearest single-assignment binding of `name`.
    ///
    /// Imports and opaque declarations count as "not found".
    pub fn initializer(&self, name: &str) -> Option<&'s KeyExpr> {
        match self.lookup(name)? {
            (Binding::Value(init), _) => Some(init),
            _ => None,
        }
    }
}
