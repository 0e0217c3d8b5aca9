//! Scope construction from swc syntax.
//!
//! Each builder returns the bindings one syntactic construct introduces.
//! `var` declarations are hoisted to the nearest function (or module) scope;
//! `let`, `const`, functions and classes belong to their block.

use std::collections::HashSet;

use swc_ecma_ast::{
    ArrowExpr, AssignExpr, AssignPat, AssignTarget, BindingIdent, BlockStmt, BlockStmtOrExpr,
    CatchClause, Class, Constructor, Decl, DefaultDecl, Expr, ForHead, Function, GetterProp,
    ImportSpecifier, Module, ModuleDecl, ModuleExportName, ModuleItem, ParamOrTsParamProp, Pat,
    PropName, SetterProp, SimpleAssignTarget, Stmt, TsParamPropParam, UpdateExpr, VarDecl,
    VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::{Binding, ImportBinding, ImportedName, Scope};
use crate::core::expr::{KeyExpr, unwrap_paren};

/// Top-level scope of a module: imports, declarations and hoisted `var`s.
pub fn module_scope(module: &Module) -> Scope {
    let assigned = AssignedNames::collect(module);
    let mut scope = Scope::new();

    for item in &module.body {
        match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                if import.type_only {
                    continue;
                }
                let Some(source) = import.src.value.as_str() else {
                    continue;
                };
                for specifier in &import.specifiers {
                    let (local, imported) = match specifier {
                        ImportSpecifier::Named(named) if named.is_type_only => continue,
                        ImportSpecifier::Named(named) => {
                            let imported = named
                                .imported
                                .as_ref()
                                .map(export_name_string)
                                .unwrap_or_else(|| named.local.sym.to_string());
                            (&named.local, ImportedName::Named(imported))
                        }
                        ImportSpecifier::Default(default) => (&default.local, ImportedName::Default),
                        ImportSpecifier::Namespace(ns) => (&ns.local, ImportedName::Namespace),
                    };
                    scope.declare(
                        local.sym.to_string(),
                        Binding::Import(ImportBinding {
                            source: source.to_string(),
                            imported,
                        }),
                    );
                }
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                declare_lexical(&mut scope, &export.decl, &assigned);
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => match &export.decl {
                DefaultDecl::Fn(f) => {
                    if let Some(ident) = &f.ident {
                        scope.declare(ident.sym.to_string(), Binding::Value(KeyExpr::FunctionLike));
                    }
                }
                DefaultDecl::Class(c) => {
                    if let Some(ident) = &c.ident {
                        scope.declare(ident.sym.to_string(), Binding::Opaque);
                    }
                }
                DefaultDecl::TsInterfaceDecl(_) => {}
            },
            ModuleItem::ModuleDecl(ModuleDecl::TsImportEquals(import)) => {
                scope.declare_opaque(import.id.sym.to_string());
            }
            ModuleItem::Stmt(Stmt::Decl(decl)) => declare_lexical(&mut scope, decl, &assigned),
            _ => {}
        }
    }

    VarHoister::hoist(module, &mut scope, &assigned);
    scope
}

/// Lexical declarations made directly inside a block.
pub fn block_scope(block: &BlockStmt) -> Scope {
    let assigned = AssignedNames::collect(block);
    let mut scope = Scope::new();
    for stmt in &block.stmts {
        if let Stmt::Decl(decl) = stmt {
            declare_lexical(&mut scope, decl, &assigned);
        }
    }
    scope
}

/// Parameters of a function plus the `var`s hoisted out of its body.
pub fn function_scope(function: &Function) -> Scope {
    let mut scope = Scope::new();
    for param in &function.params {
        declare_pattern(&mut scope, &param.pat);
    }
    if let Some(body) = &function.body {
        let assigned = AssignedNames::collect(body);
        VarHoister::hoist(body, &mut scope, &assigned);
    }
    scope
}

/// Parameters of an arrow function plus hoisted `var`s of a block body.
pub fn arrow_scope(arrow: &ArrowExpr) -> Scope {
    let mut scope = Scope::new();
    for param in &arrow.params {
        declare_pattern(&mut scope, param);
    }
    if let BlockStmtOrExpr::BlockStmt(body) = &*arrow.body {
        let assigned = AssignedNames::collect(body);
        VarHoister::hoist(body, &mut scope, &assigned);
    }
    scope
}

/// Constructor parameters, including TypeScript parameter properties.
pub fn constructor_scope(constructor: &Constructor) -> Scope {
    let mut scope = Scope::new();
    for param in &constructor.params {
        match param {
            ParamOrTsParamProp::Param(param) => declare_pattern(&mut scope, &param.pat),
            ParamOrTsParamProp::TsParamProp(prop) => match &prop.param {
                TsParamPropParam::Ident(ident) => scope.declare_opaque(ident.id.sym.to_string()),
                TsParamPropParam::Assign(assign) => declare_pattern(&mut scope, &assign.left),
            },
        }
    }
    if let Some(body) = &constructor.body {
        let assigned = AssignedNames::collect(body);
        VarHoister::hoist(body, &mut scope, &assigned);
    }
    scope
}

/// Object-literal getter: only the `var`s hoisted out of its body.
pub fn getter_scope(getter: &GetterProp) -> Scope {
    let mut scope = Scope::new();
    if let Some(body) = &getter.body {
        let assigned = AssignedNames::collect(body);
        VarHoister::hoist(body, &mut scope, &assigned);
    }
    scope
}

/// Object-literal setter: its parameter plus hoisted `var`s.
pub fn setter_scope(setter: &SetterProp) -> Scope {
    let mut scope = Scope::new();
    declare_pattern(&mut scope, &setter.param);
    if let Some(body) = &setter.body {
        let assigned = AssignedNames::collect(body);
        VarHoister::hoist(body, &mut scope, &assigned);
    }
    scope
}

pub fn catch_scope(clause: &CatchClause) -> Scope {
    let mut scope = Scope::new();
    if let Some(param) = &clause.param {
        declare_pattern(&mut scope, param);
    }
    scope
}

/// Loop variables are rebound every iteration, so they never resolve.
pub fn for_head_scope(decl: &VarDecl) -> Scope {
    let mut scope = Scope::new();
    if decl.kind != VarDeclKind::Var {
        for declarator in &decl.decls {
            declare_pattern(&mut scope, &declarator.name);
        }
    }
    scope
}

fn declare_lexical(scope: &mut Scope, decl: &Decl, assigned: &HashSet<String>) {
    match decl {
        // `var` is hoisted separately.
        Decl::Var(var) if var.kind == VarDeclKind::Var => {}
        Decl::Var(var) => declare_var(scope, var, assigned),
        Decl::Fn(f) => scope.declare(f.ident.sym.to_string(), Binding::Value(KeyExpr::FunctionLike)),
        Decl::Class(c) => scope.declare(c.ident.sym.to_string(), Binding::Opaque),
        Decl::TsEnum(e) => scope.declare(e.id.sym.to_string(), Binding::Opaque),
        Decl::Using(using) => {
            for declarator in &using.decls {
                declare_pattern(scope, &declarator.name);
            }
        }
        Decl::TsInterface(_) | Decl::TsTypeAlias(_) | Decl::TsModule(_) => {}
    }
}

fn declare_var(scope: &mut Scope, var: &VarDecl, assigned: &HashSet<String>) {
    for declarator in &var.decls {
        match (&declarator.name, &declarator.init) {
            (Pat::Ident(ident), Some(init)) => {
                let name = ident.id.sym.to_string();
                if var.kind != VarDeclKind::Const && assigned.contains(&name) {
                    scope.declare_opaque(name);
                } else {
                    scope.declare(name, Binding::Value(KeyExpr::from(&**init)));
                }
            }
            (pat, _) => declare_pattern(scope, pat),
        }
    }
}

fn declare_pattern(scope: &mut Scope, pat: &Pat) {
    for name in BoundNames::of(pat) {
        scope.declare(name, Binding::Opaque);
    }
}

fn export_name_string(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

/// Names bound by a pattern, ignoring default values and computed keys.
#[derive(Default)]
struct BoundNames {
    names: Vec<String>,
}

impl BoundNames {
    fn of<N: VisitWith<Self>>(node: &N) -> Vec<String> {
        let mut collector = Self::default();
        node.visit_with(&mut collector);
        collector.names
    }
}

impl Visit for BoundNames {
    fn visit_binding_ident(&mut self, node: &BindingIdent) {
        self.names.push(node.id.sym.to_string());
    }

    fn visit_assign_pat(&mut self, node: &AssignPat) {
        node.left.visit_with(self);
    }

    fn visit_prop_name(&mut self, _: &PropName) {}

    fn visit_expr(&mut self, _: &Expr) {}
}

/// Every name that is the target of an assignment or update.
#[derive(Default)]
struct AssignedNames {
    names: HashSet<String>,
}

impl AssignedNames {
    fn collect<N: VisitWith<Self>>(node: &N) -> HashSet<String> {
        let mut collector = Self::default();
        node.visit_with(&mut collector);
        collector.names
    }
}

impl Visit for AssignedNames {
    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        match &node.left {
            AssignTarget::Simple(SimpleAssignTarget::Ident(ident)) => {
                self.names.insert(ident.id.sym.to_string());
            }
            AssignTarget::Pat(pat) => self.names.extend(BoundNames::of(pat)),
            AssignTarget::Simple(_) => {}
        }
        node.visit_children_with(self);
    }

    fn visit_update_expr(&mut self, node: &UpdateExpr) {
        if let Expr::Ident(ident) = unwrap_paren(&node.arg) {
            self.names.insert(ident.sym.to_string());
        }
        node.visit_children_with(self);
    }

    fn visit_for_head(&mut self, node: &ForHead) {
        if let ForHead::Pat(pat) = node {
            self.names.extend(BoundNames::of(&**pat));
        }
        node.visit_children_with(self);
    }
}

/// Declares `var` bindings found anywhere in a function body, without
/// entering nested functions or classes.
struct VarHoister<'s> {
    scope: &'s mut Scope,
    assigned: &'s HashSet<String>,
}

impl<'s> VarHoister<'s> {
    fn hoist<N: VisitWith<Self>>(node: &N, scope: &'s mut Scope, assigned: &'s HashSet<String>) {
        let mut hoister = VarHoister { scope, assigned };
        node.visit_with(&mut hoister);
    }
}

impl Visit for VarHoister<'_> {
    fn visit_var_decl(&mut self, node: &VarDecl) {
        if node.kind == VarDeclKind::Var {
            declare_var(self.scope, node, self.assigned);
        }
    }

    fn visit_function(&mut self, _: &Function) {}

    fn visit_arrow_expr(&mut self, _: &ArrowExpr) {}

    fn visit_getter_prop(&mut self, _: &GetterProp) {}

    fn visit_setter_prop(&mut self, _: &SetterProp) {}

    fn visit_class(&mut self, _: &Class) {}
}
