//! Collects property names from a whole module.
//!
//! `PropertyCollector` walks the module while maintaining the lexical scope
//! chain, and resolves every object-literal property, object spread, and
//! type-literal or interface member it meets.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, CatchClause, Constructor, ForHead, ForInStmt, ForOfStmt, ForStmt,
    Function, GetterProp, Module, ObjectLit, PropOrSpread, SetterProp, TsInterfaceBody, TsTypeLit,
    VarDeclOrExpr,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::importer::Importer;
use crate::core::parsers::ParsedSource;
use crate::core::property::{NameContext, PropertyKind, PropertyNode, get_property_name};
use crate::core::resolve::{DEFAULT_MAX_DEPTH, Resolver};
use crate::core::scope::{
    Scope, ScopeChain, arrow_scope, block_scope, catch_scope, constructor_scope, for_head_scope,
    function_scope, getter_scope, module_scope, setter_scope,
};

/// What kind of node a property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerKind {
    Object,
    TypeLiteral,
    Interface,
}

/// A resolved property name and where it was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyName {
    /// `None` when the name cannot be determined statically.
    pub name: Option<String>,
    pub kind: PropertyKind,
    pub container: ContainerKind,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    pub max_depth: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Resolve every property name in a parsed module, in source order.
pub fn collect_property_names(
    parsed: &ParsedSource,
    importer: &dyn Importer,
    options: CollectOptions,
) -> Vec<PropertyName> {
    let ctx = NameContext {
        source_map: &parsed.source_map,
        resolver: Resolver::new(importer).with_max_depth(options.max_depth),
        file: Some(Path::new(&parsed.file_path)),
    };
    let mut collector = PropertyCollector::new(ctx);
    parsed.module.visit_with(&mut collector);
    collector.properties
}

pub struct PropertyCollector<'a> {
    ctx: NameContext<'a>,
    /// Outermost first.
    scopes: Vec<Arc<Scope>>,
    pub properties: Vec<PropertyName>,
}

impl<'a> PropertyCollector<'a> {
    pub fn new(ctx: NameContext<'a>) -> Self {
        Self {
            ctx,
            scopes: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn with_scope(&mut self, scope: Scope, visit: impl FnOnce(&mut Self)) {
        self.scopes.push(Arc::new(scope));
        visit(self);
        self.scopes.pop();
    }

    fn record(&mut self, node: PropertyNode<'_>, container: ContainerKind) {
        let Some(kind) = node.kind() else {
            return;
        };
        let name = get_property_name(&node, ScopeChain::new(&self.scopes), &self.ctx);
        let loc = self.ctx.source_map.lookup_char_pos(node.span().lo);

        self.properties.push(PropertyName {
            name,
            kind,
            container,
            line: loc.line,
            col: loc.col_display + 1,
        });
    }
}

impl Visit for PropertyCollector<'_> {
    fn visit_module(&mut self, node: &Module) {
        self.with_scope(module_scope(node), |this| node.visit_children_with(this));
    }

    fn visit_function(&mut self, node: &Function) {
        self.with_scope(function_scope(node), |this| node.visit_children_with(this));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.with_scope(arrow_scope(node), |this| node.visit_children_with(this));
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        self.with_scope(constructor_scope(node), |this| {
            node.visit_children_with(this)
        });
    }

    fn visit_getter_prop(&mut self, node: &GetterProp) {
        self.with_scope(getter_scope(node), |this| node.visit_children_with(this));
    }

    fn visit_setter_prop(&mut self, node: &SetterProp) {
        self.with_scope(setter_scope(node), |this| node.visit_children_with(this));
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.with_scope(block_scope(node), |this| node.visit_children_with(this));
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.with_scope(catch_scope(node), |this| node.visit_children_with(this));
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        match &node.init {
            Some(VarDeclOrExpr::VarDecl(decl)) => {
                self.with_scope(for_head_scope(decl), |this| node.visit_children_with(this));
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        match &node.left {
            ForHead::VarDecl(decl) => {
                self.with_scope(for_head_scope(decl), |this| node.visit_children_with(this));
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        match &node.left {
            ForHead::VarDecl(decl) => {
                self.with_scope(for_head_scope(decl), |this| node.visit_children_with(this));
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_object_lit(&mut self, node: &ObjectLit) {
        for prop in &node.props {
            let property = match prop {
                PropOrSpread::Prop(prop) => PropertyNode::Prop(prop),
                PropOrSpread::Spread(spread) => PropertyNode::Spread(spread),
            };
            self.record(property, ContainerKind::Object);
        }
        node.visit_children_with(self);
    }

    fn visit_ts_type_lit(&mut self, node: &TsTypeLit) {
        for member in &node.members {
            self.record(PropertyNode::TypeMember(member), ContainerKind::TypeLiteral);
        }
        node.visit_children_with(self);
    }

    fn visit_ts_interface_body(&mut self, node: &TsInterfaceBody) {
        for member in &node.body {
            self.record(PropertyNode::TypeMember(member), ContainerKind::Interface);
        }
        node.visit_children_with(self);
    }
}
