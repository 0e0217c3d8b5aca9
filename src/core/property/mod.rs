//! Property-name resolution.
//!
//! [`get_property_name`] is the entry point: it classifies a property node
//! (literal key, computed key, or spread) and reduces it to the name the
//! property is bound to.
//!
//! # Examples
//!
//! ```ignore
//! { foo: 1 }                      → "foo"
//! { [31]: 1 }                     → "31"
//! const k = "name"; { [k]: 1 }    → "name"
//! { [unknown]: 1 }                → "@computed#unknown"
//! { [/re/]: 1 }                   → None
//! { ...foo.bub }                  → "foo.bub"
//! ```

use std::path::Path;

use serde::Serialize;
use swc_common::{SourceMap, SourceMapper, Span, Spanned};
use swc_ecma_ast::{Expr, Lit, MemberProp, Prop, PropName, SpreadElement, TsTypeElement};

use crate::core::expr::{KeyExpr, format_number, unwrap_paren};
use crate::core::resolve::{ResolvedValue, Resolver};
use crate::core::scope::ScopeChain;

/// Prefix of names synthesized for computed keys that cannot be reduced.
pub const COMPUTED_PREFIX: &str = "@computed#";

/// A property-like node of an object literal or a type.
#[derive(Debug, Clone, Copy)]
pub enum PropertyNode<'n> {
    /// Object-literal property: `{ key: value }`, `{ [key]: value }`, `{ key }`, methods.
    Prop(&'n Prop),
    /// Object-literal spread: `{ ...target }`
    Spread(&'n SpreadElement),
    /// Type literal or interface member: `{ key: T }`, `{ [key]: T }`, `{ key(): T }`
    TypeMember(&'n TsTypeElement),
}

/// How a property's key is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    Literal,
    Computed,
    Spread,
}

/// Result of classifying a property's key.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey<'n> {
    /// The name is written out: identifier, string or number key.
    Literal(String),
    /// `[expr]`
    Computed(&'n Expr),
    /// `...expr`
    Spread(&'n Expr),
    /// Index, call and construct signatures.
    Unsupported,
}

impl<'n> PropertyNode<'n> {
    pub fn classify(&self) -> PropertyKey<'n> {
        match *self {
            PropertyNode::Prop(prop) => match prop {
                Prop::KeyValue(kv) => classify_prop_name(&kv.key),
                Prop::Getter(getter) => classify_prop_name(&getter.key),
                Prop::Setter(setter) => classify_prop_name(&setter.key),
                Prop::Method(method) => classify_prop_name(&method.key),
                Prop::Shorthand(ident) => PropertyKey::Literal(ident.sym.to_string()),
                Prop::Assign(assign) => PropertyKey::Literal(assign.key.sym.to_string()),
            },
            PropertyNode::Spread(spread) => PropertyKey::Spread(&spread.expr),
            PropertyNode::TypeMember(member) => match member {
                TsTypeElement::TsPropertySignature(sig) => classify_type_key(&sig.key, sig.computed),
                TsTypeElement::TsMethodSignature(sig) => classify_type_key(&sig.key, sig.computed),
                TsTypeElement::TsGetterSignature(sig) => classify_type_key(&sig.key, sig.computed),
                TsTypeElement::TsSetterSignature(sig) => classify_type_key(&sig.key, sig.computed),
                TsTypeElement::TsCallSignatureDecl(_)
                | TsTypeElement::TsConstructSignatureDecl(_)
                | TsTypeElement::TsIndexSignature(_) => PropertyKey::Unsupported,
            },
        }
    }

    pub fn kind(&self) -> Option<PropertyKind> {
        match self.classify() {
            PropertyKey::Literal(_) => Some(PropertyKind::Literal),
            PropertyKey::Computed(_) => Some(PropertyKind::Computed),
            PropertyKey::Spread(_) => Some(PropertyKind::Spread),
            PropertyKey::Unsupported => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            PropertyNode::Prop(prop) => prop.span(),
            PropertyNode::Spread(spread) => spread.span(),
            PropertyNode::TypeMember(member) => member.span(),
        }
    }
}

fn classify_prop_name(name: &PropName) -> PropertyKey<'_> {
    match name {
        PropName::Ident(ident) => PropertyKey::Literal(ident.sym.to_string()),
        PropName::Str(s) => PropertyKey::Literal(s.value.to_string_lossy().to_string()),
        PropName::Num(n) => PropertyKey::Literal(format_number(n.value)),
        PropName::BigInt(b) => PropertyKey::Literal(b.value.to_string()),
        PropName::Computed(computed) => PropertyKey::Computed(&computed.expr),
    }
}

fn classify_type_key(key: &Expr, computed: bool) -> PropertyKey<'_> {
    if computed {
        return PropertyKey::Computed(key);
    }
    match key {
        Expr::Ident(ident) => PropertyKey::Literal(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => PropertyKey::Literal(s.value.to_string_lossy().to_string()),
        Expr::Lit(Lit::Num(n)) => PropertyKey::Literal(format_number(n.value)),
        _ => PropertyKey::Unsupported,
    }
}

/// Everything property-name resolution needs besides the node and its scopes.
#[derive(Clone, Copy)]
pub struct NameContext<'a> {
    /// Source map of the file the node belongs to, for placeholder text.
    pub source_map: &'a SourceMap,
    pub resolver: Resolver<'a>,
    /// Path of the file the node belongs to, for relative imports.
    pub file: Option<&'a Path>,
}

/// Resolve the name a property is bound to.
///
/// Returns `None` when the key can never be a static name (regex or
/// function keys, unsupported members, spreads of non-path expressions).
/// Computed keys that do not reduce to a literal get a
/// `"@computed#<source>"` placeholder so distinct dynamic keys stay distinct.
///
/// The placeholder covers every non-static computed key, not just bare
/// identifiers: `[a + b]` is `"@computed#a + b"` and `[obj.missing]` is
/// `"@computed#obj.missing"`. Only a key that reduces to a regex or a
/// function is `None`.
pub fn get_property_name(
    property: &PropertyNode<'_>,
    scopes: ScopeChain<'_>,
    ctx: &NameContext<'_>,
) -> Option<String> {
    match property.classify() {
        PropertyKey::Literal(name) => Some(name),
        PropertyKey::Spread(target) => qualified_name(target),
        PropertyKey::Computed(key) => computed_name(key, scopes, ctx),
        PropertyKey::Unsupported => None,
    }
}

fn computed_name(key: &Expr, scopes: ScopeChain<'_>, ctx: &NameContext<'_>) -> Option<String> {
    match ctx.resolver.resolve(&KeyExpr::from(key), scopes, ctx.file) {
        ResolvedValue::Str(name) => Some(name),
        ResolvedValue::Num(n) => Some(format_number(n)),
        ResolvedValue::NonStatic => None,
        ResolvedValue::Missing | ResolvedValue::Unknown => ctx
            .source_map
            .span_to_snippet(key.span())
            .ok()
            .map(|source| format!("{}{}", COMPUTED_PREFIX, source)),
    }
}

/// Dotted path of an identifier or static member chain: `foo`, `foo.bub`.
pub fn qualified_name(expr: &Expr) -> Option<String> {
    match unwrap_paren(expr) {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => {
                let object = qualified_name(&member.obj)?;
                Some(format!("{}.{}", object, prop.sym))
            }
            _ => None,
        },
        _ => None,
    }
}
