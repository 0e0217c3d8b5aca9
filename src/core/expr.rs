//! Closed expression model used by name resolution.
//!
//! swc expressions are lowered once into `KeyExpr`, which keeps only the
//! shapes that can ever reduce to a static property name. Everything else
//! collapses into `FunctionLike` (never a name, no fallback) or `Other`
//! (not static, but a placeholder name may still be synthesized).

use swc_ecma_ast::{Expr, Lit, MemberProp, ObjectLit, Prop, PropName, PropOrSpread, Tpl};

/// A lowered key or value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyExpr {
    /// Reference to a binding: `foo`
    Ident(String),
    /// String literal, BigInt literal, or a template without interpolation.
    Str(String),
    /// Numeric literal.
    Num(f64),
    /// Regular expression literal: `/ab+c/`
    Regex,
    /// Static or computed member access: `a.b`, `a["b"]`, `a[KEY]`
    Member {
        object: Box<KeyExpr>,
        property: MemberKey,
    },
    /// Object literal, kept for member lookups.
    Object(Vec<ObjectEntry>),
    /// Arrow functions, function expressions and function declarations.
    FunctionLike,
    /// Any other expression.
    Other,
}

/// Property side of a member access.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberKey {
    Name(String),
    Computed(Box<KeyExpr>),
}

/// A single entry of a lowered object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectEntry {
    Property { key: MemberKey, value: KeyExpr },
    Spread(KeyExpr),
}

/// Unwrap parentheses and TypeScript-only wrappers.
/// Handles: `(expr)`, `expr as T`, `expr as const`, `expr satisfies T`, `expr!`, `<T>expr`
pub fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_paren(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_paren(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_paren(&ts_sat.expr),
        Expr::TsNonNull(non_null) => unwrap_paren(&non_null.expr),
        Expr::TsTypeAssertion(assertion) => unwrap_paren(&assertion.expr),
        _ => expr,
    }
}

impl From<&Expr> for KeyExpr {
    fn from(expr: &Expr) -> Self {
        match unwrap_paren(expr) {
            Expr::Lit(Lit::Str(s)) => KeyExpr::Str(s.value.to_string_lossy().to_string()),
            Expr::Lit(Lit::Num(n)) => KeyExpr::Num(n.value),
            Expr::Lit(Lit::BigInt(b)) => KeyExpr::Str(b.value.to_string()),
            Expr::Lit(Lit::Regex(_)) => KeyExpr::Regex,
            Expr::Tpl(tpl) => lower_template(tpl),
            Expr::Ident(ident) => KeyExpr::Ident(ident.sym.to_string()),
            Expr::Member(member) => KeyExpr::Member {
                object: Box::new(KeyExpr::from(&*member.obj)),
                property: match &member.prop {
                    MemberProp::Ident(name) => MemberKey::Name(name.sym.to_string()),
                    MemberProp::Computed(computed) => {
                        MemberKey::Computed(Box::new(KeyExpr::from(&*computed.expr)))
                    }
                    MemberProp::PrivateName(_) => return KeyExpr::Other,
                },
            },
            Expr::Object(obj) => lower_object(obj),
            Expr::Arrow(_) | Expr::Fn(_) => KeyExpr::FunctionLike,
            _ => KeyExpr::Other,
        }
    }
}

/// Templates without `${}` are plain strings; anything else is dynamic.
fn lower_template(tpl: &Tpl) -> KeyExpr {
    if !tpl.exprs.is_empty() {
        return KeyExpr::Other;
    }
    tpl.quasis
        .first()
        .and_then(|q| q.cooked.as_ref())
        .and_then(|s| s.as_str())
        .map(|s| KeyExpr::Str(s.to_string()))
        .unwrap_or(KeyExpr::Other)
}

fn lower_object(obj: &ObjectLit) -> KeyExpr {
    let entries = obj
        .props
        .iter()
        .filter_map(|prop| match prop {
            PropOrSpread::Spread(spread) => Some(ObjectEntry::Spread(KeyExpr::from(&*spread.expr))),
            PropOrSpread::Prop(prop) => lower_prop(prop),
        })
        .collect();
    KeyExpr::Object(entries)
}

fn lower_prop(prop: &Prop) -> Option<ObjectEntry> {
    let (key, value) = match prop {
        Prop::KeyValue(kv) => (member_key(&kv.key), KeyExpr::from(&*kv.value)),
        // `{ foo }` is `{ foo: foo }`
        Prop::Shorthand(ident) => (
            MemberKey::Name(ident.sym.to_string()),
            KeyExpr::Ident(ident.sym.to_string()),
        ),
        Prop::Method(method) => (member_key(&method.key), KeyExpr::FunctionLike),
        Prop::Getter(getter) => (member_key(&getter.key), KeyExpr::Other),
        Prop::Setter(setter) => (member_key(&setter.key), KeyExpr::Other),
        // Only valid inside patterns.
        Prop::Assign(_) => return None,
    };
    Some(ObjectEntry::Property { key, value })
}

/// Convert a property name to the key used for member lookups.
pub fn member_key(name: &PropName) -> MemberKey {
    match name {
        PropName::Ident(ident) => MemberKey::Name(ident.sym.to_string()),
        PropName::Str(s) => MemberKey::Name(s.value.to_string_lossy().to_string()),
        PropName::Num(n) => MemberKey::Name(format_number(n.value)),
        PropName::BigInt(b) => MemberKey::Name(b.value.to_string()),
        PropName::Computed(computed) => {
            MemberKey::Computed(Box::new(KeyExpr::from(&*computed.expr)))
        }
    }
}

/// Render a number the way JavaScript's `String(n)` does for property keys.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use swc_common::SourceMap;
    use swc_ecma_ast::{ModuleItem, Stmt};

    use super::*;
    use crate::core::parsers::parse_source;

    fn lower(code: &str) -> KeyExpr {
        let parsed =
            parse_source(format!("({});", code), "test.ts", Arc::new(SourceMap::default()))
                .unwrap();
        match parsed.module.body.last() {
            Some(ModuleItem::Stmt(Stmt::Expr(stmt))) => KeyExpr::from(&*stmt.expr),
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_lower_literals() {
        assert_eq!(lower(r#""foo""#), KeyExpr::Str("foo".to_string()));
        assert_eq!(lower("31"), KeyExpr::Num(31.0));
        assert_eq!(lower("10n"), KeyExpr::Str("10".to_string()));
        assert_eq!(lower("/31/"), KeyExpr::Regex);
        assert_eq!(lower("`plain`"), KeyExpr::Str("plain".to_string()));
    }

    #[test]
    fn test_lower_interpolated_template_is_other() {
        assert_eq!(lower("`a${b}`"), KeyExpr::Other);
    }

    #[test]
    fn test_lower_unwraps_ts_wrappers() {
        assert_eq!(lower(r#""a" as const"#), KeyExpr::Str("a".to_string()));
        assert_eq!(
            lower(r#"("a" satisfies string)"#),
            KeyExpr::Str("a".to_string())
        );
        assert_eq!(lower("foo!"), KeyExpr::Ident("foo".to_string()));
    }

    #[test]
    fn test_lower_function_like() {
        assert_eq!(lower("() => {}"), KeyExpr::FunctionLike);
        assert_eq!(lower("function named() {}"), KeyExpr::FunctionLike);
        assert_eq!(lower("class {}"), KeyExpr::Other);
        assert_eq!(lower("a + b"), KeyExpr::Other);
    }

    #[test]
    fn test_lower_member_chain() {
        assert_eq!(
            lower(r#"a.b["c"]"#),
            KeyExpr::Member {
                object: Box::new(KeyExpr::Member {
                    object: Box::new(KeyExpr::Ident("a".to_string())),
                    property: MemberKey::Name("b".to_string()),
                }),
                property: MemberKey::Computed(Box::new(KeyExpr::Str("c".to_string()))),
            }
        );
    }

    #[test]
    fn test_lower_object_entries() {
        let lowered = lower(r#"{ a: "x", b, ...c, m() {}, 2: 3 }"#);
        assert_eq!(
            lowered,
            KeyExpr::Object(vec![
                ObjectEntry::Property {
                    key: MemberKey::Name("a".to_string()),
                    value: KeyExpr::Str("x".to_string()),
                },
                ObjectEntry::Property {
                    key: MemberKey::Name("b".to_string()),
                    value: KeyExpr::Ident("b".to_string()),
                },
                ObjectEntry::Spread(KeyExpr::Ident("c".to_string())),
                ObjectEntry::Property {
                    key: MemberKey::Name("m".to_string()),
                    value: KeyExpr::FunctionLike,
                },
                ObjectEntry::Property {
                    key: MemberKey::Name("2".to_string()),
                    value: KeyExpr::Num(3.0),
                },
            ])
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(31.0), "31");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(100.0), "100");
    }
}
