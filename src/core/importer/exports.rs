//! Locating exported declarations inside a parsed module.

use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    ClassExpr, Decl, DefaultDecl, ExportSpecifier, Expr, FnExpr, Ident, Module, ModuleDecl,
    ModuleExportName, ModuleItem, Pat,
};

use super::ExportName;

/// Where an export's value can be found.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportTarget {
    /// The exported expression, to be resolved in the exporting module's scope.
    Expr(Box<Expr>),
    /// `export { name } from "source"`
    Forward { source: String, export: ExportName },
}

/// Find the declaration behind `export` in `module`.
///
/// Local re-exports (`export { a as b }`, `export default a`) yield the local
/// identifier, which the caller resolves through the module scope.
/// `export * from` is not consulted here; see [`star_exports`].
pub fn find_export(module: &Module, export: &ExportName) -> Option<ExportTarget> {
    for item in &module.body {
        let ModuleItem::ModuleDecl(decl) = item else {
            continue;
        };

        let found = match (decl, export) {
            (ModuleDecl::ExportDefaultExpr(default), ExportName::Default) => {
                Some(ExportTarget::Expr(default.expr.clone()))
            }
            (ModuleDecl::ExportDefaultDecl(default), ExportName::Default) => match &default.decl {
                DefaultDecl::Fn(f) => Some(ExportTarget::Expr(Box::new(Expr::Fn(f.clone())))),
                DefaultDecl::Class(c) => Some(ExportTarget::Expr(Box::new(Expr::Class(c.clone())))),
                DefaultDecl::TsInterfaceDecl(_) => None,
            },
            (ModuleDecl::ExportDecl(export_decl), ExportName::Named(name)) => {
                exported_decl(&export_decl.decl, name)
            }
            (ModuleDecl::ExportNamed(named), _) if !named.type_only => {
                named.specifiers.iter().find_map(|specifier| {
                    let (local, exported) = match specifier {
                        ExportSpecifier::Named(named) if named.is_type_only => return None,
                        ExportSpecifier::Named(named) => (
                            module_export_name(&named.orig),
                            named
                                .exported
                                .as_ref()
                                .map(module_export_name)
                                .unwrap_or_else(|| module_export_name(&named.orig)),
                        ),
                        ExportSpecifier::Default(default) => {
                            ("default".to_string(), default.exported.sym.to_string())
                        }
                        // `export * as ns from "m"` exports a namespace object.
                        ExportSpecifier::Namespace(_) => return None,
                    };
                    if ExportName::from_str_name(&exported) != *export {
                        return None;
                    }
                    match named.src.as_ref().and_then(|src| src.value.as_str()) {
                        Some(source) => Some(ExportTarget::Forward {
                            source: source.to_string(),
                            export: ExportName::from_str_name(&local),
                        }),
                        None => Some(ExportTarget::Expr(Box::new(Expr::Ident(Ident::new_no_ctxt(
                            local.into(),
                            DUMMY_SP,
                        ))))),
                    }
                })
            }
            _ => None,
        };

        if found.is_some() {
            return found;
        }
    }
    None
}

/// Sources of `export * from "..."` declarations, in order.
pub fn star_exports(module: &Module) -> Vec<String> {
    module
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::ExportAll(all)) if !all.type_only => {
                all.src.value.as_str().map(|s| s.to_string())
            }
            _ => None,
        })
        .collect()
}

fn exported_decl(decl: &Decl, name: &str) -> Option<ExportTarget> {
    match decl {
        Decl::Var(var) => var.decls.iter().find_map(|declarator| match &declarator.name {
            Pat::Ident(ident) if &*ident.id.sym == name => Some(ExportTarget::Expr(
                // The module scope decides whether the binding is static.
                Box::new(Expr::Ident(ident.id.clone())),
            )),
            _ => None,
        }),
        Decl::Fn(f) if &*f.ident.sym == name => Some(ExportTarget::Expr(Box::new(Expr::Fn(
            FnExpr {
                ident: Some(f.ident.clone()),
                function: f.function.clone(),
            },
        )))),
        Decl::Class(c) if &*c.ident.sym == name => Some(ExportTarget::Expr(Box::new(
            Expr::Class(ClassExpr {
                ident: Some(c.ident.clone()),
                class: c.class.clone(),
            }),
        ))),
        _ => None,
    }
}

fn module_export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use swc_common::SourceMap;
    use swc_ecma_ast::Lit;

    use super::*;
    use crate::core::parsers::parse_source;

    fn module(code: &str) -> Module {
        parse_source(code.to_string(), "test.ts", Arc::new(SourceMap::default()))
            .unwrap()
            .module
    }

    fn string_of(target: Option<ExportTarget>) -> Option<String> {
        match target? {
            ExportTarget::Expr(expr) => match *expr {
                Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
                Expr::Ident(ident) => Some(format!("ident:{}", ident.sym)),
                _ => Some("other".to_string()),
            },
            ExportTarget::Forward { source, export } => Some(format!("{}#{:?}", source, export)),
        }
    }

    #[test]
    fn test_default_expression() {
        let m = module(r#"export default "name";"#);
        assert_eq!(
            string_of(find_export(&m, &ExportName::Default)),
            Some("name".to_string())
        );
    }

    #[test]
    fn test_named_const_yields_local_identifier() {
        let m = module(r#"export const foo = "name";"#);
        assert_eq!(
            string_of(find_export(&m, &ExportName::Named("foo".to_string()))),
            Some("ident:foo".to_string())
        );
        assert_eq!(find_export(&m, &ExportName::Named("bar".to_string())), None);
    }

    #[test]
    fn test_renamed_local_export() {
        let m = module(
            r#"
            const a = "x";
            export { a as b, a as default };
            "#,
        );
        assert_eq!(
            string_of(find_export(&m, &ExportName::Named("b".to_string()))),
            Some("ident:a".to_string())
        );
        assert_eq!(
            string_of(find_export(&m, &ExportName::Default)),
            Some("ident:a".to_string())
        );
    }

    #[test]
    fn test_forwarded_export() {
        let m = module(r#"export { x as y } from "./other";"#);
        assert_eq!(
            find_export(&m, &ExportName::Named("y".to_string())),
            Some(ExportTarget::Forward {
                source: "./other".to_string(),
                export: ExportName::Named("x".to_string()),
            })
        );
    }

    #[test]
    fn test_default_function_export() {
        let m = module("export default function render() {}");
        assert_eq!(
            string_of(find_export(&m, &ExportName::Default)),
            Some("other".to_string())
        );
    }

    #[test]
    fn test_star_exports() {
        let m = module(
            r#"
            export * from "./a";
            export const local = 1;
            export * from "./b";
            "#,
        );
        assert_eq!(star_exports(&m), vec!["./a", "./b"]);
    }
}
