use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// A parsed JS/TS module together with the source map that owns its text.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub file_path: String,
}

/// Pick parser syntax from the file extension.
///
/// `.ts` files are parsed without TSX so that `<T>expr` assertions work;
/// everything that is not TypeScript is parsed as JSX-enabled ECMAScript.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    match extension {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax::default()),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse source code into a module.
///
/// Accepts a shared SourceMap so files can be parsed on several threads.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let mut parser = Parser::new(
            syntax_for_path(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedSource {
            module,
            source_map,
            file_path: file_path.to_string(),
        })
    })
}

/// Read and parse a file from disk with its own SourceMap.
pub fn parse_file(file_path: &str) -> Result<ParsedSource> {
    let code = std::fs::read_to_string(file_path)
        .map_err(|e| anyhow!("Failed to read file: {}", e))?;
    parse_source(code, file_path, Arc::new(SourceMap::default()))
}
