//! Core resolution engine.
//!
//! - `expr`: closed model of key expressions lowered from swc
//! - `scope`: lexical scopes and the scope chain
//! - `importer`: cross-module lookups behind the `Importer` trait
//! - `resolve`: static evaluation of key expressions
//! - `property`: `get_property_name`, the public entry point
//! - `collect`: walks a module and resolves every property it meets
//! - `file_scanner` / `context`: file discovery and the parallel pipeline

pub mod collect;
pub mod context;
pub mod expr;
pub mod file_scanner;
pub mod importer;
pub mod parsers;
pub mod property;
pub mod resolve;
pub mod scope;

pub use collect::{CollectOptions, ContainerKind, PropertyName, collect_property_names};
pub use context::{AnalysisContext, AnalysisResult, FileNames, ParseFailure};
pub use importer::{FsImporter, IgnoreImporter, Importer, MemoryImporter};
pub use property::{COMPUTED_PREFIX, PropertyKind, PropertyNode, get_property_name};
pub use resolve::{DEFAULT_MAX_DEPTH, ResolvedValue, Resolver};
