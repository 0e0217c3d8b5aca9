//! propname - static property-name resolution for JavaScript and TypeScript
//!
//! Given a property of an object literal or a type, propname works out the
//! name it binds: literal keys directly, computed keys by following
//! constants, object members and imports, and spreads as dotted paths.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, scopes, resolution and collection

pub mod cli;
pub mod config;
pub mod core;
