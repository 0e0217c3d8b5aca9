use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result, anyhow, bail};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use swc_common::SourceMap;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        collect::{CollectOptions, PropertyName, collect_property_names},
        file_scanner::scan_files,
        importer::{FsImporter, IgnoreImporter, Importer},
        parsers::parse_source,
    },
};

/// Property names found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileNames {
    /// Path relative to the project root.
    pub file: String,
    pub properties: Vec<PropertyName>,
}

impl FileNames {
    pub fn unresolved_count(&self) -> usize {
        self.properties.iter().filter(|p| p.name.is_none()).count()
    }
}

/// A file that could not be read or parsed.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub file: String,
    pub error: String,
}

pub struct AnalysisResult {
    /// Sorted by path.
    pub files: Vec<FileNames>,
    pub parse_errors: Vec<ParseFailure>,
}

impl AnalysisResult {
    pub fn property_count(&self) -> usize {
        self.files.iter().map(|f| f.properties.len()).sum()
    }

    pub fn unresolved_count(&self) -> usize {
        self.files.iter().map(FileNames::unresolved_count).sum()
    }
}

/// Configuration and file set for one `names` run.
///
/// Configuration priority: CLI arguments, then `.propnamerc.json`, then defaults.
pub struct AnalysisContext {
    pub config: Config,
    /// Project root, used for config lookup and relative output paths.
    pub root_dir: PathBuf,
    /// Source files to analyze, sorted.
    pub files: Vec<String>,
    pub verbose: bool,
}

impl AnalysisContext {
    /// Load configuration and scan source files.
    ///
    /// Explicit `paths` (relative to the root) replace the configured
    /// includes and must exist.
    pub fn new(common_args: &CommonArgs, paths: &[PathBuf]) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let root = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let mut config = config_result.config;

        if !paths.is_empty() {
            for path in paths {
                if !root_dir.join(path).exists() {
                    bail!("Path does not exist: {}", path.display());
                }
            }
            config.includes = paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
        }

        let scan = scan_files(
            root,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );
        if scan.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) could not be accessed{}",
                "warning:".bold().yellow(),
                scan.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        let mut files: Vec<String> = scan.files.into_iter().collect();
        files.sort();

        Ok(Self {
            config,
            root_dir,
            files,
            verbose,
        })
    }

    /// Parse every file and resolve its property names in parallel.
    ///
    /// Relative imports are followed when `resolve_imports` is set in the
    /// config and not disabled by the caller.
    pub fn analyze(&self, resolve_imports: bool) -> AnalysisResult {
        let fs_importer;
        let importer: &dyn Importer = if resolve_imports && self.config.resolve_imports {
            fs_importer = FsImporter::new();
            &fs_importer
        } else {
            &IgnoreImporter
        };
        let options = CollectOptions {
            max_depth: self.config.max_resolve_depth,
        };

        let results: Vec<_> = self
            .files
            .par_iter()
            .map(|file_path| {
                let result = std::fs::read_to_string(file_path)
                    .with_context(|| format!("Failed to read file: {}", file_path))
                    .and_then(|code| {
                        // Each thread creates its own SourceMap
                        parse_source(code, file_path, Arc::new(SourceMap::default()))
                    })
                    .map(|parsed| collect_property_names(&parsed, importer, options));
                (self.display_path(file_path), result)
            })
            .collect();

        let mut files = Vec::new();
        let mut parse_errors = Vec::new();

        for (file, result) in results {
            match result {
                Ok(properties) => files.push(FileNames { file, properties }),
                Err(e) => {
                    if self.verbose {
                        eprintln!("{} {} - {}", "warning:".bold().yellow(), file, e);
                    }
                    parse_errors.push(ParseFailure {
                        file,
                        error: e.to_string(),
                    });
                }
            }
        }

        AnalysisResult {
            files,
            parse_errors,
        }
    }

    fn display_path(&self, file_path: &str) -> String {
        let path = Path::new(file_path);
        path.strip_prefix(&self.root_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}
