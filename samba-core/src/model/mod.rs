use std::path::PathBuf;

use indexmap::IndexMap;

pub use action::{ActionCall, Argument};
pub use target::{Target, TargetState};

pub mod action;
pub mod target;

/// Name of the target executed when neither the command line nor a
/// `default(...)` directive picks one.
pub const DEFAULT_TARGET: &str = "default";

#[derive(Debug)]
pub struct BuildGraph {
    pub targets: IndexMap<String, Target>,
    pub default_target: String,
}

impl Default for BuildGraph {
    fn default() -> Self {
        Self {
            targets: IndexMap::new(),
            default_target: DEFAULT_TARGET.to_owned(),
        }
    }
}

/// Defaults read from the optional settings file. Command-line flags take
/// precedence over every field.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub build_file: Option<PathBuf>,
    pub verbose: bool,
    pub color: bool,
    pub compile: CompileConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            build_file: None,
            verbose: false,
            color: true,
            compile: CompileConfig::default(),
        }
    }
}

/// Compiler invocation settings shared by the `compile*` actions.
///
/// Seeded from the settings file and extended by `define_*`/`add_flag`
/// actions while the build runs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileConfig {
    pub compiler: String,
    pub build_directory: Option<String>,
    pub libraries: Vec<String>,
    pub includes: Vec<String>,
    pub library_paths: Vec<String>,
    pub flags: Vec<String>,
    pub variables: IndexMap<String, String>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            compiler: "cc".to_owned(),
            build_directory: Some("build".to_owned()),
            libraries: Vec::new(),
            includes: Vec::new(),
            library_paths: Vec::new(),
            flags: Vec::new(),
            variables: IndexMap::new(),
        }
    }
}

impl CompileConfig {
    pub fn define_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_owned(), value.to_owned());
    }

    pub fn define_library(&mut self, library: &str) {
        push_unique(&mut self.libraries, library);
    }

    pub fn define_include(&mut self, path: &str) {
        push_unique(&mut self.includes, path);
    }

    pub fn define_library_path(&mut self, path: &str) {
        push_unique(&mut self.library_paths, path);
    }

    pub fn add_flag(&mut self, flag: &str) {
        self.flags.push(flag.to_owned());
    }

    pub fn remove_library(&mut self, library: &str) {
        self.libraries.retain(|entry| entry != library);
    }

    pub fn remove_include(&mut self, path: &str) {
        self.includes.retain(|entry| entry != path);
    }

    pub fn remove_library_path(&mut self, path: &str) {
        self.library_paths.retain(|entry| entry != path);
    }
}

fn push_unique(entries: &mut Vec<String>, value: &str) {
    if !entries.iter().any(|entry| entry == value) {
        entries.push(value.to_owned());
    }
}
