use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Root {
    pub build_file: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    pub color: Option<bool>,
    #[serde(default)]
    pub compile: Compile,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Compile {
    pub compiler: Option<String>,
    pub build_directory: Option<String>,
    #[serde(default)]
    pub libraries: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub library_paths: Vec<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub variables: IndexMap<String, String>,
}
