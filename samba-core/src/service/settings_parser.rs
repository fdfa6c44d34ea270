use crate::{
    config,
    model::{CompileConfig, Settings},
};

impl From<config::Root> for Settings {
    fn from(value: config::Root) -> Self {
        Self {
            build_file: value.build_file,
            verbose: value.verbose,
            color: value.color.unwrap_or(true),
            compile: value.compile.into(),
        }
    }
}

impl From<config::Compile> for CompileConfig {
    fn from(value: config::Compile) -> Self {
        let defaults = CompileConfig::default();
        Self {
            compiler: value.compiler.unwrap_or(defaults.compiler),
            build_directory: match value.build_directory {
                Some(directory) if directory.is_empty() => None,
                Some(directory) => Some(directory),
                None => defaults.build_directory,
            },
            libraries: value.libraries,
            includes: value.includes,
            library_paths: value.library_paths,
            flags: value.flags,
            variables: value.variables,
        }
    }
}
