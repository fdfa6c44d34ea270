use std::{fmt, sync::LazyLock};

use indexmap::IndexMap;

use crate::{
    error::DispatchError,
    model::{ActionCall, Argument},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(expected) => count == expected,
            Arity::AtLeast(minimum) => count >= minimum,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(expected) => write!(f, "{expected}"),
            Arity::AtLeast(minimum) => write!(f, "at least {minimum}"),
        }
    }
}

/// Operations an action line can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Execute,
    ExecuteSync,
    Printfn,
    RequireFile,
    DefineVariable,
    DefineLibrary,
    DefineInclude,
    DefineLibraryPath,
    AddFlag,
    RemoveLibrary,
    RemoveInclude,
    RemoveLibraryPath,
    SetCompiler,
    SetBuildDirectory,
    Compile,
    CompileShared,
    CompileParallel,
}

impl Builtin {
    pub fn arity(self) -> Arity {
        match self {
            Builtin::Execute | Builtin::ExecuteSync | Builtin::Printfn => Arity::AtLeast(1),
            Builtin::CompileParallel => Arity::AtLeast(1),
            Builtin::DefineVariable | Builtin::Compile | Builtin::CompileShared => Arity::Exact(2),
            Builtin::RequireFile
            | Builtin::DefineLibrary
            | Builtin::DefineInclude
            | Builtin::DefineLibraryPath
            | Builtin::AddFlag
            | Builtin::RemoveLibrary
            | Builtin::RemoveInclude
            | Builtin::RemoveLibraryPath
            | Builtin::SetCompiler
            | Builtin::SetBuildDirectory => Arity::Exact(1),
        }
    }
}

static DISPATCH_TABLE: LazyLock<IndexMap<&'static str, Builtin>> = LazyLock::new(|| {
    IndexMap::from([
        ("smb_execute", Builtin::Execute),
        ("smb_execute_sync", Builtin::ExecuteSync),
        ("printfn", Builtin::Printfn),
        ("require_file", Builtin::RequireFile),
        ("define_variable", Builtin::DefineVariable),
        ("define_library", Builtin::DefineLibrary),
        ("define_include", Builtin::DefineInclude),
        ("define_library_path", Builtin::DefineLibraryPath),
        ("add_flag", Builtin::AddFlag),
        ("remove_library", Builtin::RemoveLibrary),
        ("remove_include", Builtin::RemoveInclude),
        ("remove_library_path", Builtin::RemoveLibraryPath),
        ("set_compiler", Builtin::SetCompiler),
        ("set_build_directory", Builtin::SetBuildDirectory),
        ("compile", Builtin::Compile),
        ("compile_shared", Builtin::CompileShared),
        ("compile_parallel", Builtin::CompileParallel),
    ])
});

/// Resolves a call to its builtin and returns the literal arguments.
pub fn resolve(call: &ActionCall) -> Result<(Builtin, Vec<String>), DispatchError> {
    let builtin = DISPATCH_TABLE
        .get(call.function.as_str())
        .copied()
        .ok_or_else(|| DispatchError::UnknownFunction(call.function.clone()))?;

    let arity = builtin.arity();

    if !arity.accepts(call.arguments.len()) {
        return Err(DispatchError::Arity {
            name: call.function.clone(),
            expected: arity.to_string(),
            found: call.arguments.len(),
        });
    }

    let arguments = call
        .arguments
        .iter()
        .map(|argument| match argument {
            Argument::Literal(value) => Ok(value.clone()),
            Argument::Variadic => Err(DispatchError::UnsupportedVariadic(call.function.clone())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((builtin, arguments))
}
