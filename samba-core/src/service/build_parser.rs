use std::{str::FromStr, sync::LazyLock};

use log::warn;
use regex::Regex;

use crate::{
    error::ParseError,
    model::{Argument, BuildGraph, Target},
    service::action_parser::{parse_arguments, split_call},
};

static DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[A-Za-z_][A-Za-z0-9_]*\s*\(").unwrap());

const COMMENT_PREFIX: char = '#';

enum Line<'a> {
    Declaration {
        name: &'a str,
        dependencies: &'a str,
    },
    Directive(&'a str),
    Action(&'a str),
}

fn classify(raw: &str) -> Option<Line<'_>> {
    let content = raw.trim();
    if content.is_empty() || content.starts_with(COMMENT_PREFIX) {
        return None;
    }

    if raw.starts_with([' ', '\t']) {
        return Some(Line::Action(content));
    }

    if let Some((name, dependencies)) = content.split_once(':') {
        return Some(Line::Declaration {
            name: name.trim(),
            dependencies,
        });
    }

    Some(Line::Directive(content))
}

impl FromStr for BuildGraph {
    type Err = ParseError;

    /// Duplicate or unnamed targets abort the parse. Malformed top-level
    /// lines are reported and skipped; action lines are kept verbatim and only
    /// split into calls when their target runs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut graph = BuildGraph::default();
        let mut current: Option<String> = None;

        for (index, raw) in s.lines().enumerate() {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let Some(line) = classify(raw) else {
                continue;
            };

            match line {
                Line::Declaration { name, dependencies } => {
                    if name.is_empty() {
                        return Err(ParseError::EmptyTargetName { line: index + 1 });
                    }
                    if graph.targets.contains_key(name) {
                        return Err(ParseError::DuplicateTarget(name.to_owned()));
                    }

                    let mut target = Target::new(name);
                    target
                        .dependencies
                        .extend(dependencies.split_whitespace().map(str::to_owned));
                    graph.targets.insert(name.to_owned(), target);
                    current = Some(name.to_owned());
                }
                Line::Directive(content) => {
                    if let Err(err) = apply_directive(&mut graph, content) {
                        warn!("line {}: {err}", index + 1);
                    }
                }
                Line::Action(action) => {
                    if let Some(target) = current
                        .as_deref()
                        .and_then(|name| graph.targets.get_mut(name))
                    {
                        target.actions.push(action.to_owned());
                    }
                }
            }
        }

        Ok(graph)
    }
}

fn apply_directive(graph: &mut BuildGraph, content: &str) -> Result<(), ParseError> {
    if !DIRECTIVE_REGEX.is_match(content) {
        return Err(ParseError::MissingOpenParen(content.to_owned()));
    }

    let (name, raw_arguments) = split_call(content)?;
    let arguments = parse_arguments(raw_arguments);

    match name {
        "default" => match arguments.as_slice() {
            [Argument::Literal(target)] => {
                graph.default_target = target.clone();
                Ok(())
            }
            _ => Err(ParseError::DirectiveArity {
                name: name.to_owned(),
                expected: 1,
                found: arguments.len(),
            }),
        },
        _ => Err(ParseError::UnknownDirective(name.to_owned())),
    }
}
