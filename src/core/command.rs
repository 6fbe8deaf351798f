//! Command templates and command-line generation.
//!
//! A task carries an executable template plus a payload and optional extra
//! arguments, and turns them into runnable command lines on demand. Both the
//! template and the payload come in two shapes: a single scalar value, or a
//! keyed mapping where each payload key selects the program registered under
//! the same key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Error;

/// Executable part of a task's command line.
///
/// Serialized untagged: a single program is a bare string on the wire, a
/// keyed template is an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandTemplate {
    /// One program for the whole task.
    Single(String),
    /// Program per payload key.
    Keyed(BTreeMap<String, String>),
}

impl CommandTemplate {
    fn shape(&self) -> &'static str {
        match self {
            CommandTemplate::Single(_) => "single",
            CommandTemplate::Keyed(_) => "keyed",
        }
    }
}

/// Data handed to a task's program(s), and likewise the extra arguments
/// appended to each generated command.
///
/// Keyed payloads use `BTreeMap` so generation order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// One argument string for the whole task.
    Scalar(String),
    /// Argument string per key.
    Keyed(BTreeMap<String, String>),
}

impl Payload {
    fn shape(&self) -> &'static str {
        match self {
            Payload::Scalar(_) => "scalar",
            Payload::Keyed(_) => "keyed",
        }
    }
}

fn template_shape(template: Option<&CommandTemplate>) -> &'static str {
    template.map(CommandTemplate::shape).unwrap_or("unset")
}

fn payload_shape(payload: Option<&Payload>) -> &'static str {
    payload.map(Payload::shape).unwrap_or("unset")
}

/// Build the command lines for a template/payload/args triple.
///
/// Returns the generated commands together with the last error encountered,
/// if any. A keyed payload entry with no matching program is skipped and
/// reported without aborting the remaining keys; a template/payload pairing
/// that makes no sense yields no commands and a shape error.
pub(crate) fn generate(
    template: Option<&CommandTemplate>,
    payload: Option<&Payload>,
    extra_args: Option<&Payload>,
) -> (Vec<String>, Option<Error>) {
    match (template, payload) {
        (Some(CommandTemplate::Single(program)), Some(Payload::Scalar(data))) => {
            let mut command = format!("{} {}", program, data);
            if let Some(Payload::Scalar(args)) = extra_args {
                if !args.is_empty() {
                    command.push(' ');
                    command.push_str(args);
                }
            }
            (vec![command], None)
        }
        (Some(CommandTemplate::Keyed(programs)), Some(Payload::Keyed(data))) => {
            let mut commands = Vec::with_capacity(data.len());
            let mut last_error = None;
            for (key, value) in data {
                let program = match programs.get(key) {
                    Some(program) => program,
                    None => {
                        last_error = Some(Error::MissingProgram { key: key.clone() });
                        continue;
                    }
                };
                let mut command = format!("{} {}", program, value);
                if let Some(Payload::Keyed(args)) = extra_args {
                    if let Some(arg) = args.get(key) {
                        if !arg.is_empty() {
                            command.push(' ');
                            command.push_str(arg);
                        }
                    }
                }
                commands.push(command);
            }
            (commands, last_error)
        }
        (template, payload) => (
            Vec::new(),
            Some(Error::CommandShape(format!(
                "template is {} but payload is {}",
                template_shape(template),
                payload_shape(payload),
            ))),
        ),
    }
}
