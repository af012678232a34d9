//! Line-oriented command parsing for the terminal front end.

use thiserror::Error;
use wageclock_core::{ConfirmChoice, Field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Stop,
    Save,
    Discard,
    Set { field: Field, value: String },
    EditSet { field: Field, value: String },
    TargetSet,
    TargetSkip,
    TargetEdit,
    Resume { entry_id: String },
    Confirm(ConfirmChoice),
    Edit { entry_id: String },
    EditSave,
    EditCancel,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Invalid(String),
}

pub const HELP: &str = "\
commands:
  start | pause | stop | save | discard
  set <name|wage|target|currency> <value>
  target set | target skip | target edit
  resume <entry-id>
  confirm keep|save|discard
  edit <entry-id> | edit-set <field> <value> | edit-save | edit-cancel
  show | help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "" => Err(CommandError::Empty),
            "start" => Ok(Command::Start),
            "pause" => Ok(Command::Pause),
            "stop" => Ok(Command::Stop),
            "save" => Ok(Command::Save),
            "discard" => Ok(Command::Discard),
            "set" => {
                let (field, value) = field_and_value(rest, "set <field> <value>")?;
                Ok(Command::Set { field, value })
            }
            "edit-set" => {
                let (field, value) = field_and_value(rest, "edit-set <field> <value>")?;
                Ok(Command::EditSet { field, value })
            }
            "target" => match rest {
                "set" => Ok(Command::TargetSet),
                "skip" => Ok(Command::TargetSkip),
                "edit" => Ok(Command::TargetEdit),
                _ => Err(CommandError::Usage("target set|skip|edit")),
            },
            "resume" => Ok(Command::Resume {
                entry_id: single_arg(rest, "resume <entry-id>")?,
            }),
            "confirm" => rest
                .parse::<ConfirmChoice>()
                .map(Command::Confirm)
                .map_err(|_| CommandError::Usage("confirm keep|save|discard")),
            "edit" => Ok(Command::Edit {
                entry_id: single_arg(rest, "edit <entry-id>")?,
            }),
            "edit-save" => Ok(Command::EditSave),
            "edit-cancel" => Ok(Command::EditCancel),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn field_and_value(rest: &str, usage: &'static str) -> Result<(Field, String), CommandError> {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None if !rest.is_empty() => (rest, ""),
        None => return Err(CommandError::Usage(usage)),
    };
    let field = field
        .parse::<Field>()
        .map_err(|e| CommandError::Invalid(e.to_string()))?;
    Ok((field, value.to_string()))
}

fn single_arg(rest: &str, usage: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(CommandError::Usage(usage));
    }
    Ok(rest.to_string())
}
