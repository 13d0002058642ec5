use std::path::PathBuf;

use crate::errors::PlannerError;
use crate::form::Field;
use crate::view::Screen;

/// One user action typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Enter,
    Exit,
    Set(Field, String),
    Plans(usize),
    Plan(usize, String),
    Attach(PathBuf),
    Detach(usize),
    Reset,
    Generate,
    Show,
    Save(PathBuf),
    Help,
    Quit,
}

impl Command {
    pub fn available_on(&self, screen: Screen) -> bool {
        match self {
            // navigation is total; the view controller ignores no-op moves
            Command::Help | Command::Quit | Command::Enter | Command::Exit => true,
            _ => screen == Screen::Workspace,
        }
    }
}

fn usage(msg: &str) -> PlannerError {
    PlannerError::Usage(format!("usage: {msg}"))
}

fn number(s: &str, what: &str) -> Result<usize, PlannerError> {
    s.trim()
        .parse()
        .map_err(|_| PlannerError::Usage(format!("{what} must be a number, got '{}'", s.trim())))
}

/// Split off the first word; the remainder keeps its inner spacing.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, PlannerError> {
    let (verb, rest) = split_word(line.trim());
    if verb.is_empty() {
        return Ok(None);
    }
    let cmd = match verb.to_lowercase().as_str() {
        "enter" | "start" => Command::Enter,
        "exit" | "back" => Command::Exit,
        "set" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(usage("set <field> <value>"));
            }
            Command::Set(field.parse()?, value.to_string())
        }
        "plans" => {
            if rest.is_empty() {
                return Err(usage("plans <count>"));
            }
            Command::Plans(number(rest, "plan count")?)
        }
        "plan" => {
            let (idx, value) = split_word(rest);
            if idx.is_empty() {
                return Err(usage("plan <number> <topic>"));
            }
            Command::Plan(number(idx, "plan number")?, value.to_string())
        }
        "attach" => {
            if rest.is_empty() {
                return Err(usage("attach <path>"));
            }
            Command::Attach(PathBuf::from(rest))
        }
        "detach" => {
            if rest.is_empty() {
                return Err(usage("detach <number>"));
            }
            Command::Detach(number(rest, "attachment number")?)
        }
        "reset" => Command::Reset,
        "generate" | "gen" => Command::Generate,
        "show" => Command::Show,
        "save" => {
            if rest.is_empty() {
                return Err(usage("save <path>"));
            }
            Command::Save(PathBuf::from(rest))
        }
        "help" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => {
            return Err(PlannerError::Usage(format!(
                "unknown command '{other}'; type 'help' for the list"
            )))
        }
    };
    Ok(Some(cmd))
}
