//! Session script parsing.
//!
//! A script is a list of editor actions, one per line. Blank lines and lines
//! starting with `#` are ignored. Free text arguments run to the end of the
//! line and understand the escapes `\n`, `\t` and `\\`.
//!
//! ```text
//! open src/lib.rs pub mod a;\npub mod b;\n
//! jump src/lib.rs 2
//! insert 0 // header\n
//! back
//! show
//! ```

use crate::error::{NavError, NavResult};
use anyhow::{Context, Result};
use std::path::Path;

/// One editor action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open `path`, with inline text or read from disk.
    Open { path: String, text: Option<String> },
    /// Open a document without a file name.
    Untitled { text: String },
    Close { path: String },
    Switch { path: String },
    /// Move the cursor in the current document without recording.
    Move { offset: usize },
    /// Record the cursor of the current document.
    Record,
    /// Jump from the current document to `line` of `path`.
    Jump { path: String, line: usize },
    Insert { offset: usize, text: String },
    Delete { start: usize, end: usize },
    Back,
    Forward,
    Forget { path: String },
    Show,
}

/// A parsed script with source line numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub commands: Vec<(usize, Command)>,
}

impl Script {
    /// Parses script source.
    ///
    /// # Errors
    ///
    /// Returns `NavError::Script` naming the first line that is not a valid command.
    pub fn parse(source: &str) -> NavResult<Self> {
        let mut commands = Vec::new();
        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let command = parse_line(line).map_err(|message| NavError::Script {
                line: idx + 1,
                message,
            })?;
            commands.push((idx + 1, command));
        }
        Ok(Self { commands })
    }

    /// Reads and parses a script file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let source = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read script {}", path_ref.display()))?;
        Self::parse(&source).with_context(|| format!("Failed to parse {}", path_ref.display()))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn parse_line(line: &str) -> Result<Command, String> {
    let (word, rest) = next_token(line);
    let command = match word {
        "open" => {
            let (path, text) = required(rest, "path")?;
            Command::Open {
                path: path.to_string(),
                text: (!text.is_empty()).then(|| unescape(text)),
            }
        }
        "untitled" => Command::Untitled {
            text: unescape(rest),
        },
        "close" => Command::Close {
            path: single(rest, "path")?.to_string(),
        },
        "switch" => Command::Switch {
            path: single(rest, "path")?.to_string(),
        },
        "move" => Command::Move {
            offset: number(single(rest, "offset")?)?,
        },
        "record" => no_args(rest, Command::Record)?,
        "jump" => {
            let (path, rest) = required(rest, "path")?;
            Command::Jump {
                path: path.to_string(),
                line: number(single(rest, "line")?)?,
            }
        }
        "insert" => {
            let (offset, text) = required(rest, "offset")?;
            Command::Insert {
                offset: number(offset)?,
                text: unescape(text),
            }
        }
        "delete" => {
            let (start, rest) = required(rest, "start")?;
            Command::Delete {
                start: number(start)?,
                end: number(single(rest, "end")?)?,
            }
        }
        "back" => no_args(rest, Command::Back)?,
        "forward" => no_args(rest, Command::Forward)?,
        "forget" => Command::Forget {
            path: single(rest, "path")?.to_string(),
        },
        "show" => no_args(rest, Command::Show)?,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(command)
}

/// Splits off the first whitespace-delimited token.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (s, ""),
    }
}

fn required<'a>(s: &'a str, what: &str) -> Result<(&'a str, &'a str), String> {
    match next_token(s) {
        ("", _) => Err(format!("missing {}", what)),
        pair => Ok(pair),
    }
}

fn single<'a>(s: &'a str, what: &str) -> Result<&'a str, String> {
    let (token, rest) = required(s, what)?;
    if !rest.is_empty() {
        return Err(format!("unexpected '{}' after {}", rest, what));
    }
    Ok(token)
}

fn no_args(s: &str, command: Command) -> Result<Command, String> {
    if s.is_empty() {
        Ok(command)
    } else {
        Err(format!("unexpected arguments '{}'", s))
    }
}

fn number(s: &str) -> Result<usize, String> {
    s.parse()
        .map_err(|_| format!("expected a number, found '{}'", s))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
