//! Scripted editing sessions.
//!
//! A [`Session`] pairs a [`MemoryWorkspace`] with a [`NavQueue`] and replays
//! [`Command`]s against them, the way an interactive editor would drive the
//! history from key bindings.

pub mod script;

pub use script::{Command, Script};

use crate::config::Config;
use crate::error::NavError;
use crate::history::{ButtonState, NavQueue};
use crate::workspace::{CursorNavigator, DocHandle, DocumentRegistry, MemoryWorkspace};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;

pub struct Session {
    ws: MemoryWorkspace,
    queue: NavQueue<ButtonState>,
    base_dir: Option<PathBuf>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            ws: MemoryWorkspace::new(),
            queue: NavQueue::init(config, ButtonState::default()),
            base_dir: None,
        }
    }

    /// Resolves `open PATH` without inline text relative to `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn workspace(&self) -> &MemoryWorkspace {
        &self.ws
    }

    pub fn queue(&self) -> &NavQueue<ButtonState> {
        &self.queue
    }

    /// Replays every command, collecting the output of `show`.
    pub fn run(&mut self, script: &Script) -> Result<Vec<String>> {
        let mut output = Vec::new();
        for (line, command) in &script.commands {
            if let Some(text) = self
                .apply(command)
                .with_context(|| format!("Script line {} failed", line))?
            {
                output.push(text);
            }
        }
        Ok(output)
    }

    /// Applies one command. Returns text for commands that print.
    pub fn apply(&mut self, command: &Command) -> Result<Option<String>> {
        match command {
            Command::Open { path, text } => {
                match text {
                    Some(text) => {
                        self.ws.open(path, text);
                    }
                    None => {
                        let disk_path = match &self.base_dir {
                            Some(dir) => dir.join(path),
                            None => PathBuf::from(path),
                        };
                        let content = std::fs::read_to_string(&disk_path)
                            .with_context(|| format!("Failed to read {}", disk_path.display()))?;
                        self.ws.open(path, &content);
                    }
                }
                log::info!("Opened {}", path);
            }
            Command::Untitled { text } => {
                self.ws.open_untitled(text);
            }
            Command::Close { path } => {
                let doc = self.lookup(path)?;
                self.ws.close(doc);
            }
            Command::Switch { path } => {
                let doc = self.lookup(path)?;
                self.ws.set_current(doc)?;
            }
            Command::Move { offset } => {
                let doc = self.current()?;
                self.ws.set_cursor(doc, *offset)?;
            }
            Command::Record => {
                let doc = self.current()?;
                let offset = self.ws.current_offset(doc);
                self.queue.record_position(&mut self.ws, doc, offset);
            }
            Command::Jump { path, line } => {
                let new = self.lookup(path)?;
                let old = self.ws.current_document();
                if !self.queue.jump_with_record(&mut self.ws, old, new, *line) {
                    log::warn!("Jump to {}:{} did not move the cursor", path, line);
                }
            }
            Command::Insert { offset, text } => {
                let doc = self.current()?;
                self.ws.insert(doc, *offset, text)?;
            }
            Command::Delete { start, end } => {
                let doc = self.current()?;
                self.ws.delete(doc, *start, *end)?;
            }
            Command::Back => {
                let step = self.queue.go_back(&mut self.ws);
                log::debug!("back: {:?}", step);
            }
            Command::Forward => {
                let step = self.queue.go_forward(&mut self.ws);
                log::debug!("forward: {:?}", step);
            }
            Command::Forget { path } => {
                self.queue.remove_all_for_file(&mut self.ws, Some(path.as_str()));
            }
            Command::Show => return Ok(Some(self.status())),
        }
        Ok(None)
    }

    /// One-line summary: entries newest first, the cursor entry starred,
    /// followed by the button states and the editor location.
    pub fn status(&self) -> String {
        let mut out = String::from("[");
        for (i, anchor) in self.queue.entries().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if i == self.queue.cursor() {
                out.push('*');
            }
            let _ = write!(out, "{}:{}", anchor.file(), anchor.offset());
            if anchor.is_invalidated() {
                out.push('!');
            }
        }
        out.push(']');

        let buttons = self.queue.buttons();
        let _ = write!(
            out,
            " back={} forward={}",
            on_off(buttons.back),
            on_off(buttons.forward)
        );

        match self.ws.current_document() {
            Some(doc) => {
                let name = self.ws.file_identity(doc).unwrap_or("untitled");
                let _ = write!(out, " at {}:{}", name, self.ws.current_offset(doc));
            }
            None => out.push_str(" at -"),
        }
        out
    }

    /// Tears the history down, releasing every marker tag.
    pub fn finish(self) -> (MemoryWorkspace, ButtonState) {
        let Self { mut ws, queue, .. } = self;
        let buttons = queue.teardown(&mut ws);
        (ws, buttons)
    }

    fn lookup(&self, path: &str) -> Result<DocHandle, NavError> {
        self.ws
            .find_document(path)
            .ok_or_else(|| NavError::UnknownFile(path.to_string()))
    }

    fn current(&self) -> Result<DocHandle, NavError> {
        self.ws.current_document().ok_or(NavError::NothingOpen)
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
