//! Typed command lines.
//!
//! Stage builders assemble [`Command`]s and [`Fragment`]s token by token and
//! only turn them into text through `Display` when handing them to whatever
//! runs them. Tokens are joined by a single space, piped commands by ` | `,
//! and a stdout redirect is rendered as ` > path`. A token holding anything
//! besides plain path and option characters is single-quoted.

use crate::path::PathLike;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Conversion of a value into a single command-line token.
pub trait ToArg {
    fn to_arg(&self) -> String;
}

impl ToArg for str {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ToArg for String {
    fn to_arg(&self) -> String {
        self.clone()
    }
}

impl ToArg for Path {
    fn to_arg(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

impl ToArg for PathBuf {
    fn to_arg(&self) -> String {
        self.as_path().to_arg()
    }
}

impl ToArg for PathLike {
    fn to_arg(&self) -> String {
        self.resolve().to_arg()
    }
}

impl ToArg for u32 {
    fn to_arg(&self) -> String {
        self.to_string()
    }
}

/// Chaining helpers shared by [`Command`] and [`Fragment`].
pub trait ArgBuilder: Sized {
    fn args_mut(&mut self) -> &mut Vec<String>;

    fn arg<A: ToArg + ?Sized>(mut self, value: &A) -> Self {
        self.args_mut().push(value.to_arg());
        self
    }

    fn opt<A: ToArg + ?Sized>(self, flag: &str, value: &A) -> Self {
        self.arg(flag).arg(value)
    }

    /// Appends `flag value` when `value` is present, nothing otherwise.
    fn opt_some<A: ToArg + ?Sized>(self, flag: &str, value: Option<&A>) -> Self {
        match value {
            Some(value) => self.opt(flag, value),
            None => self,
        }
    }

    fn extend(mut self, fragment: Fragment) -> Self {
        self.args_mut().extend(fragment.args);
        self
    }
}

/// Quotes `token` for a POSIX shell unless it is already a single word.
fn shell_quote(token: &str) -> Cow<'_, str> {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./,=:+@%".contains(c));
    if plain {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(format!("'{}'", token.replace('\'', r"'\''")))
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, tokens: &[String]) -> fmt::Result {
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        f.write_str(&shell_quote(token))?;
    }
    Ok(())
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// A partial argument list meant to be appended onto a [`Command`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    args: Vec<String>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn contains(&self, token: &str) -> bool {
        self.args.iter().any(|a| a == token)
    }

    pub fn value_of(&self, flag: &str) -> Option<&str> {
        value_after(&self.args, flag)
    }
}

impl ArgBuilder for Fragment {
    fn args_mut(&mut self) -> &mut Vec<String> {
        &mut self.args
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.args)
    }
}

/// One external invocation: program, ordered arguments, optional stdout redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
    stdout: Option<PathBuf>,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdout: None,
        }
    }

    pub fn redirect_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn stdout(&self) -> Option<&Path> {
        self.stdout.as_deref()
    }

    /// Program, arguments and redirect, unquoted.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.args.len() + 3);
        tokens.push(self.program.clone());
        tokens.extend(self.args.iter().cloned());
        if let Some(path) = &self.stdout {
            tokens.push(">".to_string());
            tokens.push(path.to_arg());
        }
        tokens
    }

    pub fn contains(&self, token: &str) -> bool {
        self.args.iter().any(|a| a == token)
    }

    pub fn value_of(&self, flag: &str) -> Option<&str> {
        value_after(&self.args, flag)
    }

    pub fn pipe(self, next: Command) -> ShellLine {
        ShellLine::from(self).pipe(next)
    }
}

impl ArgBuilder for Command {
    fn args_mut(&mut self) -> &mut Vec<String> {
        &mut self.args
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program))?;
        if !self.args.is_empty() {
            f.write_str(" ")?;
            write_quoted(f, &self.args)?;
        }
        if let Some(path) = &self.stdout {
            write!(f, " > {}", shell_quote(&path.to_arg()))?;
        }
        Ok(())
    }
}

/// Commands connected by pipes. A single command is a one-element line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLine {
    commands: Vec<Command>,
}

impl ShellLine {
    pub fn pipe(mut self, next: Command) -> Self {
        self.commands.push(next);
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn first(&self) -> &Command {
        &self.commands[0]
    }

    pub fn pipe_count(&self) -> usize {
        self.commands.len() - 1
    }
}

impl From<Command> for ShellLine {
    fn from(command: Command) -> Self {
        Self {
            commands: vec![command],
        }
    }
}

impl fmt::Display for ShellLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

impl Serialize for ShellLine {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
