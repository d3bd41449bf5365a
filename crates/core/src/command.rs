//! Console command dispatch.
//!
//! The overlay hands every submitted line, split into arguments, to a
//! [`CommandDispatcher`]. [`CommandRegistry`] is the stock dispatcher: a
//! name to closure table.

use std::collections::BTreeMap;

use thiserror::Error;

/// Result of dispatching one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Executed,
    Unknown,
    Failed(String),
}

pub trait CommandDispatcher {
    /// `argv` is never empty; `argv[0]` is the command name.
    fn dispatch(&mut self, argv: &[String]) -> CommandOutcome;
}

impl<F> CommandDispatcher for F
where
    F: FnMut(&[String]) -> CommandOutcome,
{
    fn dispatch(&mut self, argv: &[String]) -> CommandOutcome {
        self(argv)
    }
}

/// Dispatcher that knows no commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCommands;

impl CommandDispatcher for NoCommands {
    fn dispatch(&mut self, _argv: &[String]) -> CommandOutcome {
        CommandOutcome::Unknown
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(String),
    #[error("{0}")]
    Failed(String),
}

type Handler = Box<dyn FnMut(&[String]) -> Result<(), CommandError>>;

struct Command {
    help: String,
    handler: Handler,
}

/// Named commands backed by closures. Names are matched case-insensitively.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a command.
    pub fn register<F>(&mut self, name: &str, help: &str, handler: F)
    where
        F: FnMut(&[String]) -> Result<(), CommandError> + 'static,
    {
        self.commands.insert(
            name.trim().to_lowercase(),
            Command {
                help: help.to_string(),
                handler: Box::new(handler),
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.keys().map(String::as_str)
    }

    /// One `name - help` line per command, sorted by name.
    pub fn help_lines(&self) -> Vec<String> {
        self.commands
            .iter()
            .map(|(name, cmd)| format!("{name} - {}", cmd.help))
            .collect()
    }
}

impl CommandDispatcher for CommandRegistry {
    fn dispatch(&mut self, argv: &[String]) -> CommandOutcome {
        let Some(name) = argv.first() else {
            return CommandOutcome::Unknown;
        };
        match self.commands.get_mut(&name.to_lowercase()) {
            None => CommandOutcome::Unknown,
            Some(cmd) => match (cmd.handler)(argv) {
                Ok(()) => CommandOutcome::Executed,
                Err(e) => CommandOutcome::Failed(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn argv(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn dispatches_by_name() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = CommandRegistry::new();
        let sink = Rc::clone(&seen);
        registry.register("echo", "print arguments", move |args| {
            sink.borrow_mut().push(args[1..].join(" "));
            Ok(())
        });

        assert_eq!(registry.dispatch(&argv("ECHO hi there")), CommandOutcome::Executed);
        assert_eq!(seen.borrow().as_slice(), &["hi there".to_string()]);
        assert_eq!(registry.dispatch(&argv("nope")), CommandOutcome::Unknown);
    }

    #[test]
    fn failures_carry_the_message() {
        let mut registry = CommandRegistry::new();
        registry.register("volume", "set volume", |args| {
            if args.len() != 2 {
                return Err(CommandError::Usage("volume <0-100>".into()));
            }
            Ok(())
        });
        assert_eq!(
            registry.dispatch(&argv("volume")),
            CommandOutcome::Failed("usage: volume <0-100>".into())
        );
    }

    #[test]
    fn help_is_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register("quit", "leave", |_| Ok(()));
        registry.register("clear", "wipe", |_| Ok(()));
        assert!(registry.contains("Clear"));
        assert_eq!(registry.help_lines(), vec!["clear - wipe", "quit - leave"]);
    }

    #[test]
    fn closures_are_dispatchers() {
        let mut count = 0;
        let mut f = |_: &[String]| {
            count += 1;
            CommandOutcome::Executed
        };
        assert_eq!(f.dispatch(&argv("x")), CommandOutcome::Executed);
        assert_eq!(NoCommands.dispatch(&argv("x")), CommandOutcome::Unknown);
        drop(f);
        assert_eq!(count, 1);
    }
}
