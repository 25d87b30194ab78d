//! External command execution.
//!
//! Directory lookups, mail signing, mail delivery and the metadata linter are
//! all external programs. They go through [`CommandRunner`] so the flows can
//! be exercised without ssh or gpg on the machine.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("'{command}' exited with {}", .code.map_or_else(|| "a signal".to_string(), |code| format!("status {code}")))]
    Failed { command: String, code: Option<i32> },

    /// Pipe I/O failed while talking to the program.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
    pub current_dir: Option<PathBuf>,
    pub capture_stdout: bool,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            current_dir: None,
            capture_stdout: true,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Feed `input` to the program's standard input.
    #[must_use]
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Let the program write straight to our stdout instead of capturing it.
    #[must_use]
    pub fn inherit_stdout(mut self) -> Self {
        self.capture_stdout = false;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external programs.
pub trait CommandRunner {
    /// Run the invocation to completion and return its captured stdout
    /// (empty when stdout is inherited).
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Failed`] on a non-zero exit, or a spawn/pipe
    /// error.
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, ProcessError>;
}

/// Runs programs on the local machine via `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, ProcessError> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }
        command.stdin(if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        command.stdout(if invocation.capture_stdout {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        tracing::debug!(command = %invocation, "running external command");
        let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        // Written from a separate thread so a chatty child cannot block on a
        // full stdout pipe while we are still feeding it.
        let writer = match (child.stdin.take(), invocation.stdin.clone()) {
            (Some(mut pipe), Some(input)) => {
                Some(std::thread::spawn(move || pipe.write_all(&input)))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ProcessError::Failed {
                command: invocation.to_string(),
                code: output.status.code(),
            });
        }

        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| std::io::Error::other("stdin writer thread panicked"))??;
        }

        Ok(output.stdout)
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use scripted::ScriptedRunner;

#[cfg(any(test, feature = "test-support"))]
mod scripted {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::{CommandRunner, Invocation, ProcessError};

    /// Replays canned results in order and records every invocation.
    /// Once the script runs out, further calls succeed with empty output.
    #[derive(Debug, Default)]
    pub struct ScriptedRunner {
        script: RefCell<VecDeque<Result<Vec<u8>, Option<i32>>>>,
        calls: RefCell<Vec<Invocation>>,
    }

    impl ScriptedRunner {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful run printing `stdout`.
        #[must_use]
        pub fn respond(self, stdout: impl Into<Vec<u8>>) -> Self {
            self.script.borrow_mut().push_back(Ok(stdout.into()));
            self
        }

        /// Queue a run exiting with `code`.
        #[must_use]
        pub fn fail(self, code: i32) -> Self {
            self.script.borrow_mut().push_back(Err(Some(code)));
            self
        }

        #[must_use]
        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, ProcessError> {
            self.calls.borrow_mut().push(invocation.clone());
            match self.script.borrow_mut().pop_front() {
                Some(Ok(stdout)) => Ok(stdout),
                Some(Err(code)) => Err(ProcessError::Failed {
                    command: invocation.to_string(),
                    code,
                }),
                None => Ok(Vec::new()),
            }
        }
    }
}
