//! Shared test utilities for the installer crate.
//!
//! [`StubExecutor`] and [`ScriptedPrompter`] let flows run end to end in
//! tests without invoking real tools or a real terminal.

use crate::error::Result;
use crate::exec::CommandExecutor;
use crate::prompt::Prompter;
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Creates a successful command `Output` carrying the given stdout text.
#[must_use]
pub fn output_with_stdout(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    cmd: String,
    args: Vec<String>,
    cwd: Option<Utf8PathBuf>,
    result: Result<Output>,
}

impl ExpectedCall {
    /// Creates an expectation for a command run without a working directory.
    #[must_use]
    pub fn new(cmd: &str, args: &[&str], result: Result<Output>) -> Self {
        Self {
            cmd: cmd.to_owned(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
            cwd: None,
            result,
        }
    }

    /// Sets the working directory this invocation is expected to use.
    #[must_use]
    pub fn in_dir(mut self, cwd: &Utf8Path) -> Self {
        self.cwd = Some(cwd.to_owned());
        self
    }
}

/// A stub implementation of [`CommandExecutor`] for testing.
///
/// Records expected command invocations and returns predefined results,
/// allowing tests to verify command execution without side effects. Captured
/// and streaming runs consume the same ordered queue.
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
        }
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }

    fn next_call(&self, cmd: &str, args: &[&str], cwd: Option<&Utf8Path>) -> Result<Output> {
        let mut expected = self.expected.borrow_mut();
        let call = expected
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command invocation: {cmd} {args:?}"));

        assert_eq!(call.cmd, cmd, "command mismatch");
        assert_eq!(call.args, args, "argument mismatch for {cmd}");
        assert_eq!(
            call.cwd.as_deref(),
            cwd,
            "working directory mismatch for {cmd}"
        );

        call.result
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str], cwd: Option<&Utf8Path>) -> Result<Output> {
        self.next_call(cmd, args, cwd)
    }

    fn run_streaming(
        &self,
        cmd: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> Result<ExitStatus> {
        self.next_call(cmd, args, cwd).map(|output| output.status)
    }
}

/// A scripted answer for [`ScriptedPrompter`].
#[derive(Debug, Clone)]
pub enum Answer {
    /// Answer the next confirm prompt.
    Confirm(bool),
    /// Answer the next free-text prompt.
    Input(String),
    /// Answer the next masked prompt.
    Password(String),
    /// Answer the next directory-selection prompt.
    Directory(Utf8PathBuf),
}

/// A [`Prompter`] that replays a fixed script of answers in order.
///
/// Panics on any prompt the script did not anticipate, so tests pin down the
/// exact interaction sequence.
#[derive(Debug)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
}

impl ScriptedPrompter {
    /// Creates a prompter that replays `answers` in order.
    #[must_use]
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
        }
    }

    /// Asserts that every scripted answer was consumed.
    ///
    /// # Panics
    ///
    /// Panics if any scripted answers remain.
    pub fn assert_finished(&self) {
        assert!(
            self.answers.borrow().is_empty(),
            "expected no further prompts"
        );
    }

    fn next(&self, prompt: &str) -> Answer {
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {prompt}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt) {
            Answer::Confirm(answer) => Ok(answer),
            other => panic!("expected a confirm answer for {prompt:?}, got {other:?}"),
        }
    }

    fn input(&self, prompt: &str) -> Result<String> {
        match self.next(prompt) {
            Answer::Input(answer) => Ok(answer),
            other => panic!("expected an input answer for {prompt:?}, got {other:?}"),
        }
    }

    fn password(&self, prompt: &str) -> Result<String> {
        match self.next(prompt) {
            Answer::Password(answer) => Ok(answer),
            other => panic!("expected a password answer for {prompt:?}, got {other:?}"),
        }
    }

    fn select_directory(&self, start: &Utf8Path) -> Result<Utf8PathBuf> {
        match self.next(start.as_str()) {
            Answer::Directory(answer) => Ok(answer),
            other => panic!("expected a directory answer, got {other:?}"),
        }
    }
}
