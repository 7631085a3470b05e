//! Subprocess execution utilities.

use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context, Result};

/// Lines containing this marker are always printed, even when repeated.
///
/// The liblab CLI prints an `Owner:` banner per generated artifact; dropping
/// repeats would lose which artifact the following lines belong to.
pub const ALWAYS_EMIT_MARKER: &str = "Owner:";

/// Suppresses repeated output lines of a single command invocation.
#[derive(Debug, Default)]
pub struct OutputDeduper {
    seen: HashSet<String>,
}

impl OutputDeduper {
    pub fn new() -> Self {
        OutputDeduper::default()
    }

    /// Whether `line` should be printed. Records it as seen.
    pub fn should_emit(&mut self, line: &str) -> bool {
        if line.contains(ALWAYS_EMIT_MARKER) {
            self.seen.insert(line.to_string());
            return true;
        }
        self.seen.insert(line.to_string())
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Set multiple environment variables.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            self = self.env(key, value);
        }
        self
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run the command, passing each distinct output line to `emit` as it
    /// arrives.
    ///
    /// stdout and stderr are interleaved in arrival order. Repeats are
    /// dropped except lines carrying [`ALWAYS_EMIT_MARKER`].
    pub fn stream<F>(&self, mut emit: F) -> Result<ExitStatus>
    where
        F: FnMut(&str),
    {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.display_command()))?;

        let (tx, rx) = mpsc::channel::<String>();
        let mut readers = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            readers.push(forward_lines(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(forward_lines(stderr, tx.clone()));
        }
        drop(tx);

        let mut dedup = OutputDeduper::new();
        for line in rx {
            if dedup.should_emit(&line) {
                emit(&line);
            }
        }

        for reader in readers {
            join_reader(reader, &self.display_command());
        }

        child
            .wait()
            .with_context(|| format!("failed to wait for `{}`", self.display_command()))
    }

    /// Stream output to the log and require a zero exit code.
    pub fn stream_and_check(&self) -> Result<()> {
        let status = self.stream(|line| tracing::info!("{}", line))?;
        if !status.success() {
            match status.code() {
                Some(code) => bail!(
                    "Command '{}' exited with code {}",
                    self.display_command(),
                    code
                ),
                None => bail!(
                    "Command '{}' was terminated by a signal",
                    self.display_command()
                ),
            }
        }
        Ok(())
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Forward `pipe` line by line into `tx` from a background thread.
fn forward_lines<R>(pipe: R, tx: mpsc::Sender<String>) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        for chunk in BufReader::new(pipe).split(b'\n') {
            let Ok(bytes) = chunk else { break };
            let text = String::from_utf8_lossy(&bytes);
            let line = text.strip_suffix('\r').unwrap_or(&text);
            if tx.send(line.to_string()).is_err() {
                break;
            }
        }
    })
}

/// Wait for an output reader thread. Returns `false` if it panicked, in
/// which case some of the command's output may be missing from the log.
fn join_reader(reader: thread::JoinHandle<()>, command: &str) -> bool {
    match reader.join() {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!(
                "Output reader for `{}` panicked; output may be incomplete",
                command
            );
            false
        }
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
