//! `r --init`: writes a fresh `r.toml` into a directory after asking for the
//! remote address.

use std::io::{self, BufRead, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::OpenOptions, fs_utf8::Dir};
use ortho_config::toml;
use tracing::info;

use crate::config::{CONFIG_FILE_NAME, ConfigFile, RemoteSpec};

mod error;

pub use error::InitError;

/// Question shown before reading the remote address.
pub const REMOTE_PROMPT: &str =
    "Please enter the address of the remote directory in the form <hostname>:<path>:";

/// Source of answers for interactive questions.
pub trait Prompt {
    /// Shows `question` and returns the answer without its line ending.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::Prompt`] when no answer can be read.
    fn ask(&mut self, question: &str) -> Result<String, InitError>;
}

/// Prompt reading answers from a line-oriented input and echoing questions
/// to an output stream.
#[derive(Debug)]
pub struct StdioPrompt<R, W> {
    input: R,
    output: W,
}

impl StdioPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Creates a prompt bound to the process's standard input and output.
    #[must_use]
    pub fn from_stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdioPrompt<R, W> {
    /// Creates a prompt over arbitrary streams.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for StdioPrompt<R, W> {
    fn ask(&mut self, question: &str) -> Result<String, InitError> {
        let prompt_error = |err: io::Error| InitError::Prompt {
            message: err.to_string(),
        };
        writeln!(self.output, "{question}").map_err(prompt_error)?;
        write!(self.output, "? ").map_err(prompt_error)?;
        self.output.flush().map_err(prompt_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(prompt_error)?;
        if read == 0 {
            return Err(InitError::Prompt {
                message: String::from("input ended before an answer was given"),
            });
        }
        Ok(line.trim().to_owned())
    }
}

/// Creates `r.toml` in a single directory.
#[derive(Clone, Debug)]
pub struct InitWorkflow {
    directory: Utf8PathBuf,
}

impl InitWorkflow {
    /// Targets `directory`, normally the current working directory.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Path of the file this workflow creates.
    #[must_use]
    pub fn config_path(&self) -> Utf8PathBuf {
        self.directory.join(CONFIG_FILE_NAME)
    }

    /// Asks for the remote address and writes `r.toml` with an empty ignore
    /// list, returning the path written.
    ///
    /// An existing file is never touched: it is reported before anything is
    /// asked, and the final write refuses to replace a file created in the
    /// meantime.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::AlreadyExists`] when `r.toml` is present,
    /// [`InitError::InvalidRemote`] when the answer is malformed, and
    /// [`InitError::Prompt`] or [`InitError::Io`] on I/O failures.
    pub fn execute(&self, prompt: &mut impl Prompt) -> Result<Utf8PathBuf, InitError> {
        let path = self.config_path();
        let dir = Dir::open_ambient_dir(&self.directory, ambient_authority())
            .map_err(|err| io_error(&self.directory, &err))?;
        if dir
            .try_exists(CONFIG_FILE_NAME)
            .map_err(|err| io_error(&path, &err))?
        {
            return Err(InitError::AlreadyExists { path });
        }

        let remote = prompt.ask(REMOTE_PROMPT)?;
        RemoteSpec::parse(&remote)?;
        let rendered = toml::to_string(&ConfigFile {
            remote,
            ignores: Vec::new(),
        })
        .map_err(|err| InitError::Serialize(err.to_string()))?;

        info!(path = %path, "saving configuration");
        write_new_file(&dir, &path, &rendered)?;
        Ok(path)
    }
}

fn write_new_file(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), InitError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(CONFIG_FILE_NAME, &options)
        .map_err(|err| match err.kind() {
            io::ErrorKind::AlreadyExists => InitError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => io_error(path, &err),
        })?;
    file.write_all(contents.as_bytes())
        .map_err(|err| io_error(path, &err))
}

fn io_error(path: &Utf8Path, err: &io::Error) -> InitError {
    InitError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
