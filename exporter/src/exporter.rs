use log::{debug, info};
use std::{
    ffi::OsStr,
    io::{self, Write},
    panic,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
    thread,
};
use tempfile::Builder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("mod compiler '{program}' not found: {source}")]
    CompilerNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to run mod compiler {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("mod compiler exited with {status}: {stderr}")]
    CompilerFailed { status: ExitStatus, stderr: String },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Takes the rendered mod text and persists it under `filename`. Implementations
/// either write the complete file or fail, a partially written mod is never left
/// behind by a successful call.
pub trait ModSink {
    fn write_mod(&self, text: &str, filename: &Path) -> Result<(), ExportError>;
}

/// Hands the text to an external compiler, which turns it into the packaged
/// file the mod manager loads. The compiler is called as `<program> <filename>`
/// and reads the text from stdin.
#[derive(Debug, Clone)]
pub struct CompilerSink {
    program: PathBuf,
}

impl CompilerSink {
    /// Resolves the compiler once at startup. Bare names are looked up on PATH,
    /// anything with a path separator is checked as given.
    pub fn locate<S: AsRef<OsStr>>(program: S) -> Result<CompilerSink, ExportError> {
        let program = program.as_ref();
        let resolved = which::which(program).map_err(|source| ExportError::CompilerNotFound {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;

        debug!("using mod compiler {}", resolved.display());
        Ok(CompilerSink { program: resolved })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ModSink for CompilerSink {
    fn write_mod(&self, text: &str, filename: &Path) -> Result<(), ExportError> {
        let spawn_error = |source: io::Error| ExportError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .arg(filename)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // stdin is fed from its own thread while stderr is drained here, the
        // compiler may print before it reads or exit without reading at all
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));
            (written, output)
        });

        let output = output.map_err(spawn_error)?;
        if !output.status.success() {
            return Err(ExportError::CompilerFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(spawn_error)?;

        info!("compiled mod to {}", filename.display());
        Ok(())
    }
}

/// Writes the human readable text as is. The text goes to a temporary file
/// next to the target first and is then renamed over it. The temporary file is
/// removed again if either step fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSink;

impl ModSink for TextSink {
    fn write_mod(&self, text: &str, filename: &Path) -> Result<(), ExportError> {
        let dir = match filename.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = Builder::new()
            .prefix(".modgen")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|source| ExportError::Io {
                path: dir.to_path_buf(),
                source,
            })?;

        tmp.write_all(text.as_bytes())
            .map_err(|source| ExportError::Io {
                path: tmp.path().to_path_buf(),
                source,
            })?;
        tmp.persist(filename).map_err(|e| ExportError::Io {
            path: filename.to_path_buf(),
            source: e.error,
        })?;

        info!("wrote mod text to {}", filename.display());
        Ok(())
    }
}
