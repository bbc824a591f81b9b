//! Report output, optionally piped through a pager.

use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

const DEFAULT_PAGER: &str = "/usr/bin/less";

/// Destination for the rendered report.
///
/// The pager variant owns the child process; its stdin is closed and the
/// child waited on when the output is finished or dropped.
pub enum Output {
    Stdout(io::Stdout),
    Pager {
        child: Option<Child>,
        stdin: Option<ChildStdin>,
    },
}

impl Output {
    /// Open stdout, or spawn `$PAGER` when `paginate` is set.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the pager cannot be started.
    pub fn open(paginate: bool) -> io::Result<Self> {
        if !paginate {
            return Ok(Output::Stdout(io::stdout()));
        }
        let pager = std::env::var("PAGER")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PAGER.to_string());
        let mut words = pager.split_whitespace();
        let program = words.next().unwrap_or(DEFAULT_PAGER);
        let mut child = Command::new(program)
            .args(words)
            .stdin(Stdio::piped())
            .spawn()?;
        let stdin = child.stdin.take();
        tracing::debug!(pager = pager.as_str(), "pager started");
        Ok(Output::Pager {
            child: Some(child),
            stdin,
        })
    }

    /// Flush, close the pager pipe and wait for the pager to exit.
    ///
    /// # Errors
    ///
    /// Returns the first flush or wait error.
    pub fn finish(mut self) -> io::Result<()> {
        self.close()
    }

    fn close(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(out) => out.flush(),
            Output::Pager { child, stdin } => {
                let flushed = match stdin.take() {
                    Some(mut pipe) => pipe.flush(),
                    None => Ok(()),
                };
                if let Some(mut child) = child.take() {
                    child.wait()?;
                }
                flushed
            }
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(out) => out.write(buf),
            Output::Pager {
                stdin: Some(pipe), ..
            } => pipe.write(buf),
            Output::Pager { stdin: None, .. } => {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pager closed"))
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(out) => out.flush(),
            Output::Pager {
                stdin: Some(pipe), ..
            } => pipe.flush(),
            Output::Pager { stdin: None, .. } => Ok(()),
        }
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to close report output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_output_finishes() {
        let mut out = Output::open(false).unwrap();
        out.write_all(b"").unwrap();
        out.finish().unwrap();
    }

    #[test]
    fn test_closed_pager_pipe_rejects_writes() {
        let mut out = Output::Pager {
            child: None,
            stdin: None,
        };
        let err = out.write(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
