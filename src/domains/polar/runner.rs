//! Solver process invocation.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, instrument, warn};

use super::error::{PolarError, PolarResult};

/// Captured result of one solver process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverRun {
    /// Process exit code; `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    /// Everything the solver printed on stdout.
    pub stdout: String,
    /// Everything the solver printed on stderr.
    pub stderr: String,
}

impl SolverRun {
    /// Whether the process reported success.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a command script through the solver.
///
/// Implementations must not treat a non-zero exit code as an error; only a
/// failure to launch is fatal.
pub trait SolverRunner: Send + Sync {
    /// Binary name or path reported in logs and health output.
    fn binary(&self) -> &str;

    /// Run the solver in `workdir`, feeding `script` on stdin, and wait for it.
    fn run(&self, script: &str, workdir: &Path) -> PolarResult<SolverRun>;
}

/// Runs the real XFOIL executable as a child process.
#[derive(Debug, Clone)]
pub struct XfoilRunner {
    binary: String,
    args: Vec<String>,
}

impl XfoilRunner {
    /// Runner for the given binary name or path, resolved through `PATH`.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new(),
        }
    }

    /// Extra command-line arguments, for wrappers that need them.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl SolverRunner for XfoilRunner {
    fn binary(&self) -> &str {
        &self.binary
    }

    #[instrument(skip_all, fields(binary = %self.binary, workdir = %workdir.display()))]
    fn run(&self, script: &str, workdir: &Path) -> PolarResult<SolverRun> {
        let mut child = Command::new(&self.binary)
            .args(&self.args)
            .current_dir(workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PolarError::binary_not_found(&self.binary, e))?;

        debug!("Solver started (pid {})", child.id());

        // Stdin is written concurrently with draining stdout and stderr.
        let feeder = child.stdin.take().map(|mut stdin| {
            let script = script.to_owned();
            thread::spawn(move || stdin.write_all(script.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if let Some(feeder) = feeder {
            match feeder.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("Solver closed stdin before reading the whole script");
                }
                Ok(Err(e)) => warn!("Failed to write script to solver stdin: {}", e),
                Err(_) => warn!("Solver stdin writer thread panicked"),
            }
        }

        let exit_code = output.status.code().unwrap_or(-1);
        debug!("Solver exited with code {}", exit_code);

        Ok(SolverRun {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SCRIPT: &str = "LOAD demo.dat\nOPER\nALFA 0.0\nQUIT\n";

    #[test]
    fn test_missing_binary() {
        let workdir = TempDir::new().unwrap();
        let runner = XfoilRunner::new("xfoil-binary-that-does-not-exist");
        let err = runner.run(SCRIPT, workdir.path()).unwrap_err();
        match err {
            PolarError::BinaryNotFound { binary, .. } => {
                assert_eq!(binary, "xfoil-binary-that-does-not-exist")
            }
            other => panic!("Expected BinaryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_name_reported() {
        assert_eq!(XfoilRunner::new("/opt/xfoil/bin/xfoil").binary(), "/opt/xfoil/bin/xfoil");
    }

    // The fake solvers are run as `/bin/sh <script>` rather than executed
    // directly, which avoids ETXTBSY races with other tests forking.
    #[cfg(unix)]
    fn shell_solver(dir: &Path, body: &str) -> XfoilRunner {
        let path = dir.join("fake_xfoil.sh");
        fs::write(&path, body).unwrap();
        XfoilRunner::new("/bin/sh").with_args([path.to_string_lossy().to_string()])
    }

    #[cfg(unix)]
    #[test]
    fn test_script_fed_on_stdin_in_workdir() {
        let tools = TempDir::new().unwrap();
        let workdir = TempDir::new().unwrap();
        let runner = shell_solver(tools.path(), "cat > received.txt\n");

        let run = runner.run(SCRIPT, workdir.path()).unwrap();
        assert!(run.success());

        let received = fs::read_to_string(workdir.path().join("received.txt")).unwrap();
        assert_eq!(received, SCRIPT);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        let tools = TempDir::new().unwrap();
        let workdir = TempDir::new().unwrap();
        let runner = shell_solver(
            tools.path(),
            "cat > /dev/null\necho converged\necho 'warning: pane' 1>&2\nexit 2\n",
        );

        let run = runner.run(SCRIPT, workdir.path()).unwrap();
        assert_eq!(run.exit_code, 2);
        assert!(!run.success());
        assert_eq!(run.stdout, "converged\n");
        assert_eq!(run.stderr, "warning: pane\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_solver_ignoring_stdin() {
        let tools = TempDir::new().unwrap();
        let workdir = TempDir::new().unwrap();
        let runner = shell_solver(tools.path(), "exit 0\n");

        let run = runner.run(SCRIPT, workdir.path()).unwrap();
        assert_eq!(run.exit_code, 0);
    }
}
