//! Polar service: one sweep from request to CSV.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::error::PolarResult;
use super::normalize::normalize;
use super::request::{PolarResponse, SweepRequest};
use super::runner::{SolverRunner, XfoilRunner};
use super::script;
use super::workspace::ScratchWorkspace;
use crate::core::config::SolverConfig;

/// Runs polar sweeps.
///
/// Each call gets its own scratch directory and solver process, so one
/// service can be shared across concurrent requests.
pub struct PolarService {
    config: SolverConfig,
    runner: Arc<dyn SolverRunner>,
}

impl PolarService {
    /// Service backed by the configured XFOIL binary.
    pub fn new(config: SolverConfig) -> Self {
        let runner = Arc::new(XfoilRunner::new(config.binary.clone()));
        Self::with_runner(config, runner)
    }

    /// Service backed by a custom runner.
    pub fn with_runner(config: SolverConfig, runner: Arc<dyn SolverRunner>) -> Self {
        info!("Initializing PolarService (binary: {})", runner.binary());
        Self { config, runner }
    }

    /// The solver binary used by this service.
    pub fn binary(&self) -> &str {
        self.runner.binary()
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run one sweep and return its canonical CSV table.
    ///
    /// Blocks until the solver exits.
    #[instrument(skip_all, fields(airfoil = %request.airfoil_name, angles = request.angles_of_attack.len()))]
    pub fn compute(&self, request: &SweepRequest) -> PolarResult<PolarResponse> {
        request.validate()?;
        let prepared = script::build(request)?;

        let workspace = ScratchWorkspace::create(&self.config.scratch_prefix)?;
        workspace.write(&prepared.geometry_file, &prepared.geometry)?;

        info!(
            "Running {} at Re={} M={} over {} angle(s)",
            self.runner.binary(),
            request.reynolds_number,
            request.mach_number,
            request.angles_of_attack.len()
        );
        let run = self.runner.run(&prepared.script, workspace.path())?;

        if !run.stdout.is_empty() {
            debug!("Solver stdout:\n{}", run.stdout);
        }
        if !run.stderr.is_empty() {
            debug!("Solver stderr:\n{}", run.stderr);
        }
        if !run.success() {
            warn!(
                "Solver exited with code {}; keeping its output",
                run.exit_code
            );
        }

        let table = normalize(&workspace.file(&prepared.output_file), run.exit_code);

        if self.config.keep_scratch {
            let kept = workspace.persist();
            info!("Scratch workspace kept at {}", kept.display());
        }

        let table = table?;
        info!("Polar computed ({} bytes of CSV)", table.as_str().len());

        Ok(PolarResponse {
            csv: table.into_string(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Stand-in solver used by tests across the crate.

    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;

    use super::super::error::{PolarError, PolarResult};
    use super::super::runner::{SolverRun, SolverRunner};

    /// Writes a canned polar file (or nothing) and reports a fixed exit code.
    pub struct FakeSolver {
        pub polar: Option<String>,
        pub exit_code: i32,
        pub scripts: Mutex<Vec<String>>,
        pub workdirs: Mutex<Vec<std::path::PathBuf>>,
    }

    impl FakeSolver {
        pub fn writing(polar: &str, exit_code: i32) -> Self {
            Self {
                polar: Some(polar.to_string()),
                exit_code,
                scripts: Mutex::new(Vec::new()),
                workdirs: Mutex::new(Vec::new()),
            }
        }

        pub fn silent(exit_code: i32) -> Self {
            Self {
                polar: None,
                exit_code,
                scripts: Mutex::new(Vec::new()),
                workdirs: Mutex::new(Vec::new()),
            }
        }
    }

    impl SolverRunner for FakeSolver {
        fn binary(&self) -> &str {
            "fake-xfoil"
        }

        fn run(&self, script: &str, workdir: &Path) -> PolarResult<SolverRun> {
            self.scripts.lock().unwrap().push(script.to_string());
            self.workdirs.lock().unwrap().push(workdir.to_path_buf());
            if let Some(polar) = &self.polar {
                fs::write(workdir.join("polar.txt"), polar).map_err(PolarError::Io)?;
            }
            Ok(SolverRun {
                exit_code: self.exit_code,
                stdout: "ok".to_string(),
                stderr: String::new(),
            })
        }
    }

    /// A runner whose binary can never be launched.
    pub struct MissingSolver;

    impl SolverRunner for MissingSolver {
        fn binary(&self) -> &str {
            "missing-xfoil"
        }

        fn run(&self, _script: &str, _workdir: &Path) -> PolarResult<SolverRun> {
            Err(PolarError::binary_not_found(
                "missing-xfoil",
                std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            ))
        }
    }
}
