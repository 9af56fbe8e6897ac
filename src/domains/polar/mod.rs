//! Polar domain module.
//!
//! Everything needed to turn a sweep request into a canonical CSV polar by
//! driving the external XFOIL solver.
//!
//! ## Pipeline
//!
//! 1. `request.rs` - validate the [`SweepRequest`]
//! 2. `script.rs` - build the geometry file and the XFOIL command script
//! 3. `workspace.rs` - allocate a fresh scratch directory
//! 4. `runner.rs` - run the solver with the script on stdin
//! 5. `normalize.rs` - read `polar.txt` and produce the canonical table
//!
//! `service.rs` strings these together; tools and HTTP handlers only talk to
//! [`PolarService`].

mod error;
pub mod normalize;
mod request;
mod runner;
pub mod script;
mod service;
mod workspace;

pub use error::{PolarError, PolarResult};
pub use normalize::{CANONICAL_HEADER, PolarTable, normalize};
pub use request::{MAX_ITERATIONS, MIN_ITERATIONS, PolarResponse, SweepRequest};
pub use runner::{SolverRun, SolverRunner, XfoilRunner};
pub use script::{POLAR_FILE_NAME, PolarScript, build};
pub use service::PolarService;
pub use workspace::ScratchWorkspace;

#[cfg(test)]
pub(crate) use service::testing;
