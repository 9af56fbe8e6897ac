//! XFOIL command script generation.
//!
//! XFOIL is driven interactively; a polar sweep is reproduced by feeding the
//! same keystrokes on stdin. The sequence is:
//!
//! ```text
//! LOAD <name>.dat      load coordinates
//! PANE                 re-panel the geometry
//! OPER                 enter operating-point mode
//! VISC <Re>            viscous mode at Reynolds number
//! MACH <M>
//! ITER <n>             convergence iteration cap
//! PACC                 start polar accumulation
//! polar.txt            ...into this file
//!                      (blank: no dump file)
//! ALFA <a>             one per angle, caller order
//! PACC                 stop accumulation
//!                      (blank: back to top level)
//! QUIT
//! ```

use super::error::{PolarError, PolarResult};
use super::request::SweepRequest;

/// File name the solver is told to accumulate the polar into.
pub const POLAR_FILE_NAME: &str = "polar.txt";

/// Everything needed to run one sweep inside a scratch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolarScript {
    /// Scratch-local geometry file name (`{airfoil_name}.dat`).
    pub geometry_file: String,
    /// Geometry payload, written verbatim.
    pub geometry: String,
    /// Command text fed to the solver on stdin.
    pub script: String,
    /// Scratch-local name of the polar file the solver will write.
    pub output_file: String,
}

/// Build the geometry payload and command script for a sweep.
pub fn build(request: &SweepRequest) -> PolarResult<PolarScript> {
    if request.angles_of_attack.is_empty() {
        return Err(PolarError::configuration(
            "at least one angle of attack required",
        ));
    }

    let geometry_file = format!("{}.dat", request.airfoil_name);
    let output_file = POLAR_FILE_NAME.to_string();

    let mut lines = vec![
        format!("LOAD {}", geometry_file),
        "PANE".to_string(),
        "OPER".to_string(),
        format!("VISC {}", number(request.reynolds_number)),
        format!("MACH {}", number(request.mach_number)),
        format!("ITER {}", request.max_iterations),
        "PACC".to_string(),
        output_file.clone(),
        String::new(),
    ];
    lines.extend(
        request
            .angles_of_attack
            .iter()
            .map(|alpha| format!("ALFA {}", number(*alpha))),
    );
    lines.extend(["PACC".to_string(), String::new(), "QUIT".to_string()]);

    let mut script = lines.join("\n");
    script.push('\n');

    Ok(PolarScript {
        geometry_file,
        geometry: request.airfoil_geometry.clone(),
        script,
        output_file,
    })
}

/// Render a float that always carries a decimal point (`0.0`, `1200000.0`).
fn number(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(angles: Vec<f64>) -> SweepRequest {
        SweepRequest::new("demo", "1.0 0.0\n0.5 0.06\n0.0 0.0\n", angles, 1_200_000.0)
    }

    #[test]
    fn test_full_script() {
        let built = build(&request(vec![0.0, 2.5, -4.0])).unwrap();
        let expected = "LOAD demo.dat\n\
                        PANE\n\
                        OPER\n\
                        VISC 1200000.0\n\
                        MACH 0.0\n\
                        ITER 200\n\
                        PACC\n\
                        polar.txt\n\
                        \n\
                        ALFA 0.0\n\
                        ALFA 2.5\n\
                        ALFA -4.0\n\
                        PACC\n\
                        \n\
                        QUIT\n";
        assert_eq!(built.script, expected);
    }

    #[test]
    fn test_file_names_and_geometry() {
        let req = request(vec![1.0]);
        let built = build(&req).unwrap();
        assert_eq!(built.geometry_file, "demo.dat");
        assert_eq!(built.output_file, POLAR_FILE_NAME);
        assert_eq!(built.geometry, req.airfoil_geometry);
    }

    #[test]
    fn test_one_alfa_per_angle_in_order() {
        let angles = vec![8.0, -2.0, 0.5, 8.0, 3.25];
        let built = build(&request(angles.clone())).unwrap();

        let alfas: Vec<f64> = built
            .script
            .lines()
            .filter_map(|line| line.strip_prefix("ALFA "))
            .map(|value| value.parse().unwrap())
            .collect();
        assert_eq!(alfas, angles);
    }

    #[test]
    fn test_ends_with_quit() {
        for angles in [vec![0.0], vec![-5.0, 0.0, 5.0, 10.0]] {
            let built = build(&request(angles)).unwrap();
            assert!(built.script.ends_with("QUIT\n"));
            assert_eq!(built.script.lines().last(), Some("QUIT"));
        }
    }

    #[test]
    fn test_operating_point_values() {
        let mut req = request(vec![0.0]);
        req.mach_number = 0.3;
        req.max_iterations = 500;
        req.reynolds_number = 250_000.0;
        let built = build(&req).unwrap();
        assert!(built.script.contains("VISC 250000.0\n"));
        assert!(built.script.contains("MACH 0.3\n"));
        assert!(built.script.contains("ITER 500\n"));
    }

    #[test]
    fn test_empty_angles_is_configuration_error() {
        let err = build(&request(vec![])).unwrap_err();
        assert!(matches!(err, PolarError::Configuration(_)));
        assert!(err.to_string().contains("at least one angle of attack"));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(0.0), "0.0");
        assert_eq!(number(-3.5), "-3.5");
        assert_eq!(number(1_200_000.0), "1200000.0");
    }
}
