//! Sweep request and response payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::{PolarError, PolarResult};

/// Accepted range for the solver iteration cap.
pub const MIN_ITERATIONS: u32 = 10;
pub const MAX_ITERATIONS: u32 = 10_000;

/// Parameters required to run an XFOIL polar sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SweepRequest {
    /// Identifier used when writing temporary files (letters, digits, '_', '-', '.').
    pub airfoil_name: String,

    /// Airfoil coordinate data in XFOIL DAT format (x y pairs, one per line).
    #[serde(alias = "airfoil_data")]
    pub airfoil_geometry: String,

    /// Angles of attack to analyse, in degrees. Evaluated in the given order.
    #[serde(alias = "alphas")]
    pub angles_of_attack: Vec<f64>,

    /// Reynolds number (must be positive).
    #[serde(alias = "reynolds")]
    pub reynolds_number: f64,

    /// Mach number (default: 0).
    #[serde(default, alias = "mach")]
    pub mach_number: f64,

    /// Maximum solver iterations (default: 200, range 10-10000).
    #[serde(default = "default_max_iterations", alias = "iterations")]
    pub max_iterations: u32,
}

fn default_max_iterations() -> u32 {
    200
}

impl SweepRequest {
    /// Create a request with default Mach number and iteration cap.
    pub fn new(
        airfoil_name: impl Into<String>,
        airfoil_geometry: impl Into<String>,
        angles_of_attack: Vec<f64>,
        reynolds_number: f64,
    ) -> Self {
        Self {
            airfoil_name: airfoil_name.into(),
            airfoil_geometry: airfoil_geometry.into(),
            angles_of_attack,
            reynolds_number,
            mach_number: 0.0,
            max_iterations: default_max_iterations(),
        }
    }

    /// Check field ranges.
    ///
    /// An empty angle list passes here; the script builder rejects it as a
    /// configuration error.
    pub fn validate(&self) -> PolarResult<()> {
        validate_airfoil_name(&self.airfoil_name)?;

        if !self.reynolds_number.is_finite() || self.reynolds_number <= 0.0 {
            return Err(PolarError::invalid_request(format!(
                "reynolds_number must be a positive number, got {}",
                self.reynolds_number
            )));
        }

        if !self.mach_number.is_finite() || self.mach_number < 0.0 {
            return Err(PolarError::invalid_request(format!(
                "mach_number must be zero or positive, got {}",
                self.mach_number
            )));
        }

        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.max_iterations) {
            return Err(PolarError::invalid_request(format!(
                "max_iterations must be between {} and {}, got {}",
                MIN_ITERATIONS, MAX_ITERATIONS, self.max_iterations
            )));
        }

        if let Some(alpha) = self.angles_of_attack.iter().find(|a| !a.is_finite()) {
            return Err(PolarError::invalid_request(format!(
                "angles_of_attack must be finite, got {}",
                alpha
            )));
        }

        Ok(())
    }
}

/// The name becomes `{name}.dat` inside the scratch directory.
fn validate_airfoil_name(name: &str) -> PolarResult<()> {
    if name.is_empty() {
        return Err(PolarError::invalid_request("airfoil_name must not be empty"));
    }

    if name.starts_with('.') {
        return Err(PolarError::invalid_request(format!(
            "airfoil_name must not start with '.': {}",
            name
        )));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(PolarError::invalid_request(format!(
            "airfoil_name contains unsupported character {:?}: {}",
            bad, name
        )));
    }

    Ok(())
}

/// CSV payload returned by a polar computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolarResponse {
    /// CSV text containing XFOIL polar data (header `alpha,CL,CD,CM`).
    pub csv: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> SweepRequest {
        SweepRequest::new("demo", "1.0 0.0\n0.0 0.0\n", vec![0.0, 2.0], 1_200_000.0)
    }

    #[test]
    fn test_defaults_applied() {
        let json = r#"{
            "airfoil_name": "naca0012",
            "airfoil_geometry": "1.0 0.0",
            "angles_of_attack": [0.0, 4.0],
            "reynolds_number": 1000000
        }"#;
        let request: SweepRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.mach_number, 0.0);
        assert_eq!(request.max_iterations, 200);
        assert_eq!(request.angles_of_attack, vec![0.0, 4.0]);
    }

    #[test]
    fn test_legacy_field_names_accepted() {
        let json = r#"{
            "airfoil_name": "demo",
            "airfoil_data": "demo airfoil",
            "alphas": [0.0],
            "reynolds": 1200000,
            "mach": 0.1,
            "iterations": 150
        }"#;
        let request: SweepRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.airfoil_geometry, "demo airfoil");
        assert_eq!(request.reynolds_number, 1_200_000.0);
        assert_eq!(request.mach_number, 0.1);
        assert_eq!(request.max_iterations, 150);
    }

    #[test]
    fn test_valid_request() {
        assert!(demo().validate().is_ok());
    }

    #[test]
    fn test_empty_angles_pass_validation() {
        let mut request = demo();
        request.angles_of_attack.clear();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reynolds_must_be_positive() {
        let mut request = demo();
        request.reynolds_number = 0.0;
        assert!(matches!(
            request.validate(),
            Err(PolarError::InvalidRequest(_))
        ));

        request.reynolds_number = f64::NAN;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_mach_must_not_be_negative() {
        let mut request = demo();
        request.mach_number = -0.1;
        assert!(matches!(
            request.validate(),
            Err(PolarError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_iteration_bounds() {
        let mut request = demo();
        request.max_iterations = 9;
        assert!(request.validate().is_err());
        request.max_iterations = 10;
        assert!(request.validate().is_ok());
        request.max_iterations = 10_000;
        assert!(request.validate().is_ok());
        request.max_iterations = 10_001;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let mut request = demo();
        request.angles_of_attack.push(f64::INFINITY);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_airfoil_name_must_be_filesystem_safe() {
        for bad in ["", "../etc/passwd", "a/b", ".hidden", "naca 0012", "foil\0"] {
            let mut request = demo();
            request.airfoil_name = bad.to_string();
            assert!(request.validate().is_err(), "accepted {:?}", bad);
        }

        for good in ["naca0012", "NACA-2412", "e387_v2", "clark.y"] {
            let mut request = demo();
            request.airfoil_name = good.to_string();
            assert!(request.validate().is_ok(), "rejected {:?}", good);
        }
    }
}
