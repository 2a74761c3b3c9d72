//! Beer-Lambert attenuation model
//!
//! Closed-form expressions for light attenuation through a single absorber, the
//! photoinitiator half-life it implies, and the two unit conversions used to obtain the
//! model inputs. All functions are pure and take a [`ParameterState`] snapshot.
//!
//! ## Attenuation
//!
//! With `x` in um, concentration `c` in mM and Napierian absorptivity `e` in
//! L mol^-1 cm^-1:
//!
//! ```text
//! I(x) = I0 * exp(-e * c / 1e7 * x)
//! ```
//!
//! The depth at which a fraction `p` of the incident light is still transmitted is
//! `-1e7 / (e * c) * ln(p)`.
//!
//! ## Half-life
//!
//! First-order photodecomposition of the initiator under the local intensity:
//!
//! ```text
//! t1/2 = ln 2 / (1000 * qy * e * (I / (119624 / wavelength) / 1e6))
//! ```
//!
//! Every expression that divides by a user-controlled quantity reports
//! [`ModelError::DivisionByZero`] instead of returning an infinite or NaN value.

pub mod constants;
pub mod curve;

pub use curve::{Curve, CurveIter, Probe};

use crate::format::format_sig_fig;
use crate::params::ParameterState;
use constants::*;
use serde::Serialize;
use std::f64::consts::{LN_2, LN_10};

/// Curve resolution used when the renderer does not ask for one.
pub const DEFAULT_SAMPLES: usize = 400;

/// Quantity that was zero where an expression divides by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Divisor {
    AttenuationCoefficient,
    QuantumYield,
    Absorptivity,
    LocalIntensity,
    ProdConcentration,
    ProdPathLength,
    MolWeight,
}

impl Divisor {
    /// User-facing replacement for the numeric result.
    pub fn message(&self) -> &'static str {
        match self {
            Divisor::AttenuationCoefficient => {
                "Absorber concentration and absorptivity cannot be zero"
            }
            Divisor::QuantumYield => "Quantum yield cannot be zero",
            Divisor::Absorptivity => "Absorptivity cannot be zero",
            Divisor::LocalIntensity => "Intensity at this depth cannot be zero",
            Divisor::ProdConcentration => "Concentration cannot be zero",
            Divisor::ProdPathLength => "Path length cannot be zero",
            Divisor::MolWeight => "Molecular weight cannot be zero",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("{}", .0.message())]
    DivisionByZero(Divisor),
}

/// Depths [um] at which 90% and 80% of the incident intensity is transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttenuationDepths {
    pub depth_90: f64,
    pub depth_80: f64,
}

/// Vertical line drawn on the plot at an attenuation depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttenuationMarker {
    pub label: &'static str,
    pub transmittance: f64,
    pub depth: f64,
}

impl AttenuationMarker {
    pub fn is_visible(&self, plotted_depth: f64) -> bool {
        (0.0..=plotted_depth).contains(&self.depth)
    }
}

impl AttenuationDepths {
    pub fn markers(&self) -> [AttenuationMarker; 2] {
        [
            AttenuationMarker {
                label: "90%",
                transmittance: TRANSMITTANCE_90,
                depth: self.depth_90,
            },
            AttenuationMarker {
                label: "80%",
                transmittance: TRANSMITTANCE_80,
                depth: self.depth_80,
            },
        ]
    }
}

/// Everything recomputed after a parameter change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outputs {
    pub curve: Curve,
    pub depths: Result<AttenuationDepths, ModelError>,
    pub half_life_surface: Result<f64, ModelError>, // [s]
    pub half_life_max_depth: Result<f64, ModelError>, // [s]
    pub napierian_absorptivity: Result<f64, ModelError>, // [L mol^-1 cm^-1]
    pub wt_to_millimolar: Result<f64, ModelError>,  // [mM]
}

/// Intensity [mW/cm^2] at depth `x` [um].
///
/// `x` is not clamped; the expression is defined for any real `x` but is only
/// meaningful within `[0, state.depth]`.
pub fn intensity_at(x: f64, state: &ParameterState) -> f64 {
    state.intensity * (-state.absorptivity * state.concentration / ATTENUATION_SCALE * x).exp()
}

/// Depth [um] where `transmittance` of the incident light remains.
pub fn attenuation_depth(state: &ParameterState, transmittance: f64) -> Result<f64, ModelError> {
    let product = state.absorptivity * state.concentration;
    if product == 0.0 {
        return Err(ModelError::DivisionByZero(Divisor::AttenuationCoefficient));
    }
    Ok(-ATTENUATION_SCALE / product * transmittance.ln())
}

pub fn attenuation_depths(state: &ParameterState) -> Result<AttenuationDepths, ModelError> {
    Ok(AttenuationDepths {
        depth_90: attenuation_depth(state, TRANSMITTANCE_90)?,
        depth_80: attenuation_depth(state, TRANSMITTANCE_80)?,
    })
}

/// Initiator half-life [s] at depth `at_depth` [um].
pub fn half_life(state: &ParameterState, at_depth: f64) -> Result<f64, ModelError> {
    if state.quantum_yield == 0.0 {
        return Err(ModelError::DivisionByZero(Divisor::QuantumYield));
    }
    if state.absorptivity == 0.0 {
        return Err(ModelError::DivisionByZero(Divisor::Absorptivity));
    }

    let local = intensity_at(at_depth, state);
    if local == 0.0 {
        return Err(ModelError::DivisionByZero(Divisor::LocalIntensity));
    }

    let photon_flux = local / (PHOTON_ENERGY_FACTOR / state.wavelength) / FLUX_SCALE;
    let seconds = LN_2 / (RATE_SCALE * state.quantum_yield * state.absorptivity * photon_flux);

    // A vanishingly small local intensity can still overflow the quotient.
    if !seconds.is_finite() {
        return Err(ModelError::DivisionByZero(Divisor::LocalIntensity));
    }
    Ok(seconds)
}

pub fn half_life_surface(state: &ParameterState) -> Result<f64, ModelError> {
    half_life(state, 0.0)
}

pub fn half_life_max_depth(state: &ParameterState) -> Result<f64, ModelError> {
    half_life(state, state.depth)
}

/// Napierian absorptivity [L mol^-1 cm^-1] from a measured (decadic) absorbance.
pub fn napierian_absorptivity(state: &ParameterState) -> Result<f64, ModelError> {
    if state.prod_concentration == 0.0 {
        return Err(ModelError::DivisionByZero(Divisor::ProdConcentration));
    }
    if state.prod_path_length == 0.0 {
        return Err(ModelError::DivisionByZero(Divisor::ProdPathLength));
    }
    Ok(LN_10 * state.prod_absorbance / state.prod_path_length / state.prod_concentration
        * MILLIMOLAR_SCALE)
}

/// Concentration [mM] from a weight fraction [wt%].
pub fn wt_percent_to_millimolar(state: &ParameterState) -> Result<f64, ModelError> {
    if state.mol_weight == 0.0 {
        return Err(ModelError::DivisionByZero(Divisor::MolWeight));
    }
    Ok(state.wt_concentration * state.density / state.mol_weight * WT_PERCENT_SCALE)
}

/// The plotted expression with its current coefficients.
pub fn equation_label(state: &ParameterState) -> String {
    format!(
        "{} * e^(-1 * {} * {} / 10^7 * x)",
        format_sig_fig(state.intensity, 3),
        format_sig_fig(state.absorptivity, 3),
        format_sig_fig(state.concentration, 3)
    )
}

pub fn compute_outputs(state: &ParameterState, samples: usize) -> Outputs {
    Outputs {
        curve: Curve::new(state, samples),
        depths: attenuation_depths(state),
        half_life_surface: half_life_surface(state),
        half_life_max_depth: half_life_max_depth(state),
        napierian_absorptivity: napierian_absorptivity(state),
        wt_to_millimolar: wt_percent_to_millimolar(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_duration;
    use crate::params::FieldId;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "Expected ~{}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_intensity_at_surface_is_incident() {
        let mut state = ParameterState::new();
        assert_eq!(intensity_at(0.0, &state), state.intensity);

        for (field, raw) in [
            (FieldId::Concentration, "1000"),
            (FieldId::Absorptivity, "5000"),
            (FieldId::Intensity, "73.21"),
        ] {
            state.commit(field, raw).unwrap();
            assert_eq!(intensity_at(0.0, &state), state.intensity);
        }
    }

    #[test]
    fn test_intensity_decreases_with_depth() {
        let state = ParameterState::new();
        assert_close(intensity_at(state.depth, &state), 2.7943, 1e-4);

        let boundary_states: [&[(FieldId, &str)]; 5] = [
            &[],
            &[(FieldId::Concentration, "1000"), (FieldId::Absorptivity, "5000")],
            &[(FieldId::Depth, "15")],
            &[(FieldId::Depth, "2000"), (FieldId::Intensity, "100")],
            &[(FieldId::Concentration, "0")],
        ];

        for edits in boundary_states {
            let mut state = ParameterState::new();
            for (field, raw) in edits {
                state.commit(*field, raw).unwrap();
            }

            let mut previous = intensity_at(0.0, &state);
            assert_eq!(previous, state.intensity);
            for step in 1..=50 {
                let x = state.depth * step as f64 / 50.0;
                let current = intensity_at(x, &state);
                assert!(
                    current <= previous,
                    "intensity rose from {} to {} at x = {} for {:?}",
                    previous,
                    current,
                    x,
                    edits
                );
                previous = current;
            }
            assert!(intensity_at(state.depth, &state) <= state.intensity);
        }
    }

    #[test]
    fn test_half_life_deep_absorber_keeps_sig_figs() {
        let mut state = ParameterState::new();
        state.commit(FieldId::Concentration, "1000").unwrap();
        state.commit(FieldId::Absorptivity, "5000").unwrap();
        state.commit(FieldId::Depth, "200").unwrap();

        let seconds = half_life_max_depth(&state).unwrap();
        assert_close(seconds / 2.0012634080920173e44, 1.0, 1e-9);
        assert_eq!(
            format_duration(seconds, 3),
            format!("232{} days", "0".repeat(37))
        );
    }

    #[test]
    fn test_attenuation_depths_defaults() {
        let depths = attenuation_depths(&ParameterState::new()).unwrap();
        assert_close(depths.depth_90, 41.3178, 1e-3);
        assert_close(depths.depth_80, 87.5073, 1e-3);
        assert_eq!(format_sig_fig(depths.depth_90, 3), "41.3");
        assert_eq!(format_sig_fig(depths.depth_80, 3), "87.5");
    }

    #[test]
    fn test_attenuation_depths_transmit_expected_fraction() {
        let state = ParameterState::new();
        let depths = attenuation_depths(&state).unwrap();
        assert_close(
            intensity_at(depths.depth_90, &state) / state.intensity,
            0.9,
            1e-12,
        );
        assert_close(
            intensity_at(depths.depth_80, &state) / state.intensity,
            0.8,
            1e-12,
        );
    }

    #[test]
    fn test_attenuation_depths_zero_concentration() {
        let mut state = ParameterState::new();
        state.commit(FieldId::Concentration, "0").unwrap();
        assert_eq!(
            attenuation_depths(&state),
            Err(ModelError::DivisionByZero(Divisor::AttenuationCoefficient))
        );
    }

    #[test]
    fn test_half_life_defaults() {
        let state = ParameterState::new();
        assert_close(half_life_surface(&state).unwrap(), 72.9887, 1e-3);
        assert_close(half_life_max_depth(&state).unwrap(), 261.2049, 1e-3);
        assert_eq!(half_life(&state, 0.0), half_life_surface(&state));
    }

    #[test]
    fn test_half_life_division_by_zero() {
        let mut state = ParameterState::new();
        state.commit(FieldId::QuantumYield, "0").unwrap();
        assert_eq!(
            half_life_surface(&state),
            Err(ModelError::DivisionByZero(Divisor::QuantumYield))
        );

        let mut state = ParameterState::new();
        state.commit(FieldId::Absorptivity, "0").unwrap();
        assert_eq!(
            half_life_surface(&state),
            Err(ModelError::DivisionByZero(Divisor::Absorptivity))
        );

        let mut state = ParameterState::new();
        state.commit(FieldId::Intensity, "0").unwrap();
        assert_eq!(
            half_life_max_depth(&state),
            Err(ModelError::DivisionByZero(Divisor::LocalIntensity))
        );
    }

    #[test]
    fn test_half_life_underflow_at_depth() {
        let mut state = ParameterState::new();
        state.commit(FieldId::Concentration, "1000").unwrap();
        state.commit(FieldId::Absorptivity, "5000").unwrap();
        state.commit(FieldId::Depth, "2000").unwrap();

        assert!(half_life_surface(&state).is_ok());
        assert_eq!(
            half_life_max_depth(&state),
            Err(ModelError::DivisionByZero(Divisor::LocalIntensity))
        );
    }

    #[test]
    fn test_napierian_absorptivity_defaults() {
        let value = napierian_absorptivity(&ParameterState::new()).unwrap();
        assert_close(value, 509.42, 0.01);
        assert!((value - 510.0).abs() < 1.0);
    }

    #[test]
    fn test_napierian_absorptivity_zero_concentration() {
        let mut state = ParameterState::new();
        state.commit(FieldId::ProdConcentration, "0").unwrap();
        let result = napierian_absorptivity(&state);
        assert_eq!(
            result,
            Err(ModelError::DivisionByZero(Divisor::ProdConcentration))
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Concentration cannot be zero"
        );
    }

    #[test]
    fn test_napierian_absorptivity_zero_path_length() {
        let mut state = ParameterState::new();
        state.commit(FieldId::ProdPathLength, "0").unwrap();
        assert_eq!(
            napierian_absorptivity(&state),
            Err(ModelError::DivisionByZero(Divisor::ProdPathLength))
        );
    }

    #[test]
    fn test_wt_percent_to_millimolar() {
        let state = ParameterState::new();
        let value = wt_percent_to_millimolar(&state).unwrap();
        assert_close(value, 2.2562, 1e-4);
        assert_eq!(format_sig_fig(value, 3), "2.26");

        let mut state = state;
        state.commit(FieldId::MolWeight, "0").unwrap();
        let err = wt_percent_to_millimolar(&state).unwrap_err();
        assert_eq!(err.to_string(), "Molecular weight cannot be zero");
    }

    #[test]
    fn test_markers() {
        let state = ParameterState::new();
        let markers = attenuation_depths(&state).unwrap().markers();
        assert_eq!(markers[0].label, "90%");
        assert_eq!(markers[1].label, "80%");
        assert!(markers.iter().all(|m| m.is_visible(state.depth)));
        assert!(!markers[1].is_visible(50.0));
    }

    #[test]
    fn test_equation_label() {
        assert_eq!(
            equation_label(&ParameterState::new()),
            "10 * e^(-1 * 510 * 50 / 10^7 * x)"
        );
    }

    #[test]
    fn test_compute_outputs() {
        let state = ParameterState::new();
        let outputs = compute_outputs(&state, 200);
        assert_eq!(outputs.curve.len(), 201);
        assert_eq!(outputs.depths, attenuation_depths(&state));
        assert_eq!(outputs.half_life_surface, half_life_surface(&state));
        assert_eq!(outputs.half_life_max_depth, half_life_max_depth(&state));
        assert_eq!(outputs.napierian_absorptivity, napierian_absorptivity(&state));
        assert_eq!(outputs.wt_to_millimolar, wt_percent_to_millimolar(&state));
    }
}
