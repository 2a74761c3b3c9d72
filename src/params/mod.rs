//! Adjustable inputs of the attenuation model
//!
//! A single [`ParameterState`] holds the six physical inputs plus the inputs of the two
//! conversion panels. Every write goes through a setter that clamps into the field's
//! bounds, so a stored value is never out of range, NaN or infinite.

pub mod field;
pub mod input;

pub use field::{FieldId, FieldParseError, FieldSpec, Panel};
pub use input::{UpdateMode, parse_decimal};

use crate::format::format_sig_fig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("'{raw}' is not a valid decimal number for {field}")]
    InvalidNumber { field: FieldId, raw: String },
}

/// Current value of every input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterState {
    pub concentration: f64,      // Absorber concentration [mM]
    pub absorptivity: f64,       // Napierian molar absorptivity [L mol^-1 cm^-1]
    pub intensity: f64,          // Incident intensity [mW/cm^2]
    pub depth: f64,              // Path depth [um]
    pub wavelength: f64,         // Illumination wavelength [nm]
    pub quantum_yield: f64,      // Photoreaction quantum yield [-]
    pub prod_absorbance: f64,    // Measured absorbance [-]
    pub prod_concentration: f64, // Concentration in the cuvette [mM]
    pub prod_path_length: f64,   // Cuvette path length [cm]
    pub wt_concentration: f64,   // Concentration [wt%]
    pub density: f64,            // Density [g/mL]
    pub mol_weight: f64,         // Molecular weight [g/mol]
}

impl Default for ParameterState {
    fn default() -> Self {
        Self {
            concentration: FieldId::Concentration.spec().default,
            absorptivity: FieldId::Absorptivity.spec().default,
            intensity: FieldId::Intensity.spec().default,
            depth: FieldId::Depth.spec().default,
            wavelength: FieldId::Wavelength.spec().default,
            quantum_yield: FieldId::QuantumYield.spec().default,
            prod_absorbance: FieldId::ProdAbsorbance.spec().default,
            prod_concentration: FieldId::ProdConcentration.spec().default,
            prod_path_length: FieldId::ProdPathLength.spec().default,
            wt_concentration: FieldId::WtConcentration.spec().default,
            density: FieldId::Density.spec().default,
            mol_weight: FieldId::MolWeight.spec().default,
        }
    }
}

impl ParameterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> f64 {
        match field {
            FieldId::Concentration => self.concentration,
            FieldId::Absorptivity => self.absorptivity,
            FieldId::Intensity => self.intensity,
            FieldId::Depth => self.depth,
            FieldId::Wavelength => self.wavelength,
            FieldId::QuantumYield => self.quantum_yield,
            FieldId::ProdAbsorbance => self.prod_absorbance,
            FieldId::ProdConcentration => self.prod_concentration,
            FieldId::ProdPathLength => self.prod_path_length,
            FieldId::WtConcentration => self.wt_concentration,
            FieldId::Density => self.density,
            FieldId::MolWeight => self.mol_weight,
        }
    }

    fn slot(&mut self, field: FieldId) -> &mut f64 {
        match field {
            FieldId::Concentration => &mut self.concentration,
            FieldId::Absorptivity => &mut self.absorptivity,
            FieldId::Intensity => &mut self.intensity,
            FieldId::Depth => &mut self.depth,
            FieldId::Wavelength => &mut self.wavelength,
            FieldId::QuantumYield => &mut self.quantum_yield,
            FieldId::ProdAbsorbance => &mut self.prod_absorbance,
            FieldId::ProdConcentration => &mut self.prod_concentration,
            FieldId::ProdPathLength => &mut self.prod_path_length,
            FieldId::WtConcentration => &mut self.wt_concentration,
            FieldId::Density => &mut self.density,
            FieldId::MolWeight => &mut self.mol_weight,
        }
    }

    fn store(&mut self, field: FieldId, value: f64) -> f64 {
        let clamped = field.spec().clamp(value);
        *self.slot(field) = clamped;
        clamped
    }

    /// Slider path: stores a numeric value, clamped into the field's bounds.
    pub fn set_value(&mut self, field: FieldId, value: f64) -> Result<f64, ParameterError> {
        if value.is_nan() {
            return Err(ParameterError::InvalidNumber {
                field,
                raw: value.to_string(),
            });
        }
        Ok(self.store(field, value))
    }

    /// Live edit while the user is still typing.
    ///
    /// Text that is not (yet) a decimal number is ignored and `None` is returned;
    /// the stored value stays as it was.
    pub fn preview(&mut self, field: FieldId, raw: &str) -> Option<f64> {
        parse_decimal(raw).map(|value| self.store(field, value))
    }

    /// Confirmed edit: the text must be a decimal number, which is clamped and stored.
    pub fn commit(&mut self, field: FieldId, raw: &str) -> Result<f64, ParameterError> {
        let value = parse_decimal(raw).ok_or_else(|| ParameterError::InvalidNumber {
            field,
            raw: raw.to_string(),
        })?;
        Ok(self.store(field, value))
    }

    /// Applies `raw` with the given mode. `Ok(None)` means a preview that changed nothing.
    pub fn set(
        &mut self,
        field: FieldId,
        raw: &str,
        mode: UpdateMode,
    ) -> Result<Option<f64>, ParameterError> {
        match mode {
            UpdateMode::Preview => Ok(self.preview(field, raw)),
            UpdateMode::Commit => self.commit(field, raw).map(Some),
        }
    }

    /// Moves a field by `steps` slider increments, clamped.
    pub fn step(&mut self, field: FieldId, steps: i32) -> f64 {
        let spec = field.spec();
        let value = self.get(field) + steps as f64 * spec.step;
        self.store(field, value)
    }

    /// Text shown in a field's input box after a commit.
    pub fn display_text(&self, field: FieldId) -> String {
        format_sig_fig(self.get(field), 3)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
