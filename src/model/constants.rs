//! Numerical constants of the attenuation model
//!
//! Scale factors reconcile the units the sliders use (mM, L mol^-1 cm^-1, um, nm,
//! mW/cm^2) with the closed-form Beer-Lambert expressions.

/// Combined mM -> mol/L and um -> cm scaling in the attenuation exponent.
/// exp(-absorptivity * concentration / ATTENUATION_SCALE * x) with x in um.
pub const ATTENUATION_SCALE: f64 = 1e7;

/// Photon energy calibration factor used to turn mW/cm^2 at a wavelength (nm) into a
/// photon flux. Kept as given; it is not derived here.
pub const PHOTON_ENERGY_FACTOR: f64 = 119624.0;

/// Scale applied to quantum yield times absorptivity in the half-life rate.
pub const RATE_SCALE: f64 = 1000.0;

/// Photon flux scale in the half-life rate.
pub const FLUX_SCALE: f64 = 1e6;

/// mol -> mmol, used by the absorbance conversion.
pub const MILLIMOLAR_SCALE: f64 = 1e3;

/// wt% * g/mL / (g/mol) -> mM.
pub const WT_PERCENT_SCALE: f64 = 1e4;

/// Transmitted fractions marked on the attenuation plot.
pub const TRANSMITTANCE_90: f64 = 0.9;
pub const TRANSMITTANCE_80: f64 = 0.8;
