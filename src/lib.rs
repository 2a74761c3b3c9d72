//! Beer-Lambert light attenuation calculator for photopolymerization.
//!
//! [`params::ParameterState`] holds the user-adjustable inputs, [`model`] evaluates the
//! attenuation curve, attenuation depths, initiator half-lives and unit conversions, and
//! [`session::Session`] ties the two together for a UI that pushes edits and pulls
//! results.

pub mod config;
pub mod format;
pub mod model;
pub mod params;
pub mod report;
pub mod session;
