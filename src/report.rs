//! Text and JSON rendering of a computed output set.
//!
//! A quantity whose expression hit a zero divisor carries the user-facing message in
//! place of a number, so no NaN or infinity ever reaches the output.

use serde::Serialize;
use std::fmt::{self, Display};

use crate::format::{format_duration, format_sig_fig};
use crate::model::{Curve, ModelError, Outputs, equation_label};
use crate::params::{Panel, ParameterState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub value: Option<f64>,
    pub text: String,
    pub error: Option<String>,
}

impl Quantity {
    fn new(result: Result<f64, ModelError>, render: impl Fn(f64) -> String) -> Self {
        match result {
            Ok(value) => Quantity {
                value: Some(value),
                text: render(value),
                error: None,
            },
            Err(e) => Quantity {
                value: None,
                text: e.to_string(),
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterLine {
    pub panel: &'static str,
    pub field: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub depth: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub parameters: Vec<ParameterLine>,
    pub equation: String,
    pub depth_90: Quantity,
    pub depth_80: Quantity,
    pub half_life_surface: Quantity,
    pub half_life_max_depth: Quantity,
    pub napierian_absorptivity: Quantity,
    pub wt_to_millimolar: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<Vec<CurvePoint>>,
}

fn with_unit(text: String, unit: &str) -> String {
    if unit.is_empty() {
        text
    } else {
        format!("{} {}", text, unit)
    }
}

impl Report {
    pub fn from_outputs(state: &ParameterState, outputs: &Outputs, sig: usize) -> Self {
        let parameters = Panel::ALL
            .iter()
            .flat_map(|panel| panel.fields())
            .map(|field| {
                let spec = field.spec();
                let value = state.get(field);
                ParameterLine {
                    panel: field.panel().title(),
                    field: spec.key,
                    label: spec.label,
                    value,
                    text: with_unit(format_sig_fig(value, sig), spec.unit),
                }
            })
            .collect();

        let micrometres = |v: f64| with_unit(format_sig_fig(v, sig), "\u{03BC}m");
        let duration = |v: f64| format_duration(v, sig);

        Report {
            parameters,
            equation: equation_label(state),
            depth_90: Quantity::new(outputs.depths.map(|d| d.depth_90), micrometres),
            depth_80: Quantity::new(outputs.depths.map(|d| d.depth_80), micrometres),
            half_life_surface: Quantity::new(outputs.half_life_surface, duration),
            half_life_max_depth: Quantity::new(outputs.half_life_max_depth, duration),
            napierian_absorptivity: Quantity::new(outputs.napierian_absorptivity, |v| {
                with_unit(format_sig_fig(v, sig), "L/mol-cm")
            }),
            wt_to_millimolar: Quantity::new(outputs.wt_to_millimolar, |v| {
                with_unit(format_sig_fig(v, sig), "mM")
            }),
            curve: None,
        }
    }

    /// Attaches the sampled curve points.
    pub fn with_curve(mut self, curve: &Curve) -> Self {
        self.curve = Some(
            curve
                .iter()
                .map(|(depth, intensity)| CurvePoint { depth, intensity })
                .collect(),
        );
        self
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_panel = "";
        for line in &self.parameters {
            if line.panel != current_panel {
                writeln!(f, "{}", line.panel)?;
                current_panel = line.panel;
            }
            writeln!(f, "  {}: {}", line.label, line.text)?;
        }

        writeln!(f, "Attenuation due to one absorber")?;
        writeln!(f, "  I(x) = {}", self.equation)?;
        writeln!(f, "  90% depth: {}", self.depth_90.text)?;
        writeln!(f, "  80% depth: {}", self.depth_80.text)?;

        writeln!(f, "Initiator half-life")?;
        writeln!(f, "  @ exposed surface: {}", self.half_life_surface.text)?;
        writeln!(f, "  @ maximum depth: {}", self.half_life_max_depth.text)?;

        writeln!(f, "Napierian absorptivity")?;
        writeln!(f, "  {}", self.napierian_absorptivity.text)?;

        writeln!(f, "wt% to mM conversion")?;
        write!(f, "  Concentration: {}", self.wt_to_millimolar.text)?;

        if let Some(points) = &self.curve {
            writeln!(f)?;
            writeln!(f, "Depth (\u{03BC}m), Intensity (mW/cm\u{00B2})")?;
            for (i, point) in points.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "{:.3}, {:.6}", point.depth, point.intensity)?;
            }
        }

        Ok(())
    }
}
