use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Identifies one adjustable input.
///
/// Serialized as its snake_case key; parsed (also from config files) with [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Concentration,
    Absorptivity,
    Intensity,
    Depth,
    Wavelength,
    QuantumYield,
    ProdAbsorbance,
    ProdConcentration,
    ProdPathLength,
    WtConcentration,
    Density,
    MolWeight,
}

/// Slider metadata for a field.
///
/// Domains written as `(0, max]` clamp into `[0, max]`: zero is storable and
/// the model rejects it where it would divide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl FieldSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

const CONCENTRATION: FieldSpec = FieldSpec {
    key: "concentration",
    label: "Absorber concentration",
    unit: "mM",
    min: 0.0,
    max: 1000.0,
    step: 0.1,
    default: 50.0,
};

const ABSORPTIVITY: FieldSpec = FieldSpec {
    key: "absorptivity",
    label: "Napierian absorptivity",
    unit: "L/mol-cm",
    min: 0.0,
    max: 5000.0,
    step: 0.1,
    default: 510.0,
};

const INTENSITY: FieldSpec = FieldSpec {
    key: "intensity",
    label: "Incident intensity",
    unit: "mW/cm\u{00B2}",
    min: 0.0,
    max: 100.0,
    step: 0.01,
    default: 10.0,
};

const DEPTH: FieldSpec = FieldSpec {
    key: "depth",
    label: "Depth",
    unit: "\u{03BC}m",
    min: 15.0,
    max: 2000.0,
    step: 1.0,
    default: 500.0,
};

const WAVELENGTH: FieldSpec = FieldSpec {
    key: "wavelength",
    label: "Wavelength",
    unit: "nm",
    min: 200.0,
    max: 600.0,
    step: 0.1,
    default: 405.0,
};

const QUANTUM_YIELD: FieldSpec = FieldSpec {
    key: "quantum_yield",
    label: "Quantum yield",
    unit: "",
    min: 0.0,
    max: 1.0,
    step: 0.001,
    default: 0.55,
};

const PROD_ABSORBANCE: FieldSpec = FieldSpec {
    key: "prod_absorbance",
    label: "Absorbance",
    unit: "",
    min: 0.0,
    max: 3.0,
    step: 0.001,
    default: 0.5,
};

const PROD_CONCENTRATION: FieldSpec = FieldSpec {
    key: "prod_concentration",
    label: "Concentration absorber",
    unit: "mM",
    min: 0.0,
    max: 500.0,
    step: 0.01,
    default: 2.26,
};

const PROD_PATH_LENGTH: FieldSpec = FieldSpec {
    key: "prod_path_length",
    label: "Path length",
    unit: "cm",
    min: 0.0,
    max: 5.0,
    step: 0.001,
    default: 1.0,
};

const WT_CONCENTRATION: FieldSpec = FieldSpec {
    key: "wt_concentration",
    label: "Concentration absorber",
    unit: "wt%",
    min: 0.0,
    max: 10.0,
    step: 0.001,
    default: 0.1,
};

const DENSITY: FieldSpec = FieldSpec {
    key: "density",
    label: "Density",
    unit: "g/mL",
    min: 0.0,
    max: 2.0,
    step: 0.001,
    default: 0.786,
};

const MOL_WEIGHT: FieldSpec = FieldSpec {
    key: "mol_weight",
    label: "Absorber molecular weight",
    unit: "g/mol",
    min: 0.0,
    max: 1000.0,
    step: 0.01,
    default: 348.37,
};

impl FieldId {
    pub const ALL: [FieldId; 12] = [
        FieldId::Concentration,
        FieldId::Absorptivity,
        FieldId::Intensity,
        FieldId::Depth,
        FieldId::Wavelength,
        FieldId::QuantumYield,
        FieldId::ProdAbsorbance,
        FieldId::ProdConcentration,
        FieldId::ProdPathLength,
        FieldId::WtConcentration,
        FieldId::Density,
        FieldId::MolWeight,
    ];

    pub fn spec(&self) -> &'static FieldSpec {
        match self {
            FieldId::Concentration => &CONCENTRATION,
            FieldId::Absorptivity => &ABSORPTIVITY,
            FieldId::Intensity => &INTENSITY,
            FieldId::Depth => &DEPTH,
            FieldId::Wavelength => &WAVELENGTH,
            FieldId::QuantumYield => &QUANTUM_YIELD,
            FieldId::ProdAbsorbance => &PROD_ABSORBANCE,
            FieldId::ProdConcentration => &PROD_CONCENTRATION,
            FieldId::ProdPathLength => &PROD_PATH_LENGTH,
            FieldId::WtConcentration => &WT_CONCENTRATION,
            FieldId::Density => &DENSITY,
            FieldId::MolWeight => &MOL_WEIGHT,
        }
    }

    pub fn panel(&self) -> Panel {
        match self {
            FieldId::Concentration
            | FieldId::Absorptivity
            | FieldId::Intensity
            | FieldId::Depth => Panel::PlotControls,
            FieldId::Wavelength | FieldId::QuantumYield => Panel::HalfLifeVariables,
            FieldId::ProdAbsorbance | FieldId::ProdConcentration | FieldId::ProdPathLength => {
                Panel::NapierianAbsorptivity
            }
            FieldId::WtConcentration | FieldId::Density | FieldId::MolWeight => {
                Panel::WtToMillimolar
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter field '{0}'")]
pub struct FieldParseError(pub String);

impl FromStr for FieldId {
    type Err = FieldParseError;

    /// Matches the key ignoring case and underscores, so `mol_weight`, `molWeight`
    /// and `MolWeight` are the same field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.trim().chars().filter(|c| *c != '_').collect();
        FieldId::ALL
            .into_iter()
            .find(|field| field.spec().key.replace('_', "").eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| FieldParseError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

impl Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spec().key)
    }
}

/// Groups of sliders shown together, each feeding one block of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    PlotControls,
    HalfLifeVariables,
    NapierianAbsorptivity,
    WtToMillimolar,
}

impl Panel {
    pub const ALL: [Panel; 4] = [
        Panel::PlotControls,
        Panel::HalfLifeVariables,
        Panel::NapierianAbsorptivity,
        Panel::WtToMillimolar,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Panel::PlotControls => "Plot controls",
            Panel::HalfLifeVariables => "Additional variables for half-life",
            Panel::NapierianAbsorptivity => "Napierian absorptivity",
            Panel::WtToMillimolar => "wt% to mM conversion",
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        FieldId::ALL
            .into_iter()
            .filter(move |field| field.panel() == *self)
    }
}

impl Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
