//! Owns the parameter state for the lifetime of a UI session and keeps the output set in
//! step with it. The UI pushes edits in and pulls [`Outputs`] back out; nothing here calls
//! into the UI.

use log::{debug, warn};

use crate::model::{self, DEFAULT_SAMPLES, Outputs};
use crate::params::{FieldId, ParameterError, ParameterState, UpdateMode};

/// Result of one edit, as the input widget needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOutcome {
    pub field: FieldId,
    pub value: f64,               // Stored value after the edit
    pub display: Option<String>,  // Text to put back in the input box (commits only)
    pub error: Option<ParameterError>,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: ParameterState,
    samples: usize,
    outputs: Outputs,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES)
    }
}

impl Session {
    /// `samples` is the curve resolution requested by the renderer.
    pub fn new(samples: usize) -> Self {
        let state = ParameterState::new();
        Self {
            state,
            samples,
            outputs: model::compute_outputs(&state, samples),
        }
    }

    /// Applies a text edit to one field and recomputes every output.
    ///
    /// Previews that are not yet a number leave the state untouched and produce no
    /// error. A commit that is not a number reports `InvalidNumber` and redisplays the
    /// previous value.
    pub fn on_parameter_change(&mut self, field: FieldId, raw: &str, mode: UpdateMode) -> SetOutcome {
        let result = self.state.set(field, raw, mode);
        self.recompute();

        let error = match result {
            Ok(Some(value)) => {
                debug!("{} set to {} ({:?})", field, value, mode);
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("{}", e);
                Some(e)
            }
        };

        SetOutcome {
            field,
            value: self.state.get(field),
            display: (mode == UpdateMode::Commit).then(|| self.state.display_text(field)),
            error,
        }
    }

    pub fn set_parameter(&mut self, field: FieldId, raw: &str, mode: UpdateMode) -> SetOutcome {
        self.on_parameter_change(field, raw, mode)
    }

    /// Slider drag: the value is numeric already, so it is stored and the input box
    /// text follows it.
    pub fn on_slider_change(&mut self, field: FieldId, value: f64) -> SetOutcome {
        let error = self.state.set_value(field, value).err();
        if let Some(e) = &error {
            warn!("{}", e);
        }
        self.recompute();

        SetOutcome {
            field,
            value: self.state.get(field),
            display: Some(self.state.display_text(field)),
            error,
        }
    }

    /// Changes the curve resolution, e.g. after the plot was resized.
    pub fn set_samples(&mut self, samples: usize) {
        self.samples = samples;
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.recompute();
    }

    pub fn snapshot(&self) -> ParameterState {
        self.state
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    fn recompute(&mut self) {
        self.outputs = model::compute_outputs(&self.state, self.samples);
        debug!(
            "recomputed outputs: depths {:?}, half-lives {:?} / {:?}",
            self.outputs.depths, self.outputs.half_life_surface, self.outputs.half_life_max_depth
        );
    }
}
