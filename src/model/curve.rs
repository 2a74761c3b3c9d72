use super::intensity_at;
use crate::params::ParameterState;

/// Intensity-vs-depth curve sampled across `[0, depth]`.
///
/// Nothing is stored: points are evaluated on demand and every call to
/// [`Curve::iter`] starts again from the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    state: ParameterState,
    samples: usize,
}

/// Cursor read-out on the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub depth: f64,     // Position [um], clamped to the plotted range
    pub intensity: f64, // Local intensity [mW/cm^2]
}

impl Curve {
    /// `samples` is the number of intervals, typically one per horizontal pixel.
    pub fn new(state: &ParameterState, samples: usize) -> Self {
        Self {
            state: *state,
            samples,
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Number of points produced by [`Curve::iter`].
    pub fn len(&self) -> usize {
        self.samples + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> CurveIter {
        CurveIter {
            curve: *self,
            index: 0,
        }
    }

    /// Plotted depth range [um].
    pub fn x_limits(&self) -> (f64, f64) {
        (0.0, self.state.depth)
    }

    /// Plotted intensity range [mW/cm^2].
    pub fn y_limits(&self) -> (f64, f64) {
        (0.0, self.state.intensity)
    }

    fn position(&self, index: usize) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        index as f64 / self.samples as f64 * self.state.depth
    }

    /// Snaps `x` into the plotted range and reads the curve there.
    /// Returns `None` when there is no cursor position (NaN).
    pub fn probe(&self, x: f64) -> Option<Probe> {
        if x.is_nan() {
            return None;
        }
        let depth = x.clamp(0.0, self.state.depth);
        Some(Probe {
            depth,
            intensity: intensity_at(depth, &self.state),
        })
    }
}

pub struct CurveIter {
    curve: Curve,
    index: usize,
}

impl Iterator for CurveIter {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index > self.curve.samples {
            return None;
        }
        let x = self.curve.position(self.index);
        self.index += 1;
        Some((x, intensity_at(x, &self.curve.state)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.curve.samples + 1).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveIter {}

impl<'a> IntoIterator for &'a Curve {
    type Item = (f64, f64);
    type IntoIter = CurveIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
