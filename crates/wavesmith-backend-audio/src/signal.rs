//! Immutable sample sequences.

/// An ordered sequence of samples normalized to [-1, 1].
///
/// A `Signal` is never mutated after construction. Transforms such as
/// [`crate::envelope::apply`] return a new signal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signal {
    samples: Vec<f64>,
}

impl Signal {
    /// Creates a signal, clamping samples to [-1, 1] and replacing NaN with 0.
    pub fn new(samples: Vec<f64>) -> Self {
        let samples = samples
            .into_iter()
            .map(|s| if s.is_nan() { 0.0 } else { s.clamp(-1.0, 1.0) })
            .collect();
        Self { samples }
    }

    /// Creates an empty signal.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    /// Consumes the signal and returns its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

impl<'a> IntoIterator for &'a Signal {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
