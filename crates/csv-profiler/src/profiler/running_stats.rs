//! Online mean and variance (Welford's algorithm).

/// Streaming accumulator for count, mean and variance.
///
/// Values are never retained: each `add` updates the running mean and the sum
/// of squared deviations from it (`m2`), which stays numerically stable over
/// an unbounded number of values.
///
/// Inputs are not validated. A `NaN` poisons the mean and variance for good,
/// and an infinity turns them into `inf`/`NaN` as IEEE arithmetic dictates.
/// The column aggregator only ever feeds finite values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of all values added so far, `None` before the first value.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Bessel-corrected sample variance, `None` with fewer than two values.
    pub fn variance(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        Some(self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation, `None` with fewer than two values.
    pub fn std(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}
