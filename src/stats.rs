//! Summary statistics over repetition timings.

/// Mean, sample standard deviation, minimum and maximum of a sample set.
///
/// An empty sample set yields NaN in every field; a single sample has a NaN
/// standard deviation. Neither case is an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub sd: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self {
                mean: f64::NAN,
                sd: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Bessel's correction: divide by count - 1.
        let sd = if samples.len() > 1 {
            let ss: f64 = samples.iter().map(|x| (x - mean) * (x - mean)).sum();
            (ss / (count - 1.0)).sqrt()
        } else {
            f64::NAN
        };

        Self { mean, sd, min, max }
    }

    /// The four-line console block printed after a run.
    pub fn report_lines(&self) -> [String; 4] {
        [
            format!("  mean = {:.6} s", self.mean),
            format!("  sd   = {:.6} s", self.sd),
            format!("  min  = {:.6} s", self.min),
            format!("  max  = {:.6} s", self.max),
        ]
    }
}
