/// Round to 2 decimal places, the precision every reported percentage
/// uses on the wire.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One rung of a threshold ladder: scores strictly below `upper` get
/// `label`, provided no earlier rung matched.
#[derive(Debug, Clone, Copy)]
pub struct RiskBand {
    pub upper: f64,
    pub label: &'static str,
}

/// A fixed, domain-specific ladder of half-open intervals evaluated in
/// ascending order, first match wins. Scores at or above the last rung's
/// bound fall through to `final_label`.
#[derive(Debug, Clone, Copy)]
pub struct RiskBands {
    bands: &'static [RiskBand],
    final_label: &'static str,
}

impl RiskBands {
    pub const fn new(bands: &'static [RiskBand], final_label: &'static str) -> Self {
        RiskBands { bands, final_label }
    }

    pub fn classify(&self, score: f64) -> &'static str {
        for band in self.bands {
            if score < band.upper {
                return band.label;
            }
        }
        self.final_label
    }
}

/// Arithmetic mean of per-model percentages, rounded to 2 decimals, plus
/// the qualitative label the ladder assigns to that mean. The mean is
/// invariant under the iteration order of the input.
pub fn aggregate(percentages: &[f64], bands: &RiskBands) -> (f64, &'static str) {
    let average = if percentages.is_empty() {
        0.0
    } else {
        round2(percentages.iter().sum::<f64>() / percentages.len() as f64)
    };
    (average, bands.classify(average))
}
