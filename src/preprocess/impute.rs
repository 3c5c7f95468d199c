/// Per-field fallback values for the lenient input policy: the raw
/// training-set mean of each column, in field order. Built once at
/// startup from the loaded dataset.
#[derive(Debug, Clone)]
pub struct ImputationTable {
    means: Vec<f64>,
}

impl ImputationTable {
    pub fn new(means: Vec<f64>) -> Self {
        ImputationTable { means }
    }

    pub fn fallback(&self, field_idx: usize) -> f64 {
        self.means[field_idx]
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }
}

/// Placeholder tokens a client may send instead of omitting a field.
/// Matched case-insensitively with surrounding whitespace ignored.
pub fn is_placeholder(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "na" | "nan" | "null"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_tokens_are_case_insensitive_and_trimmed() {
        for token in ["", "  ", "na", "NA", " Nan ", "NULL", "null "] {
            assert!(is_placeholder(token), "{token:?} should be a placeholder");
        }
        for token in ["0", "none", "n/a", "12.5"] {
            assert!(!is_placeholder(token), "{token:?} should not be a placeholder");
        }
    }
}
