//! User-selectable summary length.

/// Coarse output-length choice, expressed as a share of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryLength {
    /// Roughly 15% of the input word count.
    Short,
    /// Roughly 30% of the input word count.
    Medium,
    /// Roughly 60% of the input word count.
    Long,
}

impl SummaryLength {
    /// Fraction of the input word count the summary should target.
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Short => 0.15,
            Self::Medium => 0.30,
            Self::Long => 0.60,
        }
    }
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Short => write!(f, "short"),
            Self::Medium => write!(f, "medium"),
            Self::Long => write!(f, "long"),
        }
    }
}
