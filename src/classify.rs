//! Fixed-threshold rating lookup for Core Web Vitals
//!
//! Pure classification: each metric carries a (good, poor) threshold pair and
//! a value maps to one of three buckets. Total over all finite non-negative
//! inputs, no state, no side effects.

use serde::Serialize;
use std::fmt;

/// The five surfaced metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    /// Time to first byte
    Ttfb,
    /// First contentful paint
    Fcp,
    /// Largest contentful paint
    Lcp,
    /// Cumulative layout shift (unitless)
    Cls,
    /// Interaction to next paint
    Inp,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Ttfb => "TTFB",
            Metric::Fcp => "FCP",
            Metric::Lcp => "LCP",
            Metric::Cls => "CLS",
            Metric::Inp => "INP",
        }
    }

    /// (good, poor) boundary pair; ms for time metrics, unitless for CLS.
    ///
    /// `value <= good` rates Good, `value > poor` rates Poor, strictly
    /// between rates NeedsImprovement. Both boundaries are inclusive on the
    /// lower bucket.
    pub fn thresholds(&self) -> (f64, f64) {
        match self {
            Metric::Ttfb => (200.0, 600.0),
            Metric::Fcp => (1800.0, 3000.0),
            Metric::Lcp => (2500.0, 4000.0),
            Metric::Cls => (0.1, 0.25),
            Metric::Inp => (200.0, 500.0),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative rating bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::NeedsImprovement => "needs-improvement",
            Rating::Poor => "poor",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate a metric value against its fixed threshold pair
pub fn classify(metric: Metric, value: f64) -> Rating {
    let (good, poor) = metric.thresholds();
    if value <= good {
        Rating::Good
    } else if value <= poor {
        Rating::NeedsImprovement
    } else {
        Rating::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cls_buckets() {
        assert_eq!(classify(Metric::Cls, 0.05), Rating::Good);
        assert_eq!(classify(Metric::Cls, 0.15), Rating::NeedsImprovement);
        assert_eq!(classify(Metric::Cls, 0.30), Rating::Poor);
    }

    #[test]
    fn test_boundary_values_rate_into_lower_bucket() {
        assert_eq!(classify(Metric::Cls, 0.1), Rating::Good);
        assert_eq!(classify(Metric::Cls, 0.25), Rating::NeedsImprovement);
        assert_eq!(classify(Metric::Lcp, 2500.0), Rating::Good);
        assert_eq!(classify(Metric::Lcp, 4000.0), Rating::NeedsImprovement);
    }

    #[test]
    fn test_time_metric_buckets() {
        assert_eq!(classify(Metric::Ttfb, 120.0), Rating::Good);
        assert_eq!(classify(Metric::Ttfb, 450.0), Rating::NeedsImprovement);
        assert_eq!(classify(Metric::Ttfb, 601.0), Rating::Poor);

        assert_eq!(classify(Metric::Fcp, 1799.9), Rating::Good);
        assert_eq!(classify(Metric::Fcp, 2900.0), Rating::NeedsImprovement);
        assert_eq!(classify(Metric::Fcp, 3000.1), Rating::Poor);

        assert_eq!(classify(Metric::Inp, 180.0), Rating::Good);
        assert_eq!(classify(Metric::Inp, 500.0), Rating::NeedsImprovement);
        assert_eq!(classify(Metric::Inp, 500.1), Rating::Poor);
    }

    #[test]
    fn test_zero_rates_good_for_all_metrics() {
        for metric in [
            Metric::Ttfb,
            Metric::Fcp,
            Metric::Lcp,
            Metric::Cls,
            Metric::Inp,
        ] {
            assert_eq!(classify(metric, 0.0), Rating::Good, "{metric}");
        }
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::Good.to_string(), "good");
        assert_eq!(Rating::NeedsImprovement.to_string(), "needs-improvement");
        assert_eq!(Rating::Poor.to_string(), "poor");
    }

    #[test]
    fn test_metric_as_str() {
        assert_eq!(Metric::Ttfb.as_str(), "TTFB");
        assert_eq!(Metric::Lcp.as_str(), "LCP");
    }
}
