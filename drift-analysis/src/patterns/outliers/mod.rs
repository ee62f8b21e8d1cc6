//! Statistical outlier detection over per-pattern confidence-value series,
//! auto-selecting a method by sample size and normality (spec.md §4.7
//! `outlier_ratio`).

pub mod esd;
pub mod grubbs;
pub mod iqr;
pub mod mad;
pub mod rule_based;
pub mod selector;
pub mod types;
pub mod zscore;

pub use selector::{is_approximately_normal, OutlierDetector, OutlierDiagnostics};
pub use types::{DeviationScore, OutlierConfig, OutlierMethod, OutlierResult, SignificanceTier};
