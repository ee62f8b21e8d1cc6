//! Decides whether a scan should re-run full convention discovery or can
//! reuse last run's conventions incrementally, based on how much of the
//! codebase changed since then.

/// How much of convention discovery to redo for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningMode {
    /// Nothing changed since the last scan — skip discovery entirely.
    Skip,
    /// A small fraction changed — only rescore affected patterns.
    Incremental,
    /// Enough of the codebase changed that discovery should rerun in full.
    Full,
}

/// `changed_files / total_files >= threshold` triggers a full relearn;
/// otherwise an incremental rescore; zero changes skip discovery.
pub fn determine_mode(changed_files: u64, total_files: u64, threshold: f64) -> LearningMode {
    if changed_files == 0 || total_files == 0 {
        return LearningMode::Skip;
    }
    let ratio = changed_files as f64 / total_files as f64;
    if ratio >= threshold {
        LearningMode::Full
    } else {
        LearningMode::Incremental
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_change_ratio_triggers_full_relearn() {
        assert_eq!(determine_mode(15, 100, 0.10), LearningMode::Full);
    }

    #[test]
    fn small_change_ratio_is_incremental() {
        assert_eq!(determine_mode(2, 100, 0.10), LearningMode::Incremental);
    }

    #[test]
    fn no_changes_skips() {
        assert_eq!(determine_mode(0, 100, 0.10), LearningMode::Skip);
    }
}
