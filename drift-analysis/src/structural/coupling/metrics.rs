//! `Ca`/`Ce`/`I`/`A`/`D` computation and zone classification (spec.md §4.6).

use super::types::{CouplingMetrics, CouplingTrend, ImportGraph, TrendDirection, ZoneClassification};

/// Distance-from-main-sequence threshold below which a module counts as
/// balanced regardless of where it sits on the I/A plane.
const MAIN_SEQUENCE_THRESHOLD: f64 = 0.3;

/// Classify a module into a zone from its instability and abstractness.
///
/// - Zone of Pain: low instability + low abstractness — concrete and rigid.
/// - Zone of Uselessness: high instability + high abstractness — abstract
///   but nothing depends on it.
/// - Main Sequence: `|A + I - 1| <= threshold`.
///
/// A leaf module (`ce == 0`, so `instability == 0`) that still has some
/// abstractness is treated as a type-only file (enums, interfaces) rather
/// than flagged as painful — it's stable by design, not by neglect.
pub fn classify_zone(instability: f64, abstractness: f64) -> ZoneClassification {
    let distance = (abstractness + instability - 1.0).abs();

    if distance <= MAIN_SEQUENCE_THRESHOLD {
        ZoneClassification::MainSequence
    } else if instability < 0.5 && abstractness < 0.5 {
        if instability == 0.0 && abstractness > 0.0 {
            ZoneClassification::MainSequence
        } else {
            ZoneClassification::ZoneOfPain
        }
    } else if instability > 0.5 && abstractness > 0.5 {
        ZoneClassification::ZoneOfUselessness
    } else {
        ZoneClassification::MainSequence
    }
}

/// Compute `Ca`/`Ce`/`I`/`A`/`D` and the zone for every module in `graph`.
pub fn compute_coupling_metrics(graph: &ImportGraph) -> Vec<CouplingMetrics> {
    graph
        .modules
        .iter()
        .map(|module| {
            let ce = graph.efferent(module);
            let ca = graph.afferent(module);
            let instability = if ca + ce == 0 { 0.0 } else { ce as f64 / (ca + ce) as f64 };
            let abstractness = graph.abstractness(module);
            let distance = (abstractness + instability - 1.0).abs();
            let zone = classify_zone(instability, abstractness);

            CouplingMetrics {
                module: module.clone(),
                ce,
                ca,
                instability,
                abstractness,
                distance,
                zone,
            }
        })
        .collect()
}

/// Compare two coupling snapshots for the same module, hysteresis-guarded
/// at 0.05 so noise doesn't flip the direction every scan.
pub fn compute_trend(previous: &CouplingMetrics, current: &CouplingMetrics) -> CouplingTrend {
    let direction = if current.distance < previous.distance - 0.05 {
        TrendDirection::Improving
    } else if current.distance > previous.distance + 0.05 {
        TrendDirection::Degrading
    } else {
        TrendDirection::Stable
    };

    CouplingTrend {
        module: current.module.clone(),
        previous: previous.clone(),
        current: current.clone(),
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_type_module_is_main_sequence_not_pain() {
        assert_eq!(classify_zone(0.0, 0.6), ZoneClassification::MainSequence);
    }

    #[test]
    fn concrete_rigid_module_is_zone_of_pain() {
        assert_eq!(classify_zone(0.1, 0.0), ZoneClassification::ZoneOfPain);
    }

    #[test]
    fn abstract_unused_module_is_zone_of_uselessness() {
        assert_eq!(classify_zone(0.9, 0.9), ZoneClassification::ZoneOfUselessness);
    }

    #[test]
    fn balanced_module_is_main_sequence() {
        assert_eq!(classify_zone(0.5, 0.5), ZoneClassification::MainSequence);
    }

    #[test]
    fn metrics_computed_per_module() {
        let mut graph = ImportGraph::new();
        graph.add_import("api", "service");
        graph.add_import("service", "repo");
        graph.total_type_counts.insert("repo".into(), 2);
        graph.abstract_counts.insert("repo".into(), 0);

        let metrics = compute_coupling_metrics(&graph);
        let repo = metrics.iter().find(|m| m.module == "repo").unwrap();

        assert_eq!(repo.ce, 0);
        assert_eq!(repo.ca, 1);
        assert_eq!(repo.instability, 1.0);
    }

    #[test]
    fn trend_improving_when_distance_shrinks() {
        let mut graph = ImportGraph::new();
        graph.add_module("m");
        let previous = CouplingMetrics {
            module: "m".into(),
            ce: 1,
            ca: 1,
            instability: 0.5,
            abstractness: 0.0,
            distance: 0.5,
            zone: ZoneClassification::ZoneOfPain,
        };
        let current = CouplingMetrics { distance: 0.2, ..previous.clone() };

        let trend = compute_trend(&previous, &current);
        assert_eq!(trend.direction, TrendDirection::Improving);
    }
}
