//! Per-module coverage statistics.

use crate::adapters::CoverageEngine;
use crate::artifact::ModuleName;
use serde::Serialize;
use tracing::warn;

/// Covered/uncovered line counts for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageStat {
    /// Module the counts belong to
    pub module: ModuleName,
    /// Lines executed at least once
    pub covered: u64,
    /// Lines never executed
    pub uncovered: u64,
}

impl CoverageStat {
    /// Create a stat
    #[must_use]
    pub fn new(module: ModuleName, covered: u64, uncovered: u64) -> Self {
        Self {
            module,
            covered,
            uncovered,
        }
    }

    /// Placeholder stat for a module whose analysis failed.
    ///
    /// Keeps the module identifier so report rows stay complete while the
    /// counts contribute nothing to the totals.
    #[must_use]
    pub fn zero(module: ModuleName) -> Self {
        Self::new(module, 0, 0)
    }

    /// Truncated coverage percentage for this module
    #[must_use]
    pub fn percentage(&self) -> u64 {
        percentage(self.covered, self.uncovered)
    }
}

/// Truncated coverage percentage.
///
/// `covered + uncovered == 0` yields 0 rather than dividing by zero; an
/// uninstrumented or empty module reports as fully uncovered.
#[must_use]
pub fn percentage(covered: u64, uncovered: u64) -> u64 {
    let total = covered + uncovered;
    if total == 0 {
        0
    } else {
        covered * 100 / total
    }
}

/// Analyze each module, substituting a zero placeholder on failure.
///
/// A module the engine cannot analyze is logged and reported as
/// `{module, 0, 0}`; one bad module never aborts the batch.
pub fn analyze_modules<E: CoverageEngine>(engine: &E, modules: &[ModuleName]) -> Vec<CoverageStat> {
    modules
        .iter()
        .map(|module| match engine.analyze(module) {
            Ok((covered, uncovered)) => CoverageStat::new(module.clone(), covered, uncovered),
            Err(e) => {
                warn!(module = %module, error = %e, "coverage analysis failed, reporting 0/0");
                CoverageStat::zero(module.clone())
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactRef;
    use crate::result::{CubrirError, CubrirResult};
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::path::Path;

    struct StubEngine {
        stats: HashMap<String, (u64, u64)>,
    }

    impl CoverageEngine for StubEngine {
        fn reset(&mut self) -> CubrirResult<()> {
            Ok(())
        }

        fn instrument(&mut self, _artifact: &ArtifactRef) -> CubrirResult<()> {
            Ok(())
        }

        fn analyze(&self, module: &ModuleName) -> CubrirResult<(u64, u64)> {
            self.stats
                .get(module.as_str())
                .copied()
                .ok_or_else(|| CubrirError::Analyze {
                    module: module.to_string(),
                    message: "module not instrumented".to_string(),
                })
        }

        fn render_detail(&self, _module: &ModuleName, _path: &Path) -> CubrirResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_percentage_half() {
        assert_eq!(percentage(50, 50), 50);
    }

    #[test]
    fn test_percentage_truncates() {
        // 1/3 = 33.33.. truncates, never rounds
        assert_eq!(percentage(1, 2), 33);
        assert_eq!(percentage(2, 1), 66);
        assert_eq!(percentage(99, 1), 99);
    }

    #[test]
    fn test_percentage_full() {
        assert_eq!(percentage(7, 0), 100);
        assert_eq!(percentage(0, 7), 0);
    }

    #[test]
    fn test_stat_percentage() {
        let stat = CoverageStat::new(ModuleName::from("m"), 8, 2);
        assert_eq!(stat.percentage(), 80);
    }

    #[test]
    fn test_zero_stat_keeps_module_name() {
        let stat = CoverageStat::zero(ModuleName::from("broken"));
        assert_eq!(stat.module, ModuleName::from("broken"));
        assert_eq!((stat.covered, stat.uncovered), (0, 0));
        assert_eq!(stat.percentage(), 0);
    }

    #[test]
    fn test_analyze_modules_mixed_failure() {
        let engine = StubEngine {
            stats: HashMap::from([("good".to_string(), (8, 2))]),
        };
        let modules = vec![ModuleName::from("good"), ModuleName::from("bad")];

        let stats = analyze_modules(&engine, &modules);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0], CoverageStat::new(ModuleName::from("good"), 8, 2));
        assert_eq!(stats[1], CoverageStat::zero(ModuleName::from("bad")));
    }

    #[test]
    fn test_analyze_modules_empty() {
        let engine = StubEngine {
            stats: HashMap::new(),
        };
        assert!(analyze_modules(&engine, &[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_percentage_bounded(covered in 0u64..1_000_000, uncovered in 0u64..1_000_000) {
            let pct = percentage(covered, uncovered);
            prop_assert!(pct <= 100);
        }

        #[test]
        fn prop_percentage_never_exceeds_exact_ratio(covered in 1u64..100_000, uncovered in 0u64..100_000) {
            // Truncation: pct * total <= covered * 100
            let total = covered + uncovered;
            let pct = percentage(covered, uncovered);
            prop_assert!(pct * total <= covered * 100);
            prop_assert!((pct + 1) * total > covered * 100);
        }
    }
}
