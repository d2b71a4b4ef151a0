//! Population aggregation by coverage category.
//!
//! The summary is recomputed from scratch on every call. Categories
//! partition the departments, so the four category sums always add up to
//! the total. Percentages are rounded to two decimals and are zero when
//! the total is zero.

use std::collections::BTreeMap;

use railmap_types::{AggregateSummary, CategoryShare, CoverageCategory};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::fusion::FusedDataset;

/// Decimal places kept in every percentage.
pub const PERCENTAGE_DP: u32 = 2;

/// Compute total and per-category population over a dataset.
pub fn aggregate(dataset: &FusedDataset) -> AggregateSummary {
    let mut total: u64 = 0;
    let mut sums: BTreeMap<CoverageCategory, u64> =
        CoverageCategory::ALL.iter().map(|&c| (c, 0)).collect();

    for region in dataset.iter() {
        total = total.saturating_add(region.population);
        let sum = sums.entry(region.category()).or_insert(0);
        *sum = sum.saturating_add(region.population);
    }

    let sum_of = |category: CoverageCategory| sums.get(&category).copied().unwrap_or(0);
    let with_line = sum_of(CoverageCategory::Full).saturating_add(sum_of(CoverageCategory::LineOnly));
    let with_service =
        sum_of(CoverageCategory::Full).saturating_add(sum_of(CoverageCategory::ServiceOnly));

    let by_category = sums
        .iter()
        .map(|(&category, &population)| (category, share(population, total)))
        .collect();

    AggregateSummary {
        total,
        by_category,
        with_line: share(with_line, total),
        with_service: share(with_service, total),
    }
}

/// Build a [`CategoryShare`] for `part` out of `total`.
pub fn share(part: u64, total: u64) -> CategoryShare {
    CategoryShare {
        population: part,
        percentage: percentage(part, total),
    }
}

/// `part / total * 100`, rounded to [`PERCENTAGE_DP`] places.
///
/// Returns zero when `total` is zero.
pub fn percentage(part: u64, total: u64) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(Decimal::from(total)))
        .map_or(Decimal::ZERO, |p| {
            let mut rounded =
                p.round_dp_with_strategy(PERCENTAGE_DP, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(PERCENTAGE_DP);
            rounded
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use railmap_loader::{PopulationRecord, RailRecord};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::fusion::fuse;

    fn dataset(rows: &[(&str, &str, bool, bool)]) -> FusedDataset {
        let population: Vec<PopulationRecord> = rows
            .iter()
            .map(|(code, pop, _, _)| PopulationRecord::new(code, code, pop))
            .collect();
        let rail: Vec<RailRecord> = rows
            .iter()
            .map(|&(code, _, line, service)| RailRecord::new(code, line, service))
            .collect();
        fuse(&population, &rail).unwrap()
    }

    #[test]
    fn single_line_only_department() {
        let summary = aggregate(&dataset(&[("01", "680000", true, false)]));

        assert_eq!(summary.total, 680_000);
        assert_eq!(summary.share(CoverageCategory::LineOnly).population, 680_000);
        assert_eq!(summary.share(CoverageCategory::LineOnly).percentage, dec!(100.00));
        for category in [
            CoverageCategory::Full,
            CoverageCategory::ServiceOnly,
            CoverageCategory::None,
        ] {
            assert_eq!(summary.share(category).population, 0);
            assert_eq!(summary.share(category).percentage, dec!(0.00));
        }
        assert_eq!(summary.with_line.percentage, dec!(100.00));
        assert_eq!(summary.with_service.population, 0);
    }

    #[test]
    fn categories_sum_to_total() {
        let summary = aggregate(&dataset(&[
            ("01", "680000", true, false),
            ("13", "2080000", true, true),
            ("23", "115000", false, false),
            ("69", "1930000", true, true),
            ("75", "2100000", false, true),
        ]));

        let sum: u64 = summary.by_category.values().map(|s| s.population).sum();
        assert_eq!(sum, summary.total);
        assert_eq!(summary.total, 6_905_000);
        assert_eq!(summary.by_category.len(), 4);

        assert_eq!(summary.share(CoverageCategory::Full).percentage, dec!(58.07));
        assert_eq!(summary.share(CoverageCategory::LineOnly).percentage, dec!(9.85));
        assert_eq!(summary.share(CoverageCategory::ServiceOnly).percentage, dec!(30.41));
        assert_eq!(summary.share(CoverageCategory::None).percentage, dec!(1.67));
        assert_eq!(summary.with_line.population, 4_690_000);
        assert_eq!(summary.with_line.percentage, dec!(67.92));
        assert_eq!(summary.with_service.population, 6_110_000);
        assert_eq!(summary.with_service.percentage, dec!(88.49));
    }

    #[test]
    fn percentages_always_carry_two_places() {
        assert_eq!(percentage(1, 1).to_string(), "100.00");
        assert_eq!(percentage(1, 8).to_string(), "12.50");
    }

    #[test]
    fn empty_dataset_has_zero_percentages() {
        let summary = aggregate(&FusedDataset::default());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.by_category.len(), 4);
        assert!(summary.by_category.values().all(|s| s.percentage == Decimal::ZERO));
    }

    #[test]
    fn zero_population_total_is_not_an_error() {
        let summary = aggregate(&dataset(&[("01", "n/a", true, true)]));
        assert_eq!(summary.total, 0);
        assert_eq!(summary.share(CoverageCategory::Full).percentage, Decimal::ZERO);
    }

    #[test]
    fn percentage_of_total_is_one_hundred() {
        assert_eq!(percentage(42, 42), dec!(100.00));
        assert_eq!(percentage(0, 0), Decimal::ZERO);
        assert_eq!(percentage(7, 0), Decimal::ZERO);
        assert_eq!(percentage(1, 3), dec!(33.33));
        assert_eq!(percentage(2, 3), dec!(66.67));
    }
}
