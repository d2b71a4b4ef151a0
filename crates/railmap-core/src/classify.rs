//! Coverage classification.

use railmap_types::CoverageCategory;

/// Derive the coverage category of a department from its two flags.
///
/// Every combination is valid, so there is no error path.
pub const fn classify(has_line: bool, has_service: bool) -> CoverageCategory {
    CoverageCategory::from_flags(has_line, has_service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_flag_pair_maps_to_exactly_one_category() {
        let pairs = [(true, true), (false, true), (true, false), (false, false)];
        let categories: Vec<CoverageCategory> =
            pairs.iter().map(|&(l, s)| classify(l, s)).collect();

        assert_eq!(
            categories,
            vec![
                CoverageCategory::Full,
                CoverageCategory::ServiceOnly,
                CoverageCategory::LineOnly,
                CoverageCategory::None,
            ]
        );

        // No gap: every category is reached. No overlap: four distinct values.
        for category in CoverageCategory::ALL {
            assert_eq!(categories.iter().filter(|&&c| c == category).count(), 1);
        }
    }
}
