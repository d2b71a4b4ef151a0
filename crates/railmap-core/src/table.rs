//! Tabular view of a fused dataset.

use railmap_types::RegionRow;

use crate::format::format_population;
use crate::fusion::FusedDataset;

/// Rows for every department, most populated first.
///
/// Departments with equal population keep their dataset order.
pub fn region_table(dataset: &FusedDataset) -> Vec<RegionRow> {
    let mut rows: Vec<RegionRow> = dataset
        .iter()
        .map(|r| RegionRow {
            code: r.code.clone(),
            name: r.name.clone(),
            population: r.population,
            population_display: format_population(r.population),
            has_line: r.has_line,
            has_service: r.has_service,
            category: r.category(),
        })
        .collect();
    rows.sort_by(|a, b| b.population.cmp(&a.population));
    rows
}
