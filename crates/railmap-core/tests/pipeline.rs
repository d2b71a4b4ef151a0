//! End-to-end pipeline tests over the sample datasets in `data/`.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use railmap_core::config::DataConfig;
use railmap_core::{CoreError, CoverageSession, EditError, EditStatus};
use railmap_loader::{Datasets, load_datasets};
use railmap_types::{CoverageCategory, CoverageFlags, RegionCode, RegionEdit};
use rust_decimal_macros::dec;
use serde_json::Value;

fn sample_datasets() -> Datasets {
    let data = DataConfig {
        dir: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data"),
        ..DataConfig::default()
    };
    load_datasets(&data.sources().unwrap()).unwrap()
}

fn code(raw: &str) -> RegionCode {
    RegionCode::normalize(raw).unwrap()
}

/// Echo the current flags of every department back as an edit submission.
fn current_edits(session: &CoverageSession) -> Vec<RegionEdit> {
    session
        .current_dataset()
        .unwrap()
        .iter()
        .map(|r| RegionEdit {
            code: r.code.clone(),
            has_line: r.has_line,
            has_service: r.has_service,
        })
        .collect()
}

#[test]
fn sample_cycle_produces_expected_summary() {
    let session = CoverageSession::new(sample_datasets()).unwrap();
    let output = session.run_cycle().unwrap();

    assert_eq!(output.edit, EditStatus::NotSubmitted);
    assert_eq!(output.summary.total, 6_905_000);
    assert_eq!(output.summary.share(CoverageCategory::Full).population, 4_010_000);
    assert_eq!(output.summary.share(CoverageCategory::LineOnly).population, 680_000);
    assert_eq!(output.summary.share(CoverageCategory::ServiceOnly).population, 2_100_000);
    assert_eq!(output.summary.share(CoverageCategory::None).population, 115_000);
    assert_eq!(output.summary.with_line.percentage, dec!(67.92));
    assert_eq!(output.summary.with_service.percentage, dec!(88.49));
}

#[test]
fn unpadded_codes_join_and_corsica_is_absent() {
    let session = CoverageSession::new(sample_datasets()).unwrap();
    let dataset = session.current_dataset().unwrap();

    let ain = dataset.get(&code("01")).unwrap();
    assert_eq!(ain.population, 680_000);
    assert_eq!(ain.category(), CoverageCategory::LineOnly);

    assert!(!dataset.contains(&code("2A")));
    assert!(!dataset.contains(&code("2B")));
}

#[test]
fn boundary_without_attributes_is_annotated_with_defaults() {
    let session = CoverageSession::new(sample_datasets()).unwrap();
    let rendered = session.run_cycle().unwrap().map.to_geojson();

    let alps = rendered["features"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["properties"]["code"] == "05")
        .unwrap();
    assert_eq!(alps["properties"]["nom"], "Hautes-Alpes");
    assert_eq!(alps["properties"]["PTOT"], 0);
    assert_eq!(alps["properties"]["population"], "0");
    assert_eq!(alps["properties"]["ligne_grande_vitesse"], false);
    assert_eq!(alps["properties"]["desserte_tgv"], false);
}

#[test]
fn table_is_sorted_by_population() {
    let session = CoverageSession::new(sample_datasets()).unwrap();
    let table = session.run_cycle().unwrap().table;
    let codes: Vec<&str> = table.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, ["75", "13", "69", "01", "23"]);
}

#[test]
fn echoing_current_flags_changes_nothing() {
    let mut session = CoverageSession::new(sample_datasets()).unwrap();
    let before = session.run_cycle().unwrap();

    let edits = current_edits(&session);
    let after = session.submit_edits(&edits).unwrap();

    assert_eq!(after.edit, EditStatus::Unchanged);
    assert_eq!(after.summary, before.summary);
    assert_eq!(after.dataset, before.dataset);
}

#[test]
fn edits_persist_across_later_cycles() {
    let mut session = CoverageSession::new(sample_datasets()).unwrap();

    let mut edits = current_edits(&session);
    for edit in &mut edits {
        if edit.code == code("23") {
            edit.has_line = true;
            edit.has_service = true;
        }
    }
    let edited = session.submit_edits(&edits).unwrap();
    assert_eq!(edited.edit, EditStatus::Applied { changed: 1 });
    assert_eq!(edited.summary.share(CoverageCategory::None).population, 0);
    assert_eq!(edited.summary.share(CoverageCategory::Full).population, 4_125_000);

    // A later interaction without edits still sees them.
    let later = session.run_cycle().unwrap();
    assert_eq!(later.summary, edited.summary);
    assert_eq!(
        later.dataset.get(&code("23")).unwrap().flags(),
        CoverageFlags::new(true, true)
    );
    assert_eq!(
        session.overrides().get(&code("23")),
        Some(CoverageFlags::new(true, true))
    );

    let creuse = later
        .map
        .features
        .iter()
        .find(|f| f.feature.code() == Some(code("23")))
        .unwrap();
    assert!(creuse.annotation.has_line);
    assert!(creuse.annotation.has_service);
}

#[test]
fn rejected_edit_leaves_session_untouched() {
    let mut session = CoverageSession::new(sample_datasets()).unwrap();
    let before = session.overrides().clone();

    let mut edits = current_edits(&session);
    edits.pop();
    let err = session.submit_edits(&edits).unwrap_err();

    assert!(matches!(
        err,
        CoreError::Edit {
            source: EditError::MissingRegion(_)
        }
    ));
    assert_eq!(session.overrides(), &before);
}

#[test]
fn lines_overlay_is_passed_through() {
    let session = CoverageSession::new(sample_datasets()).unwrap();
    let lines = session.lines().unwrap();
    assert_eq!(lines["type"], "FeatureCollection");
    assert_eq!(lines["features"].as_array().map(Vec::len), Some(2));
    assert!(matches!(lines["features"][0]["geometry"], Value::Object(_)));
}
