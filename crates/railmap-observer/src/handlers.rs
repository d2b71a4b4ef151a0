//! REST API endpoint handlers for the Observer server.
//!
//! Every read runs a full pipeline cycle against the shared
//! [`CoverageSession`](railmap_core::CoverageSession); nothing is cached
//! between requests.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/map` | Annotated department boundaries (`GeoJSON`) |
//! | `GET` | `/api/lines` | High-speed line overlay (`GeoJSON`) |
//! | `GET` | `/api/summary` | Population totals by coverage category |
//! | `GET` | `/api/regions` | Departments, most populated first |
//! | `GET` | `/api/regions/{code}` | Single department |
//! | `GET` | `/api/coverage` | Stored coverage flags |
//! | `PUT` | `/api/coverage` | Submit coverage edits for every department |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use railmap_core::{format_percentage, format_population};
use railmap_types::{CoverageCategory, RegionCode, RegionEdit};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `PUT /api/coverage`.
#[derive(Debug, serde::Deserialize)]
pub struct EditRequest {
    /// One entry per department.
    pub edits: Vec<RegionEdit>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with the coverage metrics and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ObserverError> {
    let guard = state.session.read().await;
    let output = guard.session.run_cycle()?;
    let summary = &output.summary;

    let total = format_population(summary.total);
    let regions = output.dataset.len();
    let loaded_at = state.loaded_at.to_rfc3339();

    let mut metrics = String::new();
    for category in CoverageCategory::ALL {
        let share = summary.share(category);
        metrics.push_str(&format!(
            r#"        <div class="metric" style="border-left: 6px solid {color};">
            <div class="label">{label}</div>
            <div class="value">{pct}</div>
        </div>
"#,
            color = category.legend_color(),
            label = category.label(),
            pct = format_percentage(share.percentage),
        ));
    }
    let with_line = format_percentage(summary.with_line.percentage);
    let with_service = format_percentage(summary.with_service.percentage);

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="utf-8">
    <title>Desserte TGV des départements</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 160px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Desserte TGV des départements</h1>
    <p class="subtitle">{regions} départements, données chargées le {loaded_at}</p>

    <div>
        <div class="metric">
            <div class="label">Population totale</div>
            <div class="value">{total}</div>
        </div>
        <div class="metric">
            <div class="label">Avec ligne LGV</div>
            <div class="value">{with_line}</div>
        </div>
        <div class="metric">
            <div class="label">Avec desserte TGV</div>
            <div class="value">{with_service}</div>
        </div>
    </div>
    <div>
{metrics}    </div>

    <hr>

    <h2>API</h2>
    <ul>
        <li>GET <a href="/api/map">/api/map</a> -- Annotated department boundaries</li>
        <li>GET <a href="/api/lines">/api/lines</a> -- High-speed line overlay</li>
        <li>GET <a href="/api/summary">/api/summary</a> -- Population by coverage category</li>
        <li>GET <a href="/api/regions">/api/regions</a> -- Departments by population</li>
        <li>GET <a href="/api/coverage">/api/coverage</a> -- Stored coverage flags</li>
        <li>PUT /api/coverage -- Submit coverage edits</li>
    </ul>
</body>
</html>"#
    )))
}

// ---------------------------------------------------------------------------
// GET /api/map -- annotated boundaries
// ---------------------------------------------------------------------------

/// Return the department boundaries with the fused attributes merged into
/// each feature's properties.
pub async fn get_map(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let guard = state.session.read().await;
    let output = guard.session.run_cycle()?;
    Ok(Json(output.map.to_geojson()))
}

// ---------------------------------------------------------------------------
// GET /api/lines -- line overlay
// ---------------------------------------------------------------------------

/// Return the high-speed line overlay as loaded.
pub async fn get_lines(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let guard = state.session.read().await;
    guard
        .session
        .lines()
        .cloned()
        .map(Json)
        .ok_or_else(|| ObserverError::NotFound("no line overlay configured".to_owned()))
}

// ---------------------------------------------------------------------------
// GET /api/summary -- aggregates
// ---------------------------------------------------------------------------

/// Return total and per-category population with percentages.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let guard = state.session.read().await;
    let output = guard.session.run_cycle()?;

    Ok(Json(serde_json::json!({
        "total_display": format_population(output.summary.total),
        "regions": output.dataset.len(),
        "summary": output.summary,
        "computed_at": Utc::now(),
    })))
}

// ---------------------------------------------------------------------------
// GET /api/regions -- tabular view
// ---------------------------------------------------------------------------

/// List every department, most populated first.
pub async fn list_regions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let guard = state.session.read().await;
    let output = guard.session.run_cycle()?;

    Ok(Json(serde_json::json!({
        "count": output.table.len(),
        "regions": output.table,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/regions/{code} -- single department
// ---------------------------------------------------------------------------

/// Return one department. The code is normalized, so `/api/regions/1`
/// and `/api/regions/01` are the same department.
pub async fn get_region(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    let code = RegionCode::normalize(&raw)
        .ok_or_else(|| ObserverError::NotFound(format!("department {raw:?}")))?;

    let guard = state.session.read().await;
    let output = guard.session.run_cycle()?;

    output
        .table
        .into_iter()
        .find(|row| row.code == code)
        .map(Json)
        .ok_or_else(|| ObserverError::NotFound(format!("department {code}")))
}

// ---------------------------------------------------------------------------
// GET /api/coverage -- stored flags
// ---------------------------------------------------------------------------

/// Return the session's stored coverage flags.
pub async fn get_coverage(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let guard = state.session.read().await;
    let overrides = guard.session.overrides();

    Ok(Json(serde_json::json!({
        "count": overrides.len(),
        "coverage": overrides,
        "edits_applied": guard.edits_applied,
        "last_edit_at": guard.last_edit_at,
    })))
}

// ---------------------------------------------------------------------------
// PUT /api/coverage -- edit submission
// ---------------------------------------------------------------------------

/// Submit new coverage flags for every department.
///
/// Returns whether anything changed and the recomputed summary. An
/// incomplete or inconsistent submission is rejected with 400 and
/// changes nothing.
pub async fn put_coverage(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EditRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let mut guard = state.session.write().await;
    let output = guard.session.submit_edits(&request.edits)?;

    let changed = match output.edit {
        railmap_core::EditStatus::Applied { changed } => {
            guard.last_edit_at = Some(Utc::now());
            guard.edits_applied = guard.edits_applied.saturating_add(1);
            changed
        }
        railmap_core::EditStatus::Unchanged | railmap_core::EditStatus::NotSubmitted => 0,
    };

    tracing::info!(
        submitted = request.edits.len(),
        changed,
        "Coverage edit submission processed"
    );

    Ok(Json(serde_json::json!({
        "updated": output.edit.updated(),
        "changed": changed,
        "summary": output.summary,
    })))
}
