//! Enumeration types for the coverage map.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Coverage category
// ---------------------------------------------------------------------------

/// High-speed rail coverage of a department, derived from its two flags.
///
/// | line | service | category |
/// |------|---------|----------|
/// | yes  | yes     | [`Full`](Self::Full) |
/// | no   | yes     | [`ServiceOnly`](Self::ServiceOnly) |
/// | yes  | no      | [`LineOnly`](Self::LineOnly) |
/// | no   | no      | [`None`](Self::None) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CoverageCategory {
    /// A high-speed line crosses the department and trains stop there.
    Full,
    /// Trains stop in the department but no dedicated line crosses it.
    ServiceOnly,
    /// A high-speed line crosses the department without any stop.
    LineOnly,
    /// Neither a line nor a stop.
    None,
}

impl CoverageCategory {
    /// Every category, in legend order.
    pub const ALL: [Self; 4] = [Self::Full, Self::ServiceOnly, Self::LineOnly, Self::None];

    /// Derive the category from the two coverage flags.
    pub const fn from_flags(has_line: bool, has_service: bool) -> Self {
        match (has_line, has_service) {
            (true, true) => Self::Full,
            (false, true) => Self::ServiceOnly,
            (true, false) => Self::LineOnly,
            (false, false) => Self::None,
        }
    }

    /// Whether departments in this category are crossed by a line.
    pub const fn has_line(self) -> bool {
        matches!(self, Self::Full | Self::LineOnly)
    }

    /// Whether departments in this category have a stop.
    pub const fn has_service(self) -> bool {
        matches!(self, Self::Full | Self::ServiceOnly)
    }

    /// Legend label shown next to the metric.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Avec ligne LGV et desserte TGV",
            Self::ServiceOnly => "Avec desserte TGV sans LGV",
            Self::LineOnly => "Traversé par LGV sans desserte",
            Self::None => "Sans desserte ni LGV",
        }
    }

    /// Fill colour used for this category on the map legend.
    pub const fn legend_color(self) -> &'static str {
        match self {
            Self::Full => "blue",
            Self::ServiceOnly => "green",
            Self::LineOnly => "orange",
            Self::None => "lightgray",
        }
    }
}
