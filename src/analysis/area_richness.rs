use serde::{Deserialize, Serialize};

use crate::models::PresenceMatrix;

/// Number of taxa present in one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaStat {
    pub area_index: usize,
    pub label: String,
    pub present_count: usize,
}

/// Count present taxa for every area, in area-index order.
///
/// Areas with nothing present are reported with a count of zero.
pub fn compute_area_stats(matrix: &PresenceMatrix) -> Vec<AreaStat> {
    matrix
        .areas()
        .map(|area| AreaStat {
            area_index: area.index,
            label: area.label.to_string(),
            present_count: matrix
                .row(area.index)
                .iter()
                .filter(|c| c.is_present())
                .count(),
        })
        .collect()
}
