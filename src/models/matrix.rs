use serde::{Deserialize, Serialize};

use super::CellState;
use crate::error::EndemicityError;

/// One row of the matrix: a biogeographic region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area<'a> {
    pub index: usize,
    pub label: &'a str,
}

/// One column of the matrix: the biological unit tested for endemism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taxon<'a> {
    pub index: usize,
    pub label: &'a str,
}

/// Serialized layout of a [`PresenceMatrix`]: labels plus one row of cells per area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceMatrixData {
    /// Name of the data set (usually the source file stem)
    #[serde(default)]
    pub name: String,
    pub areas: Vec<String>,
    pub taxa: Vec<String>,
    pub cells: Vec<Vec<CellState>>,
}

/// Immutable area-by-taxon presence matrix.
///
/// Rows are areas, columns are taxa. The grid always matches the label
/// sequences exactly; constructors reject anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PresenceMatrixData", into = "PresenceMatrixData")]
pub struct PresenceMatrix {
    name: String,
    area_labels: Vec<String>,
    taxon_labels: Vec<String>,
    // row-major, area_labels.len() * taxon_labels.len()
    cells: Vec<CellState>,
}

impl PresenceMatrix {
    /// Build a matrix from labels and one row of cells per area.
    ///
    /// # Examples
    ///
    /// ```
    /// use endemicity_analyzer::{CellState, PresenceMatrix};
    ///
    /// let matrix = PresenceMatrix::new(
    ///     vec!["North".into(), "South".into()],
    ///     vec!["sp1".into()],
    ///     vec![vec![CellState::Present], vec![CellState::Absent]],
    /// ).unwrap();
    /// assert_eq!(matrix.area_count(), 2);
    /// assert!(matrix.is_present(0, 0));
    /// ```
    pub fn new(
        area_labels: Vec<String>,
        taxon_labels: Vec<String>,
        rows: Vec<Vec<CellState>>,
    ) -> Result<Self, EndemicityError> {
        if rows.len() != area_labels.len() {
            return Err(EndemicityError::InvalidMatrixShape {
                axis: "area rows",
                expected: area_labels.len(),
                actual: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(area_labels.len() * taxon_labels.len());
        for row in rows {
            if row.len() != taxon_labels.len() {
                return Err(EndemicityError::InvalidMatrixShape {
                    axis: "taxon cells per area",
                    expected: taxon_labels.len(),
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            name: String::new(),
            area_labels,
            taxon_labels,
            cells,
        })
    }

    /// Build a matrix by evaluating `state(area, taxon)` for every cell.
    pub fn from_fn<F>(area_labels: Vec<String>, taxon_labels: Vec<String>, mut state: F) -> Self
    where
        F: FnMut(usize, usize) -> CellState,
    {
        let taxon_count = taxon_labels.len();
        let cells = (0..area_labels.len())
            .flat_map(|a| (0..taxon_count).map(move |t| (a, t)))
            .map(|(a, t)| state(a, t))
            .collect();
        Self {
            name: String::new(),
            area_labels,
            taxon_labels,
            cells,
        }
    }

    /// Attach a data-set name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area_count(&self) -> usize {
        self.area_labels.len()
    }

    pub fn taxon_count(&self) -> usize {
        self.taxon_labels.len()
    }

    pub fn area_label(&self, area: usize) -> &str {
        &self.area_labels[area]
    }

    pub fn taxon_label(&self, taxon: usize) -> &str {
        &self.taxon_labels[taxon]
    }

    pub fn area_labels(&self) -> &[String] {
        &self.area_labels
    }

    pub fn taxon_labels(&self) -> &[String] {
        &self.taxon_labels
    }

    /// Iterate areas in index order.
    pub fn areas(&self) -> impl Iterator<Item = Area<'_>> {
        self.area_labels
            .iter()
            .enumerate()
            .map(|(index, label)| Area { index, label })
    }

    /// Iterate taxa in index order.
    pub fn taxa(&self) -> impl Iterator<Item = Taxon<'_>> {
        self.taxon_labels
            .iter()
            .enumerate()
            .map(|(index, label)| Taxon { index, label })
    }

    /// State of a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `area` or `taxon` is out of range.
    pub fn cell_state(&self, area: usize, taxon: usize) -> CellState {
        assert!(
            area < self.area_count() && taxon < self.taxon_count(),
            "cell ({area}, {taxon}) outside {}x{} matrix",
            self.area_count(),
            self.taxon_count()
        );
        self.cells[area * self.taxon_count() + taxon]
    }

    pub fn is_present(&self, area: usize, taxon: usize) -> bool {
        self.cell_state(area, taxon).is_present()
    }

    /// All cells of one area, in taxon order.
    pub fn row(&self, area: usize) -> &[CellState] {
        let width = self.taxon_count();
        &self.cells[area * width..(area + 1) * width]
    }

    /// All cells of one taxon, in area order.
    pub fn column(&self, taxon: usize) -> impl Iterator<Item = CellState> + '_ {
        (0..self.area_count()).map(move |area| self.cell_state(area, taxon))
    }

    /// Number of `Present` cells in the whole grid.
    pub fn present_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_present()).count()
    }

    /// Copy of the matrix with one area removed.
    ///
    /// `outgroup` is 1-based; `0` means no exclusion and returns an unchanged copy.
    pub fn without_area(&self, outgroup: usize) -> Result<Self, EndemicityError> {
        if outgroup == 0 {
            return Ok(self.clone());
        }
        if outgroup > self.area_count() {
            return Err(EndemicityError::OutgroupOutOfRange {
                outgroup,
                areas: self.area_count(),
            });
        }
        let removed = outgroup - 1;
        let area_labels = self
            .area_labels
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != removed)
            .map(|(_, l)| l.clone())
            .collect();
        let cells = (0..self.area_count())
            .filter(|a| *a != removed)
            .flat_map(|a| self.row(a).iter().copied())
            .collect();
        Ok(Self {
            name: self.name.clone(),
            area_labels,
            taxon_labels: self.taxon_labels.clone(),
            cells,
        })
    }
}

impl TryFrom<PresenceMatrixData> for PresenceMatrix {
    type Error = EndemicityError;

    fn try_from(data: PresenceMatrixData) -> Result<Self, Self::Error> {
        Ok(PresenceMatrix::new(data.areas, data.taxa, data.cells)?.with_name(data.name))
    }
}

impl From<PresenceMatrix> for PresenceMatrixData {
    fn from(matrix: PresenceMatrix) -> Self {
        let cells = (0..matrix.area_count())
            .map(|a| matrix.row(a).to_vec())
            .collect();
        PresenceMatrixData {
            name: matrix.name,
            areas: matrix.area_labels,
            taxa: matrix.taxon_labels,
            cells,
        }
    }
}
