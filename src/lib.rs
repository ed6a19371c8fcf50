//! Endemicity statistics for biogeographic area-by-taxon presence matrices.
//!
//! ```
//! use endemicity_analyzer::{Analyzer, CellState, PresenceMatrix};
//! use endemicity_analyzer::analysis::percent;
//!
//! let m = PresenceMatrix::from_fn(
//!     vec!["North".into(), "South".into()],
//!     vec!["t1".into(), "t2".into()],
//!     |area, taxon| if area == 0 || taxon == 1 { CellState::Present } else { CellState::Absent },
//! );
//! let report = Analyzer::new(&m).report();
//! assert_eq!(report.taxa.total_endemic, 1);
//! assert_eq!(percent(1, 4), 25.0);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::{Analyzer, EndemicityReport};
pub use config::AnalysisConfig;
pub use error::EndemicityError;
pub use io::{MatrixReader, MatrixWriter};
pub use models::{CellState, PresenceMatrix};
