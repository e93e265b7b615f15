//! Take-off and landing distance prediction.
//!
//! - [`operation`] - Operations, runway surfaces and their fixed factors
//! - [`handbook`] - Handbook tables and the directory they are loaded from
//! - [`regression`] - Quadratic response surface fitted to a handbook table
//! - [`model`] - Distance tables and contour grids predicted by the surface
//!
//! # Example
//!
//! ```no_run
//! use prepavol_lib::altitude::FieldConditions;
//! use prepavol_lib::performance::{HandbookLibrary, Operation, PerformanceRequest};
//!
//! let library = HandbookLibrary::new("docs/fixtures/performance");
//! let request = PerformanceRequest::new(
//!     "DR400-120",
//!     825.2,
//!     FieldConditions::new(1200.0, 25.0, 1010.0),
//! );
//! let table = request.predict(&library, Operation::Takeoff, &[]).unwrap();
//! for row in &table.rows {
//!     println!("{}: {:?}", row.surface, row.distances_m);
//! }
//! ```

pub mod handbook;
pub mod model;
pub mod operation;
pub mod regression;

pub use handbook::{HandbookLibrary, HandbookPoint, HandbookTable};
pub use model::{
    DistanceRow, DistanceTable, GridSpec, PerformanceGrid, PerformanceModel, PerformanceRequest,
};
pub use operation::{Operation, RunwaySurface, HEADWINDS_KT};
pub use regression::QuadraticSurface;
