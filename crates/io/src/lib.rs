//! # prbias-io
//!
//! Storage side of the bias-correction pipeline: reads basin-averaged
//! (Thiessen) daily precipitation series from NetCDF, resolves basin and
//! correction-method tables, and writes corrected series back in the same
//! convention under a sibling `*_thiessen_cor` directory.
//!
//! The pipeline talks to storage only through [`SeriesLoader`],
//! [`MethodLookup`] and [`SeriesWriter`], so any of them can be replaced.

mod archive;
mod basins;
mod error;
mod layout;
mod methods;
mod netcdf_read;
mod series;
mod source;
mod timeout;
mod writer;

pub use archive::NetcdfArchive;
pub use basins::{Basin, BasinKind, BasinScope, BasinTable};
pub use error::{IoError, Unavailable};
pub use layout::ArchiveLayout;
pub use methods::{MethodLookup, MethodTable};
pub use series::DailySeries;
pub use source::{SeriesLoader, SeriesRequest, SeriesSource};
pub use timeout::TimeoutLoader;
pub use writer::{CorrectedSeries, SeriesWriter, ThiessenWriter};
