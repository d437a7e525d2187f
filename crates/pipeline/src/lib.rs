//! # prbias-pipeline
//!
//! Climatology building and the per-basin correction driver.
//!
//! The driver only talks to its collaborators through the
//! [`SeriesLoader`](prbias_io::SeriesLoader),
//! [`MethodLookup`](prbias_io::MethodLookup) and
//! [`SeriesWriter`](prbias_io::SeriesWriter) traits, so it runs the same
//! against the NetCDF archive and against in-memory fakes.
//!
//! ```mermaid
//! graph LR
//!     A["forecast series"] -->|"split_leads()"| B["3 lead windows"]
//!     C["hindcasts + obs, 1981..=2010"] -->|"build_climatologies()"| D["3 climatologies"]
//!     B --> E["correct_window()"]
//!     D --> E
//!     E -->|"concatenate"| F["SeriesWriter"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use prbias_pipeline::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(&archive, &methods, &writer, PipelineConfig::new());
//! let report = pipeline.run_batch(&basins, run);
//! println!("{} corrected, {} skipped", report.n_corrected(), report.n_skipped());
//! ```

mod climatology;
mod config;
mod driver;
mod error;
mod report;

pub use climatology::build_climatologies;
pub use config::PipelineConfig;
pub use driver::Pipeline;
pub use error::PipelineError;
pub use report::{BasinOutcome, BasinReport, BatchReport, LeadSummary};
