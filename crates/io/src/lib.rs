//! # hydrots-io
//!
//! Read and write [`Series`](hydrots_series::Series) in the text, binary and
//! XML formats used by hydrological tooling.
//!
//! Each codec module exposes `decode`/`encode` over `std::io` readers and
//! writers. [`read_file`] and [`write_file`] dispatch single-series files by
//! extension; the multi-series formats have their own file helpers.
//!
//! ```ignore
//! use std::path::Path;
//! use hydrots_io::{WriteOptions, read_file, write_file};
//!
//! let series = read_file(Path::new("gauge.uvf"), None)?;
//! let options = WriteOptions::default().with_rexchange(Some("HOF_Q"));
//! write_file(Path::new("out/gauge.zrx"), &series, None, &options)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `txt` | `YYYYMMDDHHMMSS value` lines |
//! | `csv` | `YYYY-MM-DD HH:MM:SS,value` lines |
//! | `uvf` | Fixed-width text with two-digit years |
//! | `zrx` | ZRXP exchange format |
//! | `bin` | Little-endian `f64` date + `f32` value records |
//! | `wel` | Multi-series fixed-width text tables |
//! | `wbl` | Multi-series binary tables with a `.WELINFO` sidecar |
//! | `pi_xml` | Delft-FEWS PI time series XML |
//! | `pi_run` | PI run-info and model-parameter documents |
//! | `reader` / `writer` | Extension-based file dispatch |

pub mod bin;
mod columns;
pub mod csv;
mod error;
mod format;
pub mod pi_run;
pub mod pi_xml;
mod reader;
mod strided;
mod text;
pub mod txt;
pub mod uvf;
mod value;
pub mod wbl;
pub mod wel;
mod writer;
pub mod zrx;

pub use error::IoError;
pub use format::Format;
pub use pi_run::{ModelParameter, RunInfo, read_model_parameters, read_run_info};
pub use pi_xml::{PiSeriesMap, read_pi_xml, write_pi_xml};
pub use reader::read_file;
pub use wbl::read_wbl;
pub use wel::read_wel;
pub use writer::{WriteOptions, write_file};
