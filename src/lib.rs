//! TurBo Catalog Builder 3000 - PDF tile catalogs from a folder of models
//!
//! # Features
//! - Scans a directory of `<name>_<W>x<H>` model folders into catalog data
//! - Classifies model images and montages by filename suffix
//! - Renders a user-supplied LaTeX template (Jinja with TeX-safe delimiters)
//! - Compiles and saves the catalog PDF from the GUI

pub mod gui;
pub mod pdf;
pub mod scanner;
pub mod template;

pub use scanner::{Catalog, ModelEntry};
