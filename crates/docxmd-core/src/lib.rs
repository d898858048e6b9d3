//! # docxmd Core - Shared Conversion Vocabulary
//!
//! Types shared by every part of the DOCX to Markdown pipeline:
//!
//! - [`DocxMdError`] and the [`Result`] alias
//! - [`StreamInfo`], the metadata a host supplies alongside a byte stream
//! - [`ConversionResult`], the title/markdown pair handed back to the host
//! - [`DocumentConverter`], the capability a converter implements
//! - [`ConverterRegistry`], the host-side routing table converters register into
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // Note: DocxConverter is in docxmd-backend crate
//! use docxmd_backend::plugin::register_converters;
//! use docxmd_core::{ConverterRegistry, StreamInfo};
//!
//! let mut registry = ConverterRegistry::new();
//! register_converters(&mut registry);
//!
//! let mut file = std::fs::File::open("report.htm")?;
//! let info = StreamInfo::new().with_extension(".docx");
//! let result = registry.convert(&mut file, &info)?;
//! println!("{}", result.markdown);
//! # Ok::<(), docxmd_core::DocxMdError>(())
//! ```

pub mod error;
pub mod registry;
pub mod stream;

pub use error::{DocxMdError, Result};
pub use registry::{ConverterRegistry, DocumentConverter};
pub use stream::{ConversionResult, StreamInfo};
