//! Report assembly and rendering.
//!
//! This module turns finalized profiling state into a [`Report`](crate::Report)
//! and renders it for output.
//!
//! # Rendering
//!
//! - JSON via [`render_json`], keys matching the report fields
//! - HTML via [`render_html`], a self-contained page with one table per column
//!
//! # Example
//!
//! ```rust,ignore
//! use csv_profiler::reporting::{write_report, ReportFormat};
//!
//! let report = Profiler::new(config)?.profile_csv("data/train.csv")?;
//! println!("{}", csv_profiler::reporting::render_json(&report)?);
//! write_report(&report, ReportFormat::Html, "out/report.html")?;
//! ```

mod assembler;
mod render;

pub use assembler::{assemble_report, summarize_column, top_values};
pub use render::{ReportFormat, render_html, render_html_at, render_json, write_report};
