//! Textflow - styled multi-segment text layout
//!
//! Textflow renders a sequence of text segments, each with independently
//! resolved visual properties, as one logically flowing block: styles
//! merge under a fixed priority order, segments measure and wrap against
//! a width budget, and an alignment-aware layout hands draw origins to a
//! pluggable canvas backend.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use textflow::{BlockRequest, Pipeline};
//! use textflow::measure_fixed::FixedMeasurer;
//! use textflow::render_record::RecordRenderer;
//!
//! let pipeline = Pipeline::builder()
//!     .measurer(Arc::new(FixedMeasurer::new()))
//!     .renderer(Arc::new(RecordRenderer::new()))
//!     .build()?;
//!
//! let handles = pipeline.render_block(&request)?;
//! ```
//!
//! # Feature Flags
//!
//! - `measure-fixed`: deterministic advance-model metric backend
//! - `render-record`: draw-call recording backend with JSON export

pub use textflow_core::{
    error, style, traits, types, Align, BlockOptions, BlockRequest, CoordinateSpace, FlowError,
    Pipeline, Result,
};

#[cfg(feature = "measure-fixed")]
pub use textflow_measure_fixed as measure_fixed;

#[cfg(feature = "render-record")]
pub use textflow_render_record as render_record;
