//! Textflow Core: styled segments in, positioned text out
//!
//! A block of rich text enters as a list of segments with overlapping style
//! specifications, and exits as draw calls against a canvas backend. This
//! crate holds the engine that makes that transformation deterministic.
//!
//! ## The Pipeline
//!
//! Every block follows the same journey:
//!
//! 1. **Style Resolution** - Scalar, sequence, mapping, and bundle
//!    specifications merge into one record per segment
//! 2. **Measurement** - Each styled segment gets a width and height,
//!    with complex scripts routed through a shaping collaborator
//! 3. **Wrapping** - Segments flow greedily into lines under a width budget
//! 4. **Layout** - Alignment and line spacing turn lines into absolute
//!    draw origins
//! 5. **Dispatch** - The renderer paints each segment, in order
//!
//! ## Build Your First Block
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use textflow_core::{BlockOptions, BlockRequest, Pipeline};
//! use textflow_core::style::{ResolvedStyle, StyleSpecs};
//! # use textflow_core::traits::*;
//! # use textflow_core::types::{DrawHandle, DrawRequest, Metrics};
//! # use textflow_core::style::FontSpec;
//! # struct MyMeasurer;
//! # impl TextMeasurer for MyMeasurer {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn measure(&self, _: &str, _: &FontSpec) -> textflow_core::Result<Metrics> { unimplemented!() }
//! # }
//! # struct MyCanvas;
//! # impl TextRenderer for MyCanvas {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn draw_text(&self, _: &DrawRequest<'_>) -> textflow_core::Result<DrawHandle> { unimplemented!() }
//! # }
//!
//! let pipeline = Pipeline::builder()
//!     .measurer(Arc::new(MyMeasurer))
//!     .renderer(Arc::new(MyCanvas))
//!     .build()?;
//!
//! let request = BlockRequest {
//!     x: 0.5,
//!     y: 0.5,
//!     segments: vec!["hello".into(), ", ".into(), "world".into()],
//!     specs: StyleSpecs::new().with("colors", textflow_core::style::RawSpec::Sequence(
//!         vec!["red".into(), "blue".into(), "green".into()],
//!     ))?,
//!     bundle: None,
//!     defaults: ResolvedStyle::default(),
//!     options: BlockOptions::default(),
//! };
//! let handles = pipeline.render_block(&request)?;
//! assert_eq!(handles.len(), 3);
//! # Ok::<(), textflow_core::FlowError>(())
//! ```
//!
//! ## The Traits That Power Everything
//!
//! Want to plug in your own canvas? Implement one of these:
//!
//! - [`traits::TextMeasurer`] - Where styled text gets its metrics
//! - [`traits::GlyphShaper`] - Where complex scripts get exact advances
//! - [`traits::TextRenderer`] - Where positioned segments become visible

pub mod error;
pub mod layout;
pub mod measure;
pub mod pipeline;
pub mod style;
pub mod traits;
pub mod wrap;

pub use error::{FlowError, Result};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use types::{Align, BlockOptions, BlockRequest, CoordinateSpace};

/// The data structures that flow between pipeline stages
pub mod types {
    use crate::error::Result;
    use crate::style::{
        classify_map, MapShape, RawSpec, ResolvedStyle, SpecKey, StyleBundle, StyleSpecs,
        StyleValue,
    };

    /// One atomic text fragment with its stable position in the block.
    ///
    /// The index is the identity used for every styling lookup; segments
    /// are never reordered, added, or removed past normalization.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Segment {
        pub index: usize,
        pub text: String,
    }

    /// Measured extent of one styled segment.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Metrics {
        pub width: f32,
        pub height: f32,
        /// Baseline to top of text; lines are assembled on a shared baseline.
        pub ascent: f32,
    }

    /// A glyph that knows exactly where it belongs
    #[derive(Debug, Clone, PartialEq)]
    pub struct ShapedGlyph {
        pub id: u32,
        pub x: f32,
        pub y: f32,
        pub advance: f32,
        pub cluster: u32,
    }

    /// What a shaping collaborator returns: glyphs plus run metrics.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ShapedRun {
        pub glyphs: Vec<ShapedGlyph>,
        pub advance: f32,
        pub ascent: f32,
        pub height: f32,
    }

    /// Alignment of lines (horizontal) or the whole block (vertical)
    /// relative to the anchor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum Align {
        #[default]
        Start,
        Center,
        End,
    }

    /// Which coordinate space the anchor lives in, passed through to the
    /// renderer untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum CoordinateSpace {
        #[default]
        Data,
        Axes,
        Figure,
    }

    /// Block-level layout options.
    #[derive(Debug, Clone, PartialEq)]
    pub struct BlockOptions {
        /// Wrap threshold; `None` or non-positive means no wrapping.
        pub box_width: Option<f32>,
        /// Line advance multiplier.
        pub linespacing: f32,
        /// Horizontal alignment of each line against the anchor.
        pub ha: Align,
        /// Vertical alignment of the whole block against the anchor.
        pub va: Align,
        /// Coordinate space selector forwarded to the renderer.
        pub space: CoordinateSpace,
        /// Draw order hint forwarded to the renderer.
        pub zorder: f32,
        /// Block rotation in degrees, applied by the renderer around the
        /// anchor; positions are computed in the unrotated frame.
        pub rotation: f32,
    }

    impl Default for BlockOptions {
        fn default() -> Self {
            Self {
                box_width: None,
                linespacing: 1.0,
                ha: Align::Start,
                va: Align::Center,
                space: CoordinateSpace::Data,
                zorder: 1.0,
                rotation: 0.0,
            }
        }
    }

    /// Everything one rendering call needs.
    #[derive(Debug, Clone, Default)]
    pub struct BlockRequest {
        pub x: f32,
        pub y: f32,
        pub segments: Vec<String>,
        pub specs: StyleSpecs,
        /// Whole-record styling; [`with_mapping`](Self::with_mapping) fills
        /// this slot when a positional mapping turns out to carry nested
        /// records.
        pub bundle: Option<StyleBundle>,
        pub defaults: ResolvedStyle,
        pub options: BlockOptions,
    }

    impl BlockRequest {
        /// Route a positional mapping to the slot its shape calls for.
        ///
        /// Nested-record values make it a style bundle (appended to any
        /// existing one); scalar values make it an index mapping for
        /// `name`; a mix is a configuration error. This is the
        /// [`classify_map`] auto-detection applied at the request surface.
        pub fn with_mapping(
            mut self,
            name: &str,
            entries: Vec<(SpecKey, StyleValue)>,
        ) -> Result<Self> {
            match classify_map(&entries)? {
                MapShape::Bundle => {
                    let detected = StyleBundle::from_raw(&entries)?;
                    match &mut self.bundle {
                        Some(existing) => existing.append(detected),
                        None => self.bundle = Some(detected),
                    }
                }
                MapShape::IndexMap => {
                    self.specs.insert(name, RawSpec::Map(entries))?;
                }
            }
            Ok(self)
        }
    }

    /// A segment with its absolute draw origin; terminal layout artifact.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PositionedSegment {
        pub segment: Segment,
        pub style: ResolvedStyle,
        /// Left edge of the segment on its line.
        pub x: f32,
        /// Baseline of the line the segment sits on.
        pub y: f32,
        pub width: f32,
    }

    /// One draw invocation handed to the renderer collaborator.
    #[derive(Debug, Clone)]
    pub struct DrawRequest<'a> {
        pub x: f32,
        pub y: f32,
        pub text: &'a str,
        pub style: &'a ResolvedStyle,
        pub space: CoordinateSpace,
        pub zorder: f32,
        /// Block rotation in degrees around `anchor`.
        pub rotation: f32,
        /// The caller-supplied anchor the block was laid out from.
        pub anchor: (f32, f32),
    }

    /// Opaque identifier of one drawn object, issued by the renderer.
    ///
    /// Callers keep these to manipulate or remove individual pieces later.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DrawHandle(pub u64);
}
