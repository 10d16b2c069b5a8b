//! The engine that drives a block from style specs to draw calls

// this_file: crates/textflow-core/src/pipeline.rs

use std::sync::Arc;

use crate::error::{FlowError, Result};
use crate::layout::layout;
use crate::measure::SegmentMeasurer;
use crate::style::normalize;
use crate::traits::{GlyphShaper, TextMeasurer, TextRenderer};
use crate::types::{BlockRequest, DrawHandle, DrawRequest, PositionedSegment, Segment};
use crate::wrap::{wrap, MeasuredSegment};

/// Pipeline for styled text blocks: Resolve → Measure → Wrap → Layout → Draw
///
/// Stateless between calls: every invocation receives fresh inputs and
/// produces fresh outputs, single-threaded and synchronous from start to
/// finish.
///
/// ```ignore
/// use textflow_core::Pipeline;
///
/// let pipeline = Pipeline::builder()
///     .measurer(my_measurer)
///     .renderer(my_canvas)
///     .build()?;
///
/// let handles = pipeline.render_block(&request)?;
/// ```
pub struct Pipeline {
    measurer: SegmentMeasurer,
    renderer: Arc<dyn TextRenderer>,
}

impl Pipeline {
    /// Start building a new pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run every stage short of drawing: resolve styles, measure, wrap,
    /// and place each segment.
    pub fn layout_block(&self, request: &BlockRequest) -> Result<Vec<PositionedSegment>> {
        let count = request.segments.len();
        let styles = normalize(
            count,
            &request.defaults,
            &request.specs,
            request.bundle.as_ref(),
        )?;

        log::debug!("laying out {count} segments");

        // Each segment is measured exactly once; wrapping and alignment
        // both reuse the same metrics.
        let mut measured = Vec::with_capacity(count);
        for (index, (text, style)) in request.segments.iter().zip(styles).enumerate() {
            let metrics = self.measurer.measure(text, &style)?;
            measured.push(MeasuredSegment {
                segment: Segment {
                    index,
                    text: text.clone(),
                },
                style,
                metrics,
            });
        }

        let lines = wrap(measured, request.options.box_width);
        log::debug!("wrapped into {} lines", lines.len());

        Ok(layout(&lines, (request.x, request.y), &request.options))
    }

    /// The full pipeline: lay the block out, then draw each segment in
    /// original order.
    ///
    /// A failure drawing any segment aborts the whole call; no partial
    /// handle sequence is ever returned.
    pub fn render_block(&self, request: &BlockRequest) -> Result<Vec<DrawHandle>> {
        let positioned = self.layout_block(request)?;

        log::debug!(
            "dispatching {} segments to renderer {}",
            positioned.len(),
            self.renderer.name()
        );

        let mut handles = Vec::with_capacity(positioned.len());
        for seg in &positioned {
            let handle = self.renderer.draw_text(&DrawRequest {
                x: seg.x,
                y: seg.y,
                text: &seg.segment.text,
                style: &seg.style,
                space: request.options.space,
                zorder: request.options.zorder,
                rotation: request.options.rotation,
                anchor: (request.x, request.y),
            })?;
            handles.push(handle);
        }

        Ok(handles)
    }
}

/// Build pipelines piece by piece
///
/// A measurer and a renderer are required; the shaper is optional and only
/// consulted for complex-script text.
#[derive(Default)]
pub struct PipelineBuilder {
    measurer: Option<Arc<dyn TextMeasurer>>,
    shaper: Option<Arc<dyn GlyphShaper>>,
    renderer: Option<Arc<dyn TextRenderer>>,
}

impl PipelineBuilder {
    /// Start with a clean slate
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose who measures styled text
    pub fn measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self
    }

    /// Choose who shapes complex scripts (optional)
    pub fn shaper(mut self, shaper: Arc<dyn GlyphShaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    /// Choose who paints positioned segments
    pub fn renderer(mut self, renderer: Arc<dyn TextRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Create the pipeline, ready to run
    pub fn build(self) -> Result<Pipeline> {
        let measurer = self
            .measurer
            .ok_or_else(|| FlowError::config("no measurer configured"))?;
        let renderer = self
            .renderer
            .ok_or_else(|| FlowError::config("no renderer configured"))?;

        Ok(Pipeline {
            measurer: SegmentMeasurer::new(measurer, self.shaper),
            renderer,
        })
    }
}
