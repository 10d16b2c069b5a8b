//! Measurement adapter: one segment in, one set of metrics out
//!
//! Thin seam between the layout engine and the external measurement
//! collaborator. Text containing complex-script code points is routed
//! through the shaping collaborator first, because naive per-character
//! advances are wrong for scripts with conjuncts and reordering; when no
//! shaper is configured or shaping fails, the adapter falls back to direct
//! measurement with reduced precision rather than failing the block.

// this_file: crates/textflow-core/src/measure.rs

use std::sync::Arc;

use crate::error::{FlowError, Result};
use crate::style::ResolvedStyle;
use crate::traits::{GlyphShaper, TextMeasurer};
use crate::types::Metrics;

/// Script ranges that need a shaping engine for correct advances.
/// Devanagari, Devanagari Extended, and Vedic Extensions.
const COMPLEX_RANGES: [(u32, u32, &str); 3] = [
    (0x0900, 0x097F, "Devanagari"),
    (0xA8E0, 0xA8FF, "Devanagari"),
    (0x1CD0, 0x1CFF, "Devanagari"),
];

/// Script name of the first complex-script code point, if any.
pub fn complex_script(text: &str) -> Option<&'static str> {
    text.chars().find_map(|ch| {
        let code = ch as u32;
        COMPLEX_RANGES
            .iter()
            .find_map(|&(lo, hi, script)| (lo..=hi).contains(&code).then_some(script))
    })
}

/// Does this text contain code points from a complex script range?
pub fn needs_complex_shaping(text: &str) -> bool {
    complex_script(text).is_some()
}

/// Adapter over the measurement and shaping collaborators.
pub struct SegmentMeasurer {
    measurer: Arc<dyn TextMeasurer>,
    shaper: Option<Arc<dyn GlyphShaper>>,
}

impl SegmentMeasurer {
    pub fn new(measurer: Arc<dyn TextMeasurer>, shaper: Option<Arc<dyn GlyphShaper>>) -> Self {
        Self { measurer, shaper }
    }

    /// Measure one segment under its resolved style.
    ///
    /// Complex-script text is measured from the shaped advance when a
    /// shaper is available and claims the script. A shaping failure is a
    /// degraded path, not an error: it logs a warning and falls back to
    /// direct measurement. Measurement collaborator failures do propagate,
    /// as [`FlowError::Measure`] naming the collaborator.
    pub fn measure(&self, text: &str, style: &ResolvedStyle) -> Result<Metrics> {
        let font = style.font();

        if let Some(script) = complex_script(text) {
            match &self.shaper {
                Some(shaper) if shaper.supports_script(script) => {
                    match shaper.shape(text, &font) {
                        Ok(run) => {
                            return Ok(Metrics {
                                width: run.advance,
                                height: run.height,
                                ascent: run.ascent,
                            });
                        }
                        Err(err) => {
                            log::warn!(
                                "shaper {} failed for complex text, falling back to direct \
                                 measurement: {err}",
                                shaper.name()
                            );
                        }
                    }
                }
                Some(shaper) => {
                    log::debug!(
                        "shaper {} does not support {script}; measuring directly",
                        shaper.name()
                    );
                }
                None => {
                    log::debug!(
                        "complex script text measured without a shaper; metrics are approximate"
                    );
                }
            }
        }

        self.measurer
            .measure(text, &font)
            .map_err(|err| FlowError::Measure(format!("{}: {err}", self.measurer.name())))
    }
}
