//! Fixed Measurer - Deterministic advance-model metrics
//!
//! The most basic metric backend: every character advances by a fixed
//! fraction of the font size. No font files, no platform calls, identical
//! results everywhere. Good enough for coarse layout, and exactly what
//! tests want.

use textflow_core::error::{FlowError, Result};
use textflow_core::style::{FontSpec, FontWeight};
use textflow_core::traits::{GlyphShaper, TextMeasurer};
use textflow_core::types::{Metrics, ShapedGlyph, ShapedRun};

/// A measurer with a uniform per-character advance model.
///
/// Width is `chars × size × advance_ratio` (bold faces run a little
/// wider); height and ascent come from the font size alone, so an empty
/// or whitespace segment still reports the band height of its font.
pub struct FixedMeasurer {
    advance_ratio: f32,
    ascent_ratio: f32,
    height_ratio: f32,
}

impl FixedMeasurer {
    pub fn new() -> Self {
        Self {
            advance_ratio: 0.6,
            ascent_ratio: 0.8,
            height_ratio: 1.2,
        }
    }

    /// Override the per-character advance as a fraction of font size.
    pub fn with_advance_ratio(mut self, ratio: f32) -> Self {
        self.advance_ratio = ratio;
        self
    }

    fn weight_factor(weight: FontWeight) -> f32 {
        match weight {
            FontWeight::Bold | FontWeight::Heavy => 1.1,
            _ => 1.0,
        }
    }
}

impl Default for FixedMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for FixedMeasurer {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn measure(&self, text: &str, font: &FontSpec) -> Result<Metrics> {
        let advance = font.size * self.advance_ratio * Self::weight_factor(font.weight);
        Ok(Metrics {
            width: text.chars().count() as f32 * advance,
            height: font.size * self.height_ratio,
            ascent: font.size * self.ascent_ratio,
        })
    }
}

/// A shaper with the same advance model, one glyph per character.
///
/// Stands in for a real shaping engine where deterministic output matters
/// more than script correctness.
pub struct FixedShaper {
    advance_ratio: f32,
}

impl FixedShaper {
    pub fn new() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl Default for FixedShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphShaper for FixedShaper {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn shape(&self, text: &str, font: &FontSpec) -> Result<ShapedRun> {
        log::debug!("FixedShaper: shaping {} chars", text.chars().count());

        let advance = font.size * self.advance_ratio;
        let mut glyphs = Vec::new();
        let mut x = 0.0_f32;

        for (cluster, ch) in text.char_indices() {
            glyphs.push(ShapedGlyph {
                id: ch as u32,
                x,
                y: 0.0,
                advance,
                cluster: cluster as u32,
            });
            x += advance;
        }

        Ok(ShapedRun {
            glyphs,
            advance: x,
            ascent: font.size * 0.8,
            height: font.size * 1.2,
        })
    }
}

/// A shaper that always fails; exercises the measurement fallback path.
pub struct UnavailableShaper;

impl GlyphShaper for UnavailableShaper {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn shape(&self, _text: &str, _font: &FontSpec) -> Result<ShapedRun> {
        Err(FlowError::Render("shaping engine not available".into()))
    }

    fn supports_script(&self, _script: &str) -> bool {
        false
    }
}
