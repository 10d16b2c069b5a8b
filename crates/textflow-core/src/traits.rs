//! The contracts that bind the external collaborators together
//!
//! The engine itself never touches glyphs or pixels. Measurement, complex
//! script shaping, and the final painting all live behind these traits,
//! allowing you to swap implementations without touching layout code.
//!
//! ## The Players
//!
//! - [`TextMeasurer`] - Where styled text gets its width and height
//! - [`GlyphShaper`] - Where complex scripts get precise advances
//! - [`TextRenderer`] - Where positioned segments become visible

use crate::error::Result;
use crate::style::FontSpec;
use crate::types::{DrawHandle, DrawRequest, Metrics, ShapedRun};

/// Measures styled text for layout decisions.
///
/// Implementations typically wrap a font metrics provider or a canvas
/// backend. The engine asks once per segment; results feed both wrapping
/// and alignment, so a measurer must be deterministic for equal inputs.
pub trait TextMeasurer: Send + Sync {
    /// Who are you? Used for debugging and logging
    fn name(&self) -> &'static str;

    /// Measure one run of text under the given font.
    fn measure(&self, text: &str, font: &FontSpec) -> Result<Metrics>;
}

/// Shapes complex-script text into positioned glyphs.
///
/// Optional collaborator: the engine consults it only for text containing
/// script ranges registered as complex, and falls back to direct
/// measurement when shaping fails or no shaper is configured.
pub trait GlyphShaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Transform characters into positioned glyphs with exact advances.
    fn shape(&self, text: &str, font: &FontSpec) -> Result<ShapedRun>;

    /// Can you handle this script?
    fn supports_script(&self, _script: &str) -> bool {
        true // Optimistic by default
    }
}

/// Paints one positioned segment onto the target canvas.
///
/// Invoked once per segment in original order. The handle it returns is
/// whatever the backend uses to identify the drawn piece later; the engine
/// only collects handles and preserves their order.
pub trait TextRenderer: Send + Sync {
    /// Your renderer's signature
    fn name(&self) -> &'static str;

    /// Draw one segment and return a handle to the drawn object.
    fn draw_text(&self, request: &DrawRequest<'_>) -> Result<DrawHandle>;
}
