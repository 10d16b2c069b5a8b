//! Record Renderer - When you need to see what the layout really did
//!
//! Sometimes a canvas isn't enough—you need the raw draw calls.
//! This renderer captures every positioned segment as structured data
//! and serializes the whole record to JSON, perfect for asserting layout
//! behavior in tests or feeding draw calls into another system.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use textflow_core::error::{FlowError, Result};
use textflow_core::traits::TextRenderer;
use textflow_core::types::{CoordinateSpace, DrawHandle, DrawRequest};

/// Schema version for JSON output format
pub const JSON_SCHEMA_VERSION: &str = "1.0";

/// One captured draw call, flattened to plain data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawRecord {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: String,
    pub fontsize: f32,
    pub fontfamily: String,
    pub weight: String,
    pub style: String,
    pub underline: bool,
    pub background: Option<String>,
    pub alpha: f32,
    /// Block rotation plus the segment's own rotation, in degrees.
    pub rotation: f32,
    pub space: String,
    pub zorder: f32,
}

impl DrawRecord {
    fn from_request(request: &DrawRequest<'_>) -> Self {
        Self {
            x: request.x,
            y: request.y,
            text: request.text.to_string(),
            color: request.style.color.clone(),
            fontsize: request.style.fontsize,
            fontfamily: request.style.fontfamily.clone(),
            weight: format!("{:?}", request.style.fontweight),
            style: format!("{:?}", request.style.fontstyle),
            underline: request.style.underline,
            background: request.style.backgroundcolor.clone(),
            alpha: request.style.alpha,
            rotation: request.rotation + request.style.rotation,
            space: match request.space {
                CoordinateSpace::Data => "data".to_string(),
                CoordinateSpace::Axes => "axes".to_string(),
                CoordinateSpace::Figure => "figure".to_string(),
            },
            zorder: request.zorder,
        }
    }
}

/// Complete draw record in a debug-friendly format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutput {
    /// Schema version for forward compatibility
    pub schema_version: String,
    pub calls: Vec<DrawRecord>,
}

/// The renderer that turns draw calls into structured data
///
/// Unlike canvas renderers, this doesn't paint anything—it remembers.
/// Handles index into the captured call sequence, so a caller can map
/// each handle back to the exact call that produced it.
pub struct RecordRenderer {
    calls: Mutex<Vec<DrawRecord>>,
    fail_on_text: Option<String>,
}

impl RecordRenderer {
    /// Creates a renderer that records instead of painting
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_text: None,
        }
    }

    /// A renderer that rejects any segment whose text contains `needle`,
    /// for exercising abort-on-failure semantics.
    pub fn failing_on(needle: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_text: Some(needle.into()),
        }
    }

    /// Snapshot of every call captured so far, in draw order.
    pub fn calls(&self) -> Vec<DrawRecord> {
        self.lock().clone()
    }

    /// Look one captured call up by the handle it produced.
    pub fn call(&self, handle: DrawHandle) -> Option<DrawRecord> {
        self.lock().get(handle.0 as usize).cloned()
    }

    /// Serialize the whole record as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        let output = RecordOutput {
            schema_version: JSON_SCHEMA_VERSION.to_string(),
            calls: self.calls(),
        };
        serde_json::to_string_pretty(&output)
            .map_err(|e| FlowError::Render(format!("record serialization failed: {e}")))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DrawRecord>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for RecordRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer for RecordRenderer {
    fn name(&self) -> &'static str {
        "record"
    }

    fn draw_text(&self, request: &DrawRequest<'_>) -> Result<DrawHandle> {
        if let Some(needle) = &self.fail_on_text {
            if request.text.contains(needle.as_str()) {
                return Err(FlowError::Render(format!(
                    "renderer rejected segment {:?}",
                    request.text
                )));
            }
        }

        let mut calls = self.lock();
        calls.push(DrawRecord::from_request(request));
        log::trace!("recorded draw call #{}", calls.len() - 1);
        Ok(DrawHandle(calls.len() as u64 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textflow_core::style::ResolvedStyle;

    fn request<'a>(text: &'a str, style: &'a ResolvedStyle) -> DrawRequest<'a> {
        DrawRequest {
            x: 1.0,
            y: 2.0,
            text,
            style,
            space: CoordinateSpace::Data,
            zorder: 1.0,
            rotation: 0.0,
            anchor: (0.0, 0.0),
        }
    }

    #[test]
    fn handles_index_into_the_record() {
        let renderer = RecordRenderer::new();
        let style = ResolvedStyle::default();
        let a = renderer.draw_text(&request("a", &style)).unwrap();
        let b = renderer.draw_text(&request("b", &style)).unwrap();
        assert_eq!(a, DrawHandle(0));
        assert_eq!(b, DrawHandle(1));
        assert_eq!(renderer.call(b).unwrap().text, "b");
    }

    #[test]
    fn captures_style_fields() {
        let renderer = RecordRenderer::new();
        let style = ResolvedStyle {
            color: "red".to_string(),
            underline: true,
            alpha: 0.5,
            ..ResolvedStyle::default()
        };
        renderer.draw_text(&request("x", &style)).unwrap();
        let record = renderer.call(DrawHandle(0)).unwrap();
        assert_eq!(record.color, "red");
        assert!(record.underline);
        assert_eq!(record.alpha, 0.5);
    }

    #[test]
    fn segment_rotation_adds_to_block_rotation() {
        let renderer = RecordRenderer::new();
        let style = ResolvedStyle {
            rotation: 15.0,
            ..ResolvedStyle::default()
        };
        let mut req = request("x", &style);
        req.rotation = 30.0;
        renderer.draw_text(&req).unwrap();
        assert_eq!(renderer.call(DrawHandle(0)).unwrap().rotation, 45.0);
    }

    #[test]
    fn failure_injection_rejects_matching_text() {
        let renderer = RecordRenderer::failing_on("bad");
        let style = ResolvedStyle::default();
        assert!(renderer.draw_text(&request("fine", &style)).is_ok());
        assert!(renderer.draw_text(&request("a bad one", &style)).is_err());
        // The rejected call was not recorded
        assert_eq!(renderer.calls().len(), 1);
    }

    #[test]
    fn json_round_trips() {
        let renderer = RecordRenderer::new();
        let style = ResolvedStyle::default();
        renderer.draw_text(&request("hello", &style)).unwrap();

        let json = renderer.to_json().unwrap();
        let parsed: RecordOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.schema_version, JSON_SCHEMA_VERSION);
        assert_eq!(parsed.calls, renderer.calls());
    }
}
