//! Greedy line wrapping under a running width budget

// this_file: crates/textflow-core/src/wrap.rs

use crate::style::ResolvedStyle;
use crate::types::{Metrics, Segment};

/// One segment with its resolved style and measured extent.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredSegment {
    pub segment: Segment,
    pub style: ResolvedStyle,
    pub metrics: Metrics,
}

/// An ordered run of measured segments that fit one width budget.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub segments: Vec<MeasuredSegment>,
}

impl Line {
    /// Sum of member widths; segments sit contiguously with no extra gap.
    pub fn width(&self) -> f32 {
        self.segments.iter().map(|s| s.metrics.width).sum()
    }

    /// Tallest ascent in the line; the shared baseline sits this far
    /// below the line top.
    pub fn max_ascent(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.metrics.ascent)
            .fold(0.0, f32::max)
    }

    /// Tallest member height; the line band before spacing is applied.
    pub fn max_height(&self) -> f32 {
        self.segments
            .iter()
            .map(|s| s.metrics.height)
            .fold(0.0, f32::max)
    }
}

/// Flow segments into lines with a greedy width accumulator.
///
/// Segments are atomic: one wider than the budget lands alone on its own
/// line rather than being split. The tie-break is inclusive: a segment
/// that exactly exhausts the remaining budget stays on the current line.
/// `None` or a non-positive budget disables wrapping entirely.
pub fn wrap(segments: Vec<MeasuredSegment>, max_width: Option<f32>) -> Vec<Line> {
    let budget = match max_width {
        Some(w) if w > 0.0 => w,
        _ => {
            // No-wrap mode: everything on a single line, in order
            return vec![Line { segments }];
        }
    };

    let mut lines = Vec::new();
    let mut current = Line::default();
    let mut acc = 0.0_f32;

    for seg in segments {
        let w = seg.metrics.width;
        if acc + w > budget && !current.segments.is_empty() {
            lines.push(std::mem::take(&mut current));
            acc = 0.0;
        }
        acc += w;
        current.segments.push(seg);
    }
    if !current.segments.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(index: usize, width: f32) -> MeasuredSegment {
        MeasuredSegment {
            segment: Segment {
                index,
                text: format!("s{index}"),
            },
            style: ResolvedStyle::default(),
            metrics: Metrics {
                width,
                height: 1.2,
                ascent: 0.8,
            },
        }
    }

    fn shape(lines: &[Line]) -> Vec<Vec<usize>> {
        lines
            .iter()
            .map(|l| l.segments.iter().map(|s| s.segment.index).collect())
            .collect()
    }

    #[test]
    fn no_budget_yields_single_line() {
        let lines = wrap(vec![seg(0, 3.0), seg(1, 3.0), seg(2, 3.0)], None);
        assert_eq!(shape(&lines), [vec![0, 1, 2]]);

        let lines = wrap(vec![seg(0, 3.0), seg(1, 3.0)], Some(0.0));
        assert_eq!(shape(&lines), [vec![0, 1]]);
    }

    #[test]
    fn greedy_accumulator_breaks_before_overflow() {
        // Three segments of width 3 against a budget of 5:
        // 0 fits (3), 0+1 would be 6 > 5 so 1 opens line two, 1+2 is 6 > 5
        // so 2 opens line three.
        let lines = wrap(vec![seg(0, 3.0), seg(1, 3.0), seg(2, 3.0)], Some(5.0));
        assert_eq!(shape(&lines), [vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn pair_fits_when_budget_allows() {
        let lines = wrap(vec![seg(0, 3.0), seg(1, 3.0), seg(2, 3.0)], Some(6.5));
        assert_eq!(shape(&lines), [vec![0, 1], vec![2]]);
    }

    #[test]
    fn exact_fit_stays_on_the_line() {
        // Inclusive tie-break: 3 + 3 == 6 fits a budget of exactly 6.
        let lines = wrap(vec![seg(0, 3.0), seg(1, 3.0), seg(2, 3.0)], Some(6.0));
        assert_eq!(shape(&lines), [vec![0, 1], vec![2]]);
    }

    #[test]
    fn oversized_segment_is_forced_alone() {
        let lines = wrap(vec![seg(0, 2.0), seg(1, 9.0), seg(2, 2.0)], Some(5.0));
        assert_eq!(shape(&lines), [vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn oversized_first_segment_still_emits() {
        let lines = wrap(vec![seg(0, 9.0)], Some(5.0));
        assert_eq!(shape(&lines), [vec![0]]);
    }

    #[test]
    fn wrapping_a_fitting_line_is_idempotent() {
        let segments = vec![seg(0, 1.0), seg(1, 2.0), seg(2, 1.5)];
        let unwrapped = wrap(segments.clone(), None);
        let wrapped = wrap(segments, Some(10.0));
        assert_eq!(unwrapped, wrapped);
    }

    #[test]
    fn empty_segment_is_a_zero_width_spacer() {
        let lines = wrap(vec![seg(0, 3.0), seg(1, 0.0), seg(2, 3.0)], Some(6.0));
        assert_eq!(shape(&lines), [vec![0, 1, 2]]);
    }

    #[test]
    fn partition_is_exact_and_ordered() {
        let widths = [2.0, 4.0, 1.0, 3.0, 3.0, 2.0];
        let segments: Vec<_> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| seg(i, w))
            .collect();
        let lines = wrap(segments, Some(5.0));
        let flattened: Vec<usize> = shape(&lines).into_iter().flatten().collect();
        assert_eq!(flattened, [0, 1, 2, 3, 4, 5]);
    }
}
