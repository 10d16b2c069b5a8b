//! Alignment and placement of wrapped lines around an anchor
//!
//! Everything here works in the block's own unrotated coordinate frame
//! with y growing upward; rotation and coordinate-space transforms are the
//! renderer's business. Placement is a fold over the lines: each line's
//! vertical position depends on the accumulated heights of the lines above
//! it, and each segment's horizontal position on the widths before it.

// this_file: crates/textflow-core/src/layout.rs

use crate::types::{Align, BlockOptions, PositionedSegment};
use crate::wrap::Line;

/// Compute the absolute draw origin of every segment.
///
/// Lines share a baseline: each line's baseline sits its tallest ascent
/// below the line top, and successive lines advance downward by
/// `max_height * linespacing`. `va` aligns the whole block against the
/// anchor, `ha` aligns each line independently using its own width.
pub fn layout(lines: &[Line], anchor: (f32, f32), options: &BlockOptions) -> Vec<PositionedSegment> {
    let (x, y) = anchor;

    // Per-line vertical metrics, then the block height they sum to.
    let advances: Vec<(f32, f32)> = lines
        .iter()
        .map(|line| (line.max_ascent(), line.max_height() * options.linespacing))
        .collect();
    let block_height: f32 = advances.iter().map(|(_, adv)| adv).sum();

    let top_y = match options.va {
        Align::Start => y,
        Align::Center => y + block_height / 2.0,
        Align::End => y + block_height,
    };

    let mut positioned = Vec::new();
    let mut current_y = top_y;

    for (line, &(max_ascent, advance)) in lines.iter().zip(&advances) {
        let baseline_y = current_y - max_ascent;

        let line_width = line.width();
        let line_start_x = match options.ha {
            Align::Start => x,
            Align::Center => x - line_width / 2.0,
            Align::End => x - line_width,
        };

        let mut current_x = line_start_x;
        for seg in &line.segments {
            positioned.push(PositionedSegment {
                segment: seg.segment.clone(),
                style: seg.style.clone(),
                x: current_x,
                y: baseline_y,
                width: seg.metrics.width,
            });
            current_x += seg.metrics.width;
        }

        current_y -= advance;
    }

    positioned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ResolvedStyle;
    use crate::types::{Metrics, Segment};
    use crate::wrap::MeasuredSegment;

    fn line(widths: &[f32], start_index: usize) -> Line {
        Line {
            segments: widths
                .iter()
                .enumerate()
                .map(|(i, &w)| MeasuredSegment {
                    segment: Segment {
                        index: start_index + i,
                        text: format!("s{}", start_index + i),
                    },
                    style: ResolvedStyle::default(),
                    metrics: Metrics {
                        width: w,
                        height: 10.0,
                        ascent: 8.0,
                    },
                })
                .collect(),
        }
    }

    fn options() -> BlockOptions {
        BlockOptions {
            ha: Align::Start,
            va: Align::Start,
            linespacing: 1.0,
            ..BlockOptions::default()
        }
    }

    #[test]
    fn segments_pack_contiguously_left_to_right() {
        let lines = [line(&[3.0, 2.0, 4.0], 0)];
        let placed = layout(&lines, (100.0, 50.0), &options());
        let xs: Vec<f32> = placed.iter().map(|p| p.x).collect();
        assert_eq!(xs, [100.0, 103.0, 105.0]);
        // All on the shared baseline: top minus max ascent
        assert!(placed.iter().all(|p| p.y == 42.0));
    }

    #[test]
    fn center_alignment_offsets_each_line_by_its_own_width() {
        let lines = [line(&[4.0], 0), line(&[8.0], 1)];
        let placed = layout(
            &lines,
            (0.0, 0.0),
            &BlockOptions {
                ha: Align::Center,
                ..options()
            },
        );
        assert_eq!(placed[0].x, -2.0);
        assert_eq!(placed[1].x, -4.0);
    }

    #[test]
    fn end_alignment_puts_line_ends_at_the_anchor() {
        let lines = [line(&[4.0], 0), line(&[8.0], 1)];
        let placed = layout(
            &lines,
            (10.0, 0.0),
            &BlockOptions {
                ha: Align::End,
                ..options()
            },
        );
        assert_eq!(placed[0].x, 6.0);
        assert_eq!(placed[1].x, 2.0);
    }

    #[test]
    fn lines_advance_downward_by_spaced_height() {
        let lines = [line(&[1.0], 0), line(&[1.0], 1), line(&[1.0], 2)];
        let placed = layout(
            &lines,
            (0.0, 100.0),
            &BlockOptions {
                linespacing: 1.5,
                ..options()
            },
        );
        // Baselines: 100-8, then down 15 per line
        assert_eq!(placed[0].y, 92.0);
        assert_eq!(placed[1].y, 77.0);
        assert_eq!(placed[2].y, 62.0);
    }

    #[test]
    fn vertical_center_splits_the_block_around_the_anchor() {
        let lines = [line(&[1.0], 0), line(&[1.0], 1)];
        let placed = layout(
            &lines,
            (0.0, 0.0),
            &BlockOptions {
                va: Align::Center,
                ..options()
            },
        );
        // Block height 20, top at +10, baselines at 2 and -8
        assert_eq!(placed[0].y, 2.0);
        assert_eq!(placed[1].y, -8.0);
    }

    #[test]
    fn vertical_end_puts_the_block_above_the_anchor() {
        let lines = [line(&[1.0], 0), line(&[1.0], 1)];
        let placed = layout(
            &lines,
            (0.0, 0.0),
            &BlockOptions {
                va: Align::End,
                ..options()
            },
        );
        assert_eq!(placed[0].y, 12.0);
        assert_eq!(placed[1].y, 2.0);
    }

    #[test]
    fn empty_lines_produce_no_segments() {
        let placed = layout(&[Line::default()], (0.0, 0.0), &options());
        assert!(placed.is_empty());
    }
}
