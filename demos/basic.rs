//! Watch Textflow lay a styled block out - the simplest possible way
//!
//! This example shows the pipeline in action: segments and style specs go
//! in, resolved styles merge, lines wrap, and a recording canvas captures
//! every draw call as JSON. No real canvas required.

use std::sync::Arc;

use textflow::measure_fixed::FixedMeasurer;
use textflow::render_record::RecordRenderer;
use textflow::style::{RawSpec, StyleBundle, StyleSpecs};
use textflow::{Align, BlockOptions, BlockRequest, Pipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // A recording canvas stands in for a real drawing backend
    let canvas = Arc::new(RecordRenderer::new());

    let pipeline = Pipeline::builder()
        .measurer(Arc::new(FixedMeasurer::new()))
        .renderer(canvas.clone())
        .build()?;

    // One color per segment, sequence form; short sequences would extend
    let rainbow = BlockRequest {
        x: 0.5,
        y: 0.5,
        segments: "Rainbow".chars().map(String::from).collect(),
        specs: StyleSpecs::new().with(
            "colors",
            RawSpec::Sequence(vec![
                "red".into(),
                "orange".into(),
                "gold".into(),
                "green".into(),
                "blue".into(),
                "indigo".into(),
                "violet".into(),
            ]),
        )?,
        options: BlockOptions {
            ha: Align::Center,
            ..BlockOptions::default()
        },
        ..BlockRequest::default()
    };

    println!("Laying out {} segments...", rainbow.segments.len());
    let handles = pipeline.render_block(&rainbow)?;
    println!("  Drew {} pieces", handles.len());

    // Whole-record styling through a bundle, with wrapping
    let headline = BlockRequest {
        x: 0.0,
        y: 1.0,
        segments: vec!["TechCorp Inc.".into(), " (General Public)".into()],
        bundle: Some(
            StyleBundle::new()
                .with(
                    0,
                    vec![
                        ("size", 11.into()),
                        ("weight", "bold".into()),
                        ("color", "#2C4A6E".into()),
                    ],
                )?
                .with(
                    1,
                    vec![
                        ("size", 8.into()),
                        ("weight", "normal".into()),
                        ("color", "#556B2F".into()),
                    ],
                )?,
        ),
        options: BlockOptions {
            box_width: Some(120.0),
            ha: Align::Center,
            va: Align::Center,
            ..BlockOptions::default()
        },
        ..BlockRequest::default()
    };

    pipeline.render_block(&headline)?;

    println!("Captured draw calls:\n{}", canvas.to_json()?);
    Ok(())
}
