//! Contour pipeline regression tests
//!
//! Drives a clustered color index through raster building, scanning,
//! interpolation and fitting, checking contour closure and nesting.

use rand::SeedableRng;
use rand::rngs::StdRng;
use vectrace_color::{ClusterOptions, ColorIndex, build_color_index};
use vectrace_core::{Rgba, RgbaBuffer};
use vectrace_trace::{
    InterpolationMode, build_all_rasters, build_raster_for_color, interpolate, scan_areas,
    trace_area,
};

const WHITE: Rgba = Rgba::opaque(255, 255, 255);
const BLACK: Rgba = Rgba::opaque(0, 0, 0);

fn index_for(image: &RgbaBuffer, palette: &[Rgba]) -> ColorIndex {
    let mut rng = StdRng::seed_from_u64(9);
    let mut palette = palette.to_vec();
    let options = ClusterOptions {
        cycles: 1,
        ..ClusterOptions::default()
    };
    build_color_index(image, &mut palette, &options, &mut rng).unwrap()
}

/// 8x8 white image with a 4x4 black block in the middle.
fn block_index() -> ColorIndex {
    let mut image = RgbaBuffer::filled(8, 8, WHITE);
    image.fill_rect(2, 2, 4, 4, BLACK);
    index_for(&image, &[WHITE, BLACK])
}

#[test]
fn test_contours_close_on_their_first_point() {
    let index = block_index();
    for color in 0..2 {
        let mut raster = build_raster_for_color(&index, color);
        let areas = scan_areas(&mut raster, 0).unwrap();
        assert!(!areas.is_empty());
        for area in &areas {
            assert!(area.points.len() >= 4);
            // The walk terminates by coming back to where it started;
            // the first point is not duplicated at the end.
            let first = &area.points[0];
            let last = area.points.last().unwrap();
            assert!((first.x, first.y) != (last.x, last.y));
        }
    }
}

#[test]
fn test_block_nests_inside_background_hole() {
    let index = block_index();

    let mut white_raster = build_raster_for_color(&index, 0);
    let white_areas = scan_areas(&mut white_raster, 0).unwrap();
    assert_eq!(white_areas.len(), 2);
    assert!(!white_areas[0].is_hole);
    assert!(white_areas[1].is_hole);
    assert_eq!(white_areas[0].child_holes, vec![1]);

    let mut black_raster = build_raster_for_color(&index, 1);
    let black_areas = scan_areas(&mut black_raster, 0).unwrap();
    assert_eq!(black_areas.len(), 1);
    assert!(!black_areas[0].is_hole);
}

#[test]
fn test_batch_rasters_trace_like_single_rasters() {
    let index = block_index();
    let mut batch = build_all_rasters(&index, 2);

    for (color, raster) in batch.iter_mut().enumerate() {
        let mut single = build_raster_for_color(&index, color as i32);
        let batch_areas = scan_areas(raster, 0).unwrap();
        let single_areas = scan_areas(&mut single, 0).unwrap();
        assert_eq!(batch_areas.len(), single_areas.len());
        for (a, b) in batch_areas.iter().zip(&single_areas) {
            assert_eq!(a.points.len(), b.points.len());
            assert_eq!(a.is_hole, b.is_hole);
        }
    }
}

#[test]
fn test_full_chain_produces_closed_commands() {
    let index = block_index();
    let mut raster = build_raster_for_color(&index, 1);
    let areas = scan_areas(&mut raster, 0).unwrap();
    let interpolated = interpolate(InterpolationMode::Interpolate, areas, true);

    for area in &interpolated {
        let outlined = trace_area(area, 1.0, 1.0);
        assert!(!outlined.commands.is_empty());
        let start = match outlined.commands[0] {
            vectrace_trace::DrawCommand::Line { x1, y1, .. } => (x1, y1),
            vectrace_trace::DrawCommand::Curve { x1, y1, .. } => (x1, y1),
        };
        assert_eq!(outlined.commands.last().unwrap().end_point(), start);
    }
}

#[test]
fn test_interpolation_halves_grid_offsets() {
    let index = block_index();
    let mut raster = build_raster_for_color(&index, 1);
    let areas = scan_areas(&mut raster, 0).unwrap();
    let interpolated = interpolate(InterpolationMode::Interpolate, areas, false);

    // Midpoints of integer-grid neighbors land on half-integers.
    for area in &interpolated {
        for point in &area.points {
            assert_eq!((point.x * 2.0).fract(), 0.0);
            assert_eq!((point.y * 2.0).fract(), 0.0);
        }
    }
}
