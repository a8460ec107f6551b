//! Contour walk over an edge raster
//!
//! The walk is a finite-state machine: the current edge code and walk
//! direction index a fixed transition table giving the replacement code
//! for the visited cell, the next direction, and the step to take.
//! Keeping the table as one const array keeps the state machine auditable
//! and testable in isolation.
//!
//! Visited cells are overwritten with their replacement code, so a cell
//! is never traversed twice and the raster must not be read concurrently
//! once scanning starts.

use crate::edge::EdgeRaster;
use crate::error::{TraceError, TraceResult};
use vectrace_core::{BoundingBox, Point};

/// A boundary point tagged with the edge code of its cell.
pub type EdgePoint = Point<i8>;

/// A closed boundary path found by the scanner.
#[derive(Debug, Clone)]
pub struct EdgeArea {
    pub points: Vec<EdgePoint>,
    pub bounding_box: BoundingBox,
    /// Indices of hole paths nested inside this path, within the same
    /// color layer's area list.
    pub child_holes: Vec<usize>,
    pub is_hole: bool,
}

/// Walk directions: 0 right, 1 up, 2 left, 3 down.
type Transition = [i8; 4]; // [next_code, next_direction, dx, dy]

const INVALID: Transition = [-1, -1, -1, -1];

/// `SCAN_TABLE[code][direction] = [next_code, next_direction, dx, dy]`.
/// Codes 0 and 15 have no valid transitions; hitting an invalid entry
/// means the raster was corrupted.
const SCAN_TABLE: [[Transition; 4]; 16] = [
    [INVALID, INVALID, INVALID, INVALID],
    [[0, 1, 0, -1], INVALID, INVALID, [0, 2, -1, 0]],
    [INVALID, INVALID, [0, 1, 0, -1], [0, 0, 1, 0]],
    [[0, 0, 1, 0], INVALID, [0, 2, -1, 0], INVALID],
    [INVALID, [0, 0, 1, 0], [0, 3, 0, 1], INVALID],
    [[13, 3, 0, 1], [13, 2, -1, 0], [7, 1, 0, -1], [7, 0, 1, 0]],
    [INVALID, [0, 1, 0, -1], INVALID, [0, 3, 0, 1]],
    [[0, 3, 0, 1], [0, 2, -1, 0], INVALID, INVALID],
    [[0, 3, 0, 1], [0, 2, -1, 0], INVALID, INVALID],
    [INVALID, [0, 1, 0, -1], INVALID, [0, 3, 0, 1]],
    [[11, 1, 0, -1], [14, 0, 1, 0], [14, 3, 0, 1], [11, 2, -1, 0]],
    [INVALID, [0, 0, 1, 0], [0, 3, 0, 1], INVALID],
    [[0, 0, 1, 0], INVALID, [0, 2, -1, 0], INVALID],
    [INVALID, INVALID, [0, 1, 0, -1], [0, 0, 1, 0]],
    [[0, 1, 0, -1], INVALID, INVALID, [0, 2, -1, 0]],
    [INVALID, INVALID, INVALID, INVALID],
];

/// Scan an edge raster into closed boundary paths.
///
/// The raster is consumed in place: visited cells are cleared so no
/// contour is walked twice. Paths shorter than `min_outline` points are
/// discarded entirely. Hole paths (seeded from code 11) are registered in
/// their parent's `child_holes`.
pub fn scan_areas(raster: &mut EdgeRaster, min_outline: usize) -> TraceResult<Vec<EdgeArea>> {
    let mut areas: Vec<EdgeArea> = Vec::new();

    for row in 0..raster.height() {
        for col in 0..raster.width() {
            let code = raster.get(row, col);
            // Codes 4 and 11 are the outward-corner seed types; everything
            // else is either interior or picked up along a walk.
            if code != 4 && code != 11 {
                continue;
            }

            let area = walk_contour(raster, row, col)?;
            if area.points.len() < min_outline {
                continue;
            }

            if area.is_hole {
                let hole_ix = areas.len();
                let parent_ix = find_parent(&area, &areas, raster.width(), raster.height());
                if let Some(parent) = areas.get_mut(parent_ix) {
                    parent.child_holes.push(hole_ix);
                }
            }
            areas.push(area);
        }
    }

    tracing::debug!(
        areas = areas.len(),
        holes = areas.iter().filter(|a| a.is_hole).count(),
        "scanned edge raster"
    );
    Ok(areas)
}

/// Follow one contour until it returns to its first point.
fn walk_contour(raster: &mut EdgeRaster, seed_row: usize, seed_col: usize) -> TraceResult<EdgeArea> {
    let mut px = seed_col as isize;
    let mut py = seed_row as isize;
    let mut direction: u8 = 1;

    let mut area = EdgeArea {
        points: Vec::new(),
        // Seeded at the padded coordinate; grown from unpadded points.
        bounding_box: BoundingBox::at(px as f64, py as f64),
        child_holes: Vec::new(),
        is_hole: raster.get(seed_row, seed_col) == 11,
    };

    loop {
        let code = raster.get(py as usize, px as usize);
        if !(0..16).contains(&code) {
            return Err(TraceError::InvalidEdgeTransition { code, direction });
        }

        // Record the padding-adjusted point before the transition.
        let x = (px - 1) as f64;
        let y = (py - 1) as f64;
        area.bounding_box.include(x, y);
        area.points.push(Point::new(x, y, code));

        let [next_code, next_direction, dx, dy] = SCAN_TABLE[code as usize][direction as usize];
        if next_direction < 0 {
            return Err(TraceError::InvalidEdgeTransition { code, direction });
        }

        // Clear the cell so it cannot be traversed again, then step.
        raster.set(py as usize, px as usize, next_code);
        direction = next_direction as u8;
        px += dx as isize;
        py += dy as isize;

        if (px - 1) as f64 == area.points[0].x && (py - 1) as f64 == area.points[0].y {
            break;
        }
    }

    Ok(area)
}

/// Find the parent path for a hole: the non-hole path with the smallest
/// bounding box that strictly contains the hole's bounding box and whose
/// polygon contains the hole's first point.
fn find_parent(hole: &EdgeArea, areas: &[EdgeArea], width: usize, height: usize) -> usize {
    let mut parent_ix = 0;
    let mut parent_bbox = BoundingBox::new(-1.0, -1.0, (width + 1) as f64, (height + 1) as f64);
    let first = &hole.points[0];

    for (candidate_ix, candidate) in areas.iter().enumerate() {
        if !candidate.is_hole
            && candidate.bounding_box.strictly_contains(&hole.bounding_box)
            && parent_bbox.strictly_contains(&candidate.bounding_box)
            && point_in_polygon(first.x, first.y, &candidate.points)
        {
            parent_ix = candidate_ix;
            parent_bbox = candidate.bounding_box;
        }
    }
    parent_ix
}

/// Even-odd ray-casting point-in-polygon test.
fn point_in_polygon(x: f64, y: f64, polygon: &[EdgePoint]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if ((pi.y > y) != (pj.y > y)) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
