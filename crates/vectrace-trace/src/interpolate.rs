//! Point interpolation and trajectory tagging
//!
//! Smooths the staircase boundary from the scanner by replacing each
//! point with the midpoint to its successor, and tags every emitted point
//! with the 8-way compass trajectory toward the following one. The
//! trajectory codes are what the path tracer segments on.

use crate::scan::{EdgeArea, EdgePoint};
use vectrace_core::{BoundingBox, Point};

/// 8-way compass direction between two consecutive path points.
///
/// Derived purely from the signs of dx/dy; a zero step yields [`Trajectory::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trajectory {
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    Up,
    UpRight,
    None,
}

/// Compass trajectory from `(x1, y1)` toward `(x2, y2)`.
pub fn trajectory(x1: f64, y1: f64, x2: f64, y2: f64) -> Trajectory {
    if x1 < x2 {
        if y1 < y2 {
            Trajectory::DownRight
        } else if y1 > y2 {
            Trajectory::UpRight
        } else {
            Trajectory::Right
        }
    } else if x1 > x2 {
        if y1 < y2 {
            Trajectory::DownLeft
        } else if y1 > y2 {
            Trajectory::UpLeft
        } else {
            Trajectory::Left
        }
    } else if y1 < y2 {
        Trajectory::Down
    } else if y1 > y2 {
        Trajectory::Up
    } else {
        Trajectory::None
    }
}

/// Point interpolation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Pass edge points through unchanged, only tagging trajectories.
    Off,
    /// Replace each point with the midpoint to its successor.
    #[default]
    Interpolate,
}

/// A trajectory-tagged path point.
pub type TrajectoryPoint = Point<Trajectory>;

/// A boundary path after interpolation.
#[derive(Debug, Clone)]
pub struct TrajectoryArea {
    pub points: Vec<TrajectoryPoint>,
    pub bounding_box: BoundingBox,
    pub child_holes: Vec<usize>,
    pub is_hole: bool,
}

/// Interpolate a color layer's paths, carrying over all area metadata.
pub fn interpolate(
    mode: InterpolationMode,
    areas: Vec<EdgeArea>,
    enhance_right_angles: bool,
) -> Vec<TrajectoryArea> {
    areas
        .into_iter()
        .map(|area| {
            let points = match mode {
                InterpolationMode::Off => pass_through_points(&area.points),
                InterpolationMode::Interpolate => {
                    build_interpolated_points(&area.points, enhance_right_angles)
                }
            };
            TrajectoryArea {
                points,
                bounding_box: area.bounding_box,
                child_holes: area.child_holes,
                is_hole: area.is_hole,
            }
        })
        .collect()
}

fn pass_through_points(edge_points: &[EdgePoint]) -> Vec<TrajectoryPoint> {
    (0..edge_points.len())
        .map(|ix| {
            let point = &edge_points[ix];
            let next = &edge_points[(ix + 1) % edge_points.len()];
            point.with_data(trajectory(point.x, point.y, next.x, next.y))
        })
        .collect()
}

fn build_interpolated_points(
    edge_points: &[EdgePoint],
    enhance_right_angles: bool,
) -> Vec<TrajectoryPoint> {
    let mut interpolated: Vec<TrajectoryPoint> = Vec::with_capacity(edge_points.len());

    for ix in 0..edge_points.len() {
        if enhance_right_angles && is_right_angle(edge_points, ix) {
            let corner = build_corner_point(edge_points, ix);
            // The previously emitted midpoint must aim at the corner
            // instead of skipping over it.
            retarget_last_point(&mut interpolated, &edge_points[ix]);
            interpolated.push(corner);
        }
        interpolated.push(midpoint_toward_next(edge_points, ix));
    }
    interpolated
}

/// Midpoint between point `ix` and its successor, with the trajectory
/// toward the following midpoint.
fn midpoint_toward_next(points: &[EdgePoint], ix: usize) -> TrajectoryPoint {
    let total = points.len();
    let current = &points[ix];
    let next = &points[(ix + 1) % total];
    let after_next = &points[(ix + 2) % total];

    let mid_x = (current.x + next.x) / 2.0;
    let mid_y = (current.y + next.y) / 2.0;
    let next_mid_x = (next.x + after_next.x) / 2.0;
    let next_mid_y = (next.y + after_next.y) / 2.0;
    Point::new(mid_x, mid_y, trajectory(mid_x, mid_y, next_mid_x, next_mid_y))
}

/// A right angle is five points on the outline: the corner and two edge
/// points in either direction sharing its x before and its y after (or
/// the other way around).
fn is_right_angle(points: &[EdgePoint], ix: usize) -> bool {
    let total = points.len();
    let current = &points[ix];
    let prev2 = &points[(ix + total - 2) % total];
    let prev1 = &points[(ix + total - 1) % total];
    let next1 = &points[(ix + 1) % total];
    let next2 = &points[(ix + 2) % total];

    (current.x == prev2.x && current.x == prev1.x && current.y == next1.y && current.y == next2.y)
        || (current.y == prev2.y
            && current.y == prev1.y
            && current.x == next1.x
            && current.x == next2.x)
}

/// Anchor at the original (un-midpointed) corner, aimed at the upcoming
/// midpoint.
fn build_corner_point(points: &[EdgePoint], ix: usize) -> TrajectoryPoint {
    let current = &points[ix];
    let next = &points[(ix + 1) % points.len()];
    let mid_x = (current.x + next.x) / 2.0;
    let mid_y = (current.y + next.y) / 2.0;
    Point::new(
        current.x,
        current.y,
        trajectory(current.x, current.y, mid_x, mid_y),
    )
}

fn retarget_last_point(points: &mut [TrajectoryPoint], corner: &EdgePoint) {
    if let Some(last) = points.last_mut() {
        last.data = trajectory(last.x, last.y, corner.x, corner.y);
    }
}
