//! Line and quadratic Bezier fitting
//!
//! Turns an interpolated boundary path into straight-line and quadratic
//! curve commands. The path is cut into runs of equal trajectory; each
//! run is fitted with a line first, then a quadratic curve, and split
//! recursively at the worst-fitting point when both exceed their error
//! margins.

use crate::interpolate::{Trajectory, TrajectoryArea, TrajectoryPoint};
use vectrace_core::BoundingBox;

/// A fitted path segment in image coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Curve {
        x1: f64,
        y1: f64,
        cx: f64,
        cy: f64,
        x2: f64,
        y2: f64,
    },
}

impl DrawCommand {
    pub fn end_point(&self) -> (f64, f64) {
        match *self {
            DrawCommand::Line { x2, y2, .. } => (x2, y2),
            DrawCommand::Curve { x2, y2, .. } => (x2, y2),
        }
    }
}

/// A fully fitted boundary with its scan metadata.
#[derive(Debug, Clone)]
pub struct OutlinedArea {
    pub commands: Vec<DrawCommand>,
    pub bounding_box: BoundingBox,
    pub child_holes: Vec<usize>,
    pub is_hole: bool,
}

/// Fit every run of the area's closed path into draw commands.
pub fn trace_area(area: &TrajectoryArea, line_margin: f64, curve_margin: f64) -> OutlinedArea {
    let mut path: Vec<TrajectoryPoint> = area.points.clone();
    if let Some(first) = path.first().cloned() {
        // Close the loop so the final run ends where the path began.
        path.push(first);
    }

    let mut commands = Vec::new();
    let mut run_start = 0;
    while run_start < path.len().saturating_sub(1) {
        let run_end = find_run_end(&path, run_start);
        fit_run(
            &path,
            run_start,
            run_end,
            line_margin,
            curve_margin,
            &mut commands,
        );
        run_start = run_end;
    }

    OutlinedArea {
        commands,
        bounding_box: area.bounding_box,
        child_holes: area.child_holes.clone(),
        is_hole: area.is_hole,
    }
}

/// End of the run of points carrying at most two distinct trajectories
/// starting at `start`. The returned index closes this run and opens the
/// next one. A run that would stop at the penultimate point is stretched
/// onto the closing point, which belongs to the last run whatever its
/// trajectory is.
fn find_run_end(path: &[TrajectoryPoint], start: usize) -> usize {
    let first_trajectory = path[start].data;
    let mut second_trajectory: Option<Trajectory> = None;
    let mut ix = start + 1;
    while ix < path.len() - 1 {
        let t = path[ix].data;
        if t != first_trajectory {
            match second_trajectory {
                None => second_trajectory = Some(t),
                Some(second) if t != second => break,
                Some(_) => {}
            }
        }
        ix += 1;
    }
    if ix == path.len() - 2 { ix + 1 } else { ix }
}

fn fit_run(
    path: &[TrajectoryPoint],
    start: usize,
    end: usize,
    line_margin: f64,
    curve_margin: f64,
    commands: &mut Vec<DrawCommand>,
) {
    if end <= start {
        return;
    }
    match fit_line(path, start, end, line_margin) {
        Ok(line) => commands.push(line),
        Err(worst_line_ix) => match fit_curve(path, start, end, curve_margin, worst_line_ix) {
            Ok(curve) => commands.push(curve),
            Err(_) => {
                // Neither primitive fits; split at the worst line deviation
                // and fit both halves independently.
                fit_run(path, start, worst_line_ix, line_margin, curve_margin, commands);
                fit_run(path, worst_line_ix, end, line_margin, curve_margin, commands);
            }
        },
    }
}

/// Straight line from `start` to `end`. On failure the index of the
/// worst-deviating interior point is returned for splitting.
fn fit_line(
    path: &[TrajectoryPoint],
    start: usize,
    end: usize,
    margin: f64,
) -> Result<DrawCommand, usize> {
    let p0 = &path[start];
    let p1 = &path[end];
    let steps = (end - start) as f64;
    let vx = (p1.x - p0.x) / steps;
    let vy = (p1.y - p0.y) / steps;

    let mut worst_ix = start;
    let mut worst_distance = 0.0;
    for ix in start + 1..end {
        let t = (ix - start) as f64;
        let px = p0.x + vx * t;
        let py = p0.y + vy * t;
        let distance =
            (path[ix].x - px) * (path[ix].x - px) + (path[ix].y - py) * (path[ix].y - py);
        if distance > worst_distance {
            worst_distance = distance;
            worst_ix = ix;
        }
    }

    if worst_distance > margin {
        return Err(worst_ix);
    }
    Ok(DrawCommand::Line {
        x1: p0.x,
        y1: p0.y,
        x2: p1.x,
        y2: p1.y,
    })
}

/// Quadratic Bezier forced through the run's worst line deviation. On
/// failure the index of the worst-deviating point against the curve is
/// returned.
fn fit_curve(
    path: &[TrajectoryPoint],
    start: usize,
    end: usize,
    margin: f64,
    through_ix: usize,
) -> Result<DrawCommand, usize> {
    let p0 = &path[start];
    let p1 = &path[end];
    let steps = (end - start) as f64;

    if through_ix <= start || through_ix >= end {
        // Degenerate run with no interior deviation, a line suffices.
        return Ok(DrawCommand::Line {
            x1: p0.x,
            y1: p0.y,
            x2: p1.x,
            y2: p1.y,
        });
    }

    // Solve the quadratic Bezier B(t) = (1-t)^2 P0 + 2(1-t)t C + t^2 P1
    // for the control point so that B(t1) hits the through point.
    let t1 = (through_ix - start) as f64 / steps;
    let t2 = 2.0 * (1.0 - t1) * t1;
    let t3 = (1.0 - t1) * (1.0 - t1);
    let t4 = t1 * t1;
    let cx = (t3 * p0.x + t4 * p1.x - path[through_ix].x) / -t2;
    let cy = (t3 * p0.y + t4 * p1.y - path[through_ix].y) / -t2;

    let mut worst_ix = start;
    let mut worst_curve_distance = 0.0;
    for ix in start + 1..end {
        let t = (ix - start) as f64 / steps;
        let u2 = 2.0 * (1.0 - t) * t;
        let u3 = (1.0 - t) * (1.0 - t);
        let u4 = t * t;
        let px = u3 * p0.x + u2 * cx + u4 * p1.x;
        let py = u3 * p0.y + u2 * cy + u4 * p1.y;
        let distance =
            (path[ix].x - px) * (path[ix].x - px) + (path[ix].y - py) * (path[ix].y - py);
        if distance > worst_curve_distance {
            worst_curve_distance = distance;
            worst_ix = ix;
        }
    }

    if worst_curve_distance > margin {
        return Err(worst_ix);
    }
    Ok(DrawCommand::Curve {
        x1: p0.x,
        y1: p0.y,
        cx,
        cy,
        x2: p1.x,
        y2: p1.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectrace_core::Point;

    fn area_from(points: Vec<(f64, f64, Trajectory)>) -> TrajectoryArea {
        TrajectoryArea {
            points: points
                .into_iter()
                .map(|(x, y, t)| Point::new(x, y, t))
                .collect(),
            bounding_box: BoundingBox::new(0.0, 0.0, 4.0, 4.0),
            child_holes: Vec::new(),
            is_hole: false,
        }
    }

    fn square_path() -> TrajectoryArea {
        area_from(vec![
            (0.0, 0.0, Trajectory::Right),
            (2.0, 0.0, Trajectory::Right),
            (4.0, 0.0, Trajectory::Down),
            (4.0, 2.0, Trajectory::Down),
            (4.0, 4.0, Trajectory::Left),
            (2.0, 4.0, Trajectory::Left),
            (0.0, 4.0, Trajectory::Up),
            (0.0, 2.0, Trajectory::Up),
        ])
    }

    #[test]
    fn test_square_splits_into_four_lines() {
        // Runs span two trajectories, so each one covers a corner. With
        // tight margins the corner curve fails and the run splits into
        // its two straight sides.
        let outlined = trace_area(&square_path(), 0.1, 0.1);
        assert_eq!(outlined.commands.len(), 4);
        for command in &outlined.commands {
            assert!(matches!(command, DrawCommand::Line { .. }));
        }
        // Commands chain back to the path start.
        assert_eq!(outlined.commands[3].end_point(), (0.0, 0.0));
    }

    #[test]
    fn test_square_loose_margin_fits_two_curves() {
        let outlined = trace_area(&square_path(), 1.0, 1.0);
        assert_eq!(outlined.commands.len(), 2);
        for command in &outlined.commands {
            assert!(matches!(command, DrawCommand::Curve { .. }));
        }
    }

    fn arc_path() -> TrajectoryArea {
        // A shallow arch going up and coming back down.
        area_from(vec![
            (0.0, 0.0, Trajectory::DownRight),
            (1.0, 1.0, Trajectory::DownRight),
            (2.0, 2.0, Trajectory::Right),
            (3.0, 2.0, Trajectory::UpRight),
            (4.0, 1.0, Trajectory::UpRight),
            (5.0, 0.0, Trajectory::Left),
        ])
    }

    #[test]
    fn test_curve_passes_near_bulge() {
        let outlined = trace_area(&arc_path(), 0.1, 100.0);
        assert!(
            outlined
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Curve { .. }))
        );
    }

    #[test]
    fn test_margin_monotonicity() {
        let tight = trace_area(&arc_path(), 0.01, 0.01);
        let loose = trace_area(&arc_path(), 1000.0, 1000.0);
        assert!(tight.commands.len() >= loose.commands.len());
    }

    #[test]
    fn test_refitting_sampled_output_is_idempotent() {
        let first = trace_area(&square_path(), 0.1, 0.1);

        // Sample each fitted line at unit steps and refit the samples.
        let mut sampled: Vec<(f64, f64)> = Vec::new();
        for command in &first.commands {
            let DrawCommand::Line { x1, y1, x2, y2 } = *command else {
                panic!("square fits with lines only");
            };
            let steps = ((x2 - x1).abs() + (y2 - y1).abs()) as usize;
            for step in 0..steps {
                let t = step as f64 / steps as f64;
                sampled.push((x1 + (x2 - x1) * t, y1 + (y2 - y1) * t));
            }
        }
        let points = (0..sampled.len())
            .map(|ix| {
                let (x, y) = sampled[ix];
                let (nx, ny) = sampled[(ix + 1) % sampled.len()];
                Point::new(x, y, crate::interpolate::trajectory(x, y, nx, ny))
            })
            .collect();
        let resampled = TrajectoryArea {
            points,
            bounding_box: first.bounding_box,
            child_holes: Vec::new(),
            is_hole: false,
        };

        let second = trace_area(&resampled, 0.1, 0.1);
        assert_eq!(first.commands, second.commands);
    }

    #[test]
    fn test_metadata_carried_over() {
        let mut area = square_path();
        area.child_holes = vec![2, 5];
        area.is_hole = true;
        let outlined = trace_area(&area, 1.0, 1.0);
        assert_eq!(outlined.child_holes, vec![2, 5]);
        assert!(outlined.is_hole);
        assert_eq!(outlined.bounding_box, BoundingBox::new(0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn test_empty_area() {
        let area = area_from(Vec::new());
        let outlined = trace_area(&area, 1.0, 1.0);
        assert!(outlined.commands.is_empty());
    }
}
