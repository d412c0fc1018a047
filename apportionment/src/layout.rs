use log::debug;

use crate::config::AllocationError;

/// A position on the drawing surface.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// The region the markers are arranged in. The width and the height must be positive.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> BoundingBox {
        BoundingBox {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn is_wide(&self) -> bool {
        self.width > self.height
    }
}

/// The branch thresholds of the grid heuristic.
///
/// The defaults are tuned for small legislative delegations (3 to 55 seats).
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct LayoutPolicy {
    /// Below this count, markers are laid out on a single line.
    pub small_count: usize,
    /// Below this count, markers are laid out on two lines.
    pub pair_limit: usize,
    /// Cap on the markers per line when the box is more than twice as long as it is high.
    pub wide_cap: f64,
}

impl LayoutPolicy {
    pub const DEFAULT_POLICY: LayoutPolicy = LayoutPolicy {
        small_count: 4,
        pair_limit: 9,
        wide_cap: 100.0,
    };
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        LayoutPolicy::DEFAULT_POLICY
    }
}

/// The grid chosen for a number of markers.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Grid {
    pub rows: usize,
    pub columns: usize,
    /// If the last row is shorter than the others, it is shifted to be centered.
    pub centered_last_row: bool,
}

impl Grid {
    fn full(rows: usize, columns: usize) -> Grid {
        Grid {
            rows,
            columns,
            centered_last_row: false,
        }
    }
}

/// Arranges `count` markers of the given radius in a grid centered on the box.
///
/// The points are returned in row-major order: left to right, then top to
/// bottom. Neighbouring markers are exactly one diameter apart.
pub fn layout(
    count: usize,
    bounding_box: &BoundingBox,
    marker_radius: f64,
) -> Result<Vec<Point>, AllocationError> {
    layout_with_policy(
        count,
        bounding_box,
        marker_radius,
        &LayoutPolicy::DEFAULT_POLICY,
    )
}

pub fn layout_with_policy(
    count: usize,
    bounding_box: &BoundingBox,
    marker_radius: f64,
    policy: &LayoutPolicy,
) -> Result<Vec<Point>, AllocationError> {
    check_layout_inputs(bounding_box, marker_radius)?;
    if count == 0 {
        return Ok(Vec::new());
    }
    let grid = choose_grid(count, bounding_box, marker_radius, policy);
    debug!("layout: count: {:?} grid: {:?}", count, grid);
    Ok(place_markers(count, &grid, bounding_box, marker_radius))
}

fn check_layout_inputs(bounding_box: &BoundingBox, marker_radius: f64) -> Result<(), AllocationError> {
    if !(marker_radius.is_finite() && marker_radius > 0.0) {
        return Err(AllocationError::InvalidInput(format!(
            "marker radius must be positive, got {}",
            marker_radius
        )));
    }
    let bb = bounding_box;
    if !(bb.x.is_finite() && bb.y.is_finite()) {
        return Err(AllocationError::InvalidInput(format!(
            "bounding box origin is not finite: {:?}",
            bb
        )));
    }
    if !(bb.width.is_finite() && bb.height.is_finite() && bb.width > 0.0 && bb.height > 0.0) {
        return Err(AllocationError::InvalidInput(format!(
            "bounding box has no area: {:?}",
            bb
        )));
    }
    Ok(())
}

/// Picks the grid with the decision list below. The first matching rule wins.
///
/// 1. A perfect square that would overflow the width as a square grid is laid out as a square.
/// 2. Fewer than `small_count` markers: one row if the box is wide, one column otherwise.
/// 3. An even count below `pair_limit`: two rows (wide) or two columns (tall).
/// 4. An odd count below `pair_limit`: two rows, the last one centered.
/// 5. Otherwise the long axis gets as many markers as fit, capped at
///    `wide_cap` for very elongated boxes or at the square root of the count.
pub fn choose_grid(
    count: usize,
    bounding_box: &BoundingBox,
    marker_radius: f64,
    policy: &LayoutPolicy,
) -> Grid {
    if count == 0 {
        return Grid::full(0, 0);
    }
    let diameter = marker_radius * 2.0;
    let root = (count as f64).sqrt();
    let int_root = root.round() as usize;

    if int_root * int_root == count && bounding_box.width < diameter * root {
        return Grid::full(int_root, int_root);
    }

    if count < policy.small_count {
        return if bounding_box.is_wide() {
            Grid::full(1, count)
        } else {
            Grid::full(count, 1)
        };
    }

    if count < policy.pair_limit {
        if count % 2 == 0 {
            return if bounding_box.is_wide() {
                Grid::full(2, count / 2)
            } else {
                Grid::full(count / 2, 2)
            };
        }
        return Grid {
            rows: 2,
            columns: (count as f64 / 2.0).round() as usize,
            centered_last_row: true,
        };
    }

    let wide = bounding_box.width >= bounding_box.height;
    let (long, short) = if wide {
        (bounding_box.width, bounding_box.height)
    } else {
        (bounding_box.height, bounding_box.width)
    };
    let cap = if long > 2.0 * short {
        policy.wide_cap
    } else {
        root
    };
    let primary = ((long / diameter).min(cap).round() as usize).clamp(1, count);
    let columns = if wide {
        primary
    } else {
        ceil_div(count, primary)
    };
    Grid {
        rows: ceil_div(count, columns),
        columns,
        centered_last_row: true,
    }
}

fn ceil_div(a: usize, b: usize) -> usize {
    a / b + usize::from(a % b != 0)
}

fn place_markers(
    count: usize,
    grid: &Grid,
    bounding_box: &BoundingBox,
    marker_radius: f64,
) -> Vec<Point> {
    let diameter = marker_radius * 2.0;
    let center = bounding_box.center();
    let start_x = center.x - diameter * (grid.columns as f64 / 2.0 - 0.5);
    let start_y = center.y - diameter * (grid.rows as f64 / 2.0 - 0.5);

    let last_row = (count - 1) / grid.columns;
    let last_row_len = count - last_row * grid.columns;
    let last_row_shift = if grid.centered_last_row && last_row_len < grid.columns {
        marker_radius * (grid.columns - last_row_len) as f64
    } else {
        0.0
    };

    (0..count)
        .map(|idx| {
            let row = idx / grid.columns;
            let column = idx % grid.columns;
            let shift = if row == last_row { last_row_shift } else { 0.0 };
            Point::new(
                start_x + diameter * column as f64 + shift,
                start_y + diameter * row as f64,
            )
        })
        .collect()
}
