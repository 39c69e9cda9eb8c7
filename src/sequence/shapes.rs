use std::f64::consts::TAU;

use super::CellOrder;
use crate::grid::{Cell, GridSize};

/// Distance used to decide which ring a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// `max(|dx|, |dy|)`: square rings.
    #[default]
    Chebyshev,
    /// `|dx| + |dy|`: diamond rings.
    Manhattan,
    /// Euclidean distance rounded to the nearest integer: round rings.
    Euclidean,
}

impl Metric {
    pub fn distance(self, dx: usize, dy: usize) -> usize {
        match self {
            Metric::Chebyshev => dx.max(dy),
            Metric::Manhattan => dx.saturating_add(dy),
            // Squaring in f64 keeps far-away centres from overflowing
            Metric::Euclidean => (dx as f64).hypot(dy as f64).round() as usize,
        }
    }
}

fn offset(from: usize, to: usize) -> usize {
    from.abs_diff(to)
}

/// Largest ring radius that still touches the grid, i.e. the distance from
/// `center` to the farthest corner.
fn reach(size: GridSize, center: (usize, usize), metric: Metric) -> usize {
    if size.is_empty() {
        return 0;
    }
    let dx = offset(center.0, 0).max(offset(center.0, size.cols - 1));
    let dy = offset(center.1, 0).max(offset(center.1, size.rows - 1));
    metric.distance(dx, dy)
}

/// The cells at exactly distance `radius` from `center`, clipped to the grid
/// and ordered clockwise starting north of the centre.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    size: GridSize,
    center: (usize, usize),
    radius: usize,
    metric: Metric,
}

impl Circle {
    /// `center` is a `(col, row)` pair and may lie outside the grid.
    pub fn new(size: GridSize, center: (usize, usize), radius: usize) -> Self {
        Circle {
            size,
            center,
            radius,
            metric: Metric::default(),
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    fn cells(&self) -> Vec<Cell> {
        if self.size.is_empty() {
            return Vec::new();
        }
        let (cx, cy) = self.center;
        let r = self.radius;
        let cols = cx.saturating_sub(r)..=cx.saturating_add(r).min(self.size.cols - 1);
        let rows = cy.saturating_sub(r)..=cy.saturating_add(r).min(self.size.rows - 1);

        let mut ring = rows
            .flat_map(|row| cols.clone().map(move |col| (col, row)))
            .filter(|&(col, row)| self.metric.distance(offset(col, cx), offset(row, cy)) == r)
            .map(|(col, row)| {
                let dx = col as f64 - cx as f64;
                let dy = row as f64 - cy as f64;
                // Clockwise angle from north, rows grow downwards
                let angle = dx.atan2(-dy).rem_euclid(TAU);
                (angle, self.size.ravel(col, row))
            })
            .collect::<Vec<_>>();
        ring.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ring.into_iter().map(|(_, cell)| cell).collect()
    }
}

impl CellOrder for Circle {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(self.cells().into_iter())
    }
}

/// Rings of increasing radius around a centre, from `min_radius` up to
/// `max_radius` in steps of the expansion rate. The radius is clamped at the
/// farthest grid corner, so an unbounded `max_radius` still terminates.
///
/// With [`ExpandingCircle::collapsing`] the same rings are produced from the
/// outside in.
#[derive(Debug, Clone, Copy)]
pub struct ExpandingCircle {
    size: GridSize,
    center: (usize, usize),
    min_radius: usize,
    max_radius: usize,
    expansion_rate: usize,
    metric: Metric,
    collapsing: bool,
}

impl ExpandingCircle {
    pub fn new(size: GridSize, center: (usize, usize), min_radius: usize, max_radius: usize) -> Self {
        ExpandingCircle {
            size,
            center,
            min_radius,
            max_radius,
            expansion_rate: 1,
            metric: Metric::default(),
            collapsing: false,
        }
    }

    /// Circle that starts at the centre and grows until it covers the grid.
    pub fn covering(size: GridSize, center: (usize, usize)) -> Self {
        Self::new(size, center, 0, usize::MAX)
    }

    /// A rate of zero is treated as one.
    pub fn with_expansion_rate(mut self, rate: usize) -> Self {
        self.expansion_rate = rate.max(1);
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn collapsing(mut self) -> Self {
        self.collapsing = true;
        self
    }

    fn radii(&self) -> Vec<usize> {
        let max = self.max_radius.min(reach(self.size, self.center, self.metric));
        if self.size.is_empty() || self.min_radius > max {
            return Vec::new();
        }
        let mut radii = (self.min_radius..=max)
            .step_by(self.expansion_rate)
            .collect::<Vec<_>>();
        if self.collapsing {
            radii.reverse();
        }
        radii
    }
}

impl CellOrder for ExpandingCircle {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(self.radii().into_iter().flat_map(move |radius| {
            Circle::new(self.size, self.center, radius)
                .with_metric(self.metric)
                .cells()
        }))
    }
}

/// Half-open cell rectangle, already clipped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    left: usize,
    top: usize,
    right: usize,
    bottom: usize,
}

impl Rect {
    fn contains(&self, col: usize, row: usize) -> bool {
        (self.left..self.right).contains(&col) && (self.top..self.bottom).contains(&row)
    }
}

/// A rectangle anchored at its top-left corner that grows to the right and/or
/// downwards by the expansion rate per step. Each step yields only the cells
/// that the larger rectangle newly covers, so every cell appears once.
///
/// Growth stops once `max_expansion` is exceeded or the rectangle no longer
/// grows inside the grid. [`ExpandingRectangle::collapsing`] yields the same
/// layers from the outermost one inwards.
#[derive(Debug, Clone, Copy)]
pub struct ExpandingRectangle {
    size: GridSize,
    left: usize,
    top: usize,
    width: usize,
    height: usize,
    expand_horizontally: bool,
    expand_vertically: bool,
    expansion_rate: usize,
    max_expansion: usize,
    collapsing: bool,
}

impl ExpandingRectangle {
    /// `(left, top)` is the anchor cell, `width x height` the initial extent.
    pub fn new(size: GridSize, (left, top): (usize, usize), width: usize, height: usize) -> Self {
        ExpandingRectangle {
            size,
            left,
            top,
            width,
            height,
            expand_horizontally: true,
            expand_vertically: true,
            expansion_rate: 1,
            max_expansion: usize::MAX,
            collapsing: false,
        }
    }

    pub fn expand_horizontally(mut self, enabled: bool) -> Self {
        self.expand_horizontally = enabled;
        self
    }

    pub fn expand_vertically(mut self, enabled: bool) -> Self {
        self.expand_vertically = enabled;
        self
    }

    /// A rate of zero is treated as one.
    pub fn with_expansion_rate(mut self, rate: usize) -> Self {
        self.expansion_rate = rate.max(1);
        self
    }

    /// Total growth per axis, in cells, after which expansion stops.
    pub fn with_max_expansion(mut self, max_expansion: usize) -> Self {
        self.max_expansion = max_expansion;
        self
    }

    pub fn collapsing(mut self) -> Self {
        self.collapsing = true;
        self
    }

    fn rect(&self, growth: usize) -> Rect {
        let width = self.width + if self.expand_horizontally { growth } else { 0 };
        let height = self.height + if self.expand_vertically { growth } else { 0 };
        let left = self.left.min(self.size.cols);
        let top = self.top.min(self.size.rows);
        Rect {
            left,
            top,
            right: self.left.saturating_add(width).min(self.size.cols),
            bottom: self.top.saturating_add(height).min(self.size.rows),
        }
    }

    /// Successive rectangles, each strictly larger than the previous one.
    fn steps(&self) -> Vec<Rect> {
        let mut steps = vec![self.rect(0)];
        let mut growth = 0usize;
        loop {
            growth = match growth.checked_add(self.expansion_rate) {
                Some(g) if g <= self.max_expansion => g,
                _ => break,
            };
            let next = self.rect(growth);
            if Some(&next) == steps.last() {
                break;
            }
            steps.push(next);
        }
        steps
    }

    fn layer(&self, rect: Rect, inner: Option<Rect>) -> impl Iterator<Item = Cell> + use<> {
        let size = self.size;
        (rect.top..rect.bottom)
            .flat_map(move |row| (rect.left..rect.right).map(move |col| (col, row)))
            .filter(move |&(col, row)| !inner.is_some_and(|inner| inner.contains(col, row)))
            .map(move |(col, row)| size.ravel(col, row))
    }
}

impl CellOrder for ExpandingRectangle {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        let steps = self.steps();
        let mut layers = (0..steps.len())
            .map(|i| (steps[i], i.checked_sub(1).map(|j| steps[j])))
            .collect::<Vec<_>>();
        if self.collapsing {
            layers.reverse();
        }
        Box::new(
            layers
                .into_iter()
                .flat_map(move |(rect, inner)| self.layer(rect, inner)),
        )
    }
}

/// Concentric rectangle outlines from the grid border inwards, each outline
/// walked clockwise from its top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct NestedRectangles {
    size: GridSize,
}

impl NestedRectangles {
    pub fn new(size: GridSize) -> Self {
        NestedRectangles { size }
    }

    fn outline(&self, depth: usize) -> Vec<Cell> {
        let (left, top) = (depth, depth);
        let right = self.size.cols - 1 - depth;
        let bottom = self.size.rows - 1 - depth;

        let mut coords = Vec::new();
        coords.extend((left..=right).map(|col| (col, top)));
        coords.extend((top + 1..=bottom).map(|row| (right, row)));
        if bottom > top {
            coords.extend((left..right).rev().map(|col| (col, bottom)));
        }
        if right > left {
            coords.extend((top + 1..bottom).rev().map(|row| (left, row)));
        }
        coords
            .into_iter()
            .map(|(col, row)| self.size.ravel(col, row))
            .collect()
    }
}

impl CellOrder for NestedRectangles {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        let depth = self.size.cols.min(self.size.rows).div_ceil(2);
        Box::new((0..depth).flat_map(move |d| self.outline(d)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(order: &dyn CellOrder) -> Vec<Cell> {
        let mut cells = order.iter().collect::<Vec<_>>();
        cells.sort_unstable();
        cells
    }

    #[test]
    fn test_metric_distance() {
        assert_eq!(Metric::Chebyshev.distance(3, 4), 4);
        assert_eq!(Metric::Manhattan.distance(3, 4), 7);
        assert_eq!(Metric::Euclidean.distance(3, 4), 5);
        // Centres far outside the grid
        let far = 1usize << 40;
        assert!(Metric::Euclidean.distance(far, far) > far);
        assert_eq!(Metric::Manhattan.distance(usize::MAX, 1), usize::MAX);
    }

    #[test]
    fn test_circle_ring() {
        let size = GridSize::new(5, 5);
        // Chebyshev ring of radius 1 around the centre, clockwise from north
        let ring = Circle::new(size, (2, 2), 1).iter().collect::<Vec<_>>();
        assert_eq!(ring, vec![7, 8, 13, 18, 17, 16, 11, 6]);
        assert_eq!(Circle::new(size, (2, 2), 0).iter().collect::<Vec<_>>(), vec![12]);
        let diamond = Circle::new(size, (2, 2), 1).with_metric(Metric::Manhattan);
        assert_eq!(diamond.iter().collect::<Vec<_>>(), vec![7, 13, 17, 11]);
    }

    #[test]
    fn test_circle_clipped() {
        let size = GridSize::new(3, 3);
        let ring = Circle::new(size, (0, 0), 1).iter().collect::<Vec<_>>();
        assert_eq!(ring, vec![1, 4, 3]);
    }

    #[test]
    fn test_expanding_circle_covers_grid_once() {
        for metric in [Metric::Chebyshev, Metric::Manhattan, Metric::Euclidean] {
            let size = GridSize::new(7, 4);
            let order = ExpandingCircle::covering(size, (1, 2)).with_metric(metric);
            assert_eq!(sorted(&order), (0..size.cells()).collect::<Vec<_>>());
            assert_eq!(sorted(&order.collapsing()), (0..size.cells()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_expanding_circle_bounds() {
        let size = GridSize::new(9, 9);
        let order = ExpandingCircle::new(size, (4, 4), 1, 2);
        let cells = order.iter().collect::<Vec<_>>();
        // Radius 1 and 2 rings, centre excluded
        assert_eq!(cells.len(), 8 + 16);
        assert!(!cells.contains(&size.cell(4, 4).unwrap()));
        // Rate 2 skips the radius-1 ring
        let sparse = ExpandingCircle::new(size, (4, 4), 0, 2).with_expansion_rate(2);
        assert_eq!(sparse.iter().count(), 1 + 16);
        // Collapsing starts at the outer ring
        let collapsing = ExpandingCircle::new(size, (4, 4), 0, 1).collapsing();
        assert_eq!(collapsing.iter().last(), Some(size.cell(4, 4).unwrap()));
        // Min above max yields nothing
        assert_eq!(ExpandingCircle::new(size, (4, 4), 3, 2).iter().count(), 0);
    }

    #[test]
    fn test_expanding_rectangle() {
        let size = GridSize::new(3, 3);
        let order = ExpandingRectangle::new(size, (0, 0), 1, 1);
        assert_eq!(order.iter().collect::<Vec<_>>(), vec![0, 1, 3, 4, 2, 5, 6, 7, 8]);
        assert_eq!(
            order.collapsing().iter().collect::<Vec<_>>(),
            vec![2, 5, 6, 7, 8, 1, 3, 4, 0]
        );
    }

    #[test]
    fn test_expanding_rectangle_limits() {
        let size = GridSize::new(4, 4);
        let capped = ExpandingRectangle::new(size, (0, 0), 1, 1).with_max_expansion(1);
        assert_eq!(sorted(&capped), vec![0, 1, 4, 5]);
        let horizontal = ExpandingRectangle::new(size, (0, 1), 1, 1).expand_vertically(false);
        assert_eq!(horizontal.iter().collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        let fixed = ExpandingRectangle::new(size, (0, 0), 2, 2)
            .expand_horizontally(false)
            .expand_vertically(false);
        assert_eq!(sorted(&fixed), vec![0, 1, 4, 5]);
        let outside = ExpandingRectangle::new(size, (9, 9), 1, 1);
        assert_eq!(outside.iter().count(), 0);
    }

    #[test]
    fn test_nested_rectangles() {
        let size = GridSize::new(4, 3);
        let cells = NestedRectangles::new(size).iter().collect::<Vec<_>>();
        assert_eq!(cells, vec![0, 1, 2, 3, 7, 11, 10, 9, 8, 4, 5, 6]);
        for (cols, rows) in [(1, 1), (1, 5), (5, 1), (6, 6), (7, 4)] {
            let size = GridSize::new(cols, rows);
            assert_eq!(
                sorted(&NestedRectangles::new(size)),
                (0..size.cells()).collect::<Vec<_>>()
            );
        }
    }
}
