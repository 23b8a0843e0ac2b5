//! Collision tests and movement resolution for yard geometry
//!
//! Pure functions only: circle-circle and circle-rect overlap checks, the
//! house's compound rectangular footprint, and the axis-at-a-time slide move
//! used by the critters that roam around obstacles.

use glam::Vec2;

use super::state::Tree;
use crate::consts::*;

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// True if the point lies strictly inside the rectangle
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Circle-circle overlap: center distance under the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Circle-rect overlap: clamp the circle center into the rectangle to find
/// the closest point, then compare squared distances
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.x, rect.x + rect.w),
        center.y.clamp(rect.y, rect.y + rect.h),
    );
    center.distance_squared(closest) < radius * radius
}

/// Lower rectangle of the house footprint (walls and door)
pub fn house_base() -> Rect {
    Rect::new(
        HOUSE_X,
        HOUSE_Y + HOUSE_SIZE * 0.4,
        HOUSE_SIZE,
        HOUSE_SIZE * 0.6,
    )
}

/// Roof rectangle, inset at the top of the footprint
pub fn house_roof() -> Rect {
    Rect::new(
        HOUSE_X + HOUSE_SIZE * 0.1,
        HOUSE_Y,
        HOUSE_SIZE * 0.8,
        HOUSE_SIZE * 0.45,
    )
}

pub fn house_center() -> Vec2 {
    Vec2::new(HOUSE_X + HOUSE_SIZE / 2.0, HOUSE_Y + HOUSE_SIZE / 2.0)
}

/// True if the point is inside either house rectangle. Breach checks use the
/// actor's center point, so a creature can brush the wall without ending the
/// game until its center crosses in.
#[inline]
pub fn inside_house(p: Vec2) -> bool {
    house_base().contains(p) || house_roof().contains(p)
}

/// True if a circle at `pos` overlaps the house or any tree
pub fn hits_obstruction(pos: Vec2, radius: f32, trees: &[Tree]) -> bool {
    if circle_rect_overlap(pos, radius, &house_base())
        || circle_rect_overlap(pos, radius, &house_roof())
    {
        return true;
    }
    trees
        .iter()
        .any(|t| circles_overlap(pos, radius, t.pos, TREE_SIZE / 2.0))
}

/// Move a circle by `delta`, resolving one axis at a time: apply X and revert
/// it on overlap, then the same for Y. A diagonal push can't clip through a
/// thin obstacle and the mover slides along walls instead of sticking.
pub fn slide_move(pos: Vec2, delta: Vec2, radius: f32, trees: &[Tree]) -> Vec2 {
    let mut next = pos;
    next.x += delta.x;
    if hits_obstruction(next, radius, trees) {
        next.x = pos.x;
    }
    next.y += delta.y;
    if hits_obstruction(next, radius, trees) {
        next.y = pos.y;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        // Overlapping: distance 10, radii sum 15
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(10.0, 0.0),
            5.0
        ));
        // Exactly touching is not an overlap
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(15.0, 0.0),
            5.0
        ));
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            3.0,
            Vec2::new(100.0, 0.0),
            3.0
        ));
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);

        // Center inside
        assert!(circle_rect_overlap(Vec2::new(120.0, 120.0), 5.0, &rect));
        // Beside the left edge, close enough to reach it
        assert!(circle_rect_overlap(Vec2::new(95.0, 125.0), 10.0, &rect));
        // Near the corner diagonally: closest point is (100,100),
        // distance ~7.07 > radius 5
        assert!(!circle_rect_overlap(Vec2::new(95.0, 95.0), 5.0, &rect));
        // Far away
        assert!(!circle_rect_overlap(Vec2::new(0.0, 0.0), 20.0, &rect));
    }

    #[test]
    fn test_house_footprint() {
        let center = house_center();
        assert!(inside_house(center));
        // Roof-only region: above the base rect but inside the roof
        assert!(inside_house(Vec2::new(center.x, HOUSE_Y + 10.0)));
        // Corner of the bounding square above the roof inset is open yard
        assert!(!inside_house(Vec2::new(HOUSE_X + 2.0, HOUSE_Y + 2.0)));
        assert!(!inside_house(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_slide_move_slides_along_tree() {
        let trees = vec![Tree {
            pos: Vec2::new(100.0, 100.0),
        }];
        // Pushing diagonally into the tree from the left: X is blocked,
        // Y still applies
        let start = Vec2::new(100.0 - TREE_SIZE / 2.0 - 10.0, 100.0);
        let next = slide_move(start, Vec2::new(8.0, 8.0), 10.0, &trees);
        assert_eq!(next.x, start.x);
        assert_eq!(next.y, start.y + 8.0);
    }

    #[test]
    fn test_slide_move_open_ground() {
        let next = slide_move(Vec2::new(50.0, 50.0), Vec2::new(3.0, -4.0), 10.0, &[]);
        assert_eq!(next, Vec2::new(53.0, 46.0));
    }

    #[test]
    fn test_hits_obstruction_house() {
        // Player-sized circle at the house center collides
        assert!(hits_obstruction(house_center(), 20.0, &[]));
        // Corner of the yard is open
        assert!(!hits_obstruction(Vec2::new(30.0, 30.0), 20.0, &[]));
    }
}
