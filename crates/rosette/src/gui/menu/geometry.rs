//! Pure hit-testing for the ring/sector layout. Everything here is
//! deterministic and side-effect free; the interaction state machine and the
//! renderer both derive their answers from these partitions.
//!
//! Angles are degrees in `[0, 360)`, 0° along +x, increasing clockwise in
//! screen space (y grows downward).

use crate::document::GlobalSize;

/// Pointer distances below this never activate anything, so a sloppy summon
/// does not immediately select a sector.
pub const DEAD_ZONE_RADIUS: f64 = 10.0;

/// Sector 0 is centered on this angle: 270° points at the top of the screen.
pub const SECTOR_REFERENCE_DEG: f64 = 270.0;

/// Angular width of one child wedge before `child_angle_multiplier`.
pub const CHILD_BASE_STEP_DEG: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub angle_deg: f64,
    pub distance: f64,
}

pub fn polar(center: Point, cursor: Point) -> Polar {
    let (dx, dy) = (cursor.x - center.x, cursor.y - center.y);
    Polar {
        angle_deg: dy.atan2(dx).to_degrees().rem_euclid(360.0),
        distance: dx.hypot(dy),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    Inner,
    Outer,
    None,
}

/// Radial bands of the menu, derived from the document's global sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    pub dead_zone: f64,
    pub radius: f64,
    pub ring_gap: f64,
    pub outer_ring_width: f64,
}

impl RingLayout {
    pub fn from_size(size: &GlobalSize) -> Self {
        Self {
            dead_zone: DEAD_ZONE_RADIUS,
            radius: size.radius,
            ring_gap: size.ring_gap,
            outer_ring_width: size.outer_ring_width,
        }
    }

    pub fn outer_inner_radius(&self) -> f64 {
        self.radius + self.ring_gap
    }

    pub fn outer_radius(&self) -> f64 {
        self.radius + self.ring_gap + self.outer_ring_width
    }

    /// The outer annulus only exists while a child fan is open.
    pub fn ring_at(&self, distance: f64, child_open: bool) -> Ring {
        if distance <= self.dead_zone {
            Ring::None
        } else if distance <= self.radius {
            Ring::Inner
        } else if child_open
            && distance > self.outer_inner_radius()
            && distance <= self.outer_radius()
        {
            Ring::Outer
        } else {
            Ring::None
        }
    }
}

/// Top-level sector partition: N contiguous closed-open spans of 360°/N,
/// sector 0 centered on `start_deg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorWheel {
    pub count: usize,
    pub start_deg: f64,
}

impl SectorWheel {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            start_deg: SECTOR_REFERENCE_DEG,
        }
    }

    pub fn with_reference(count: usize, start_deg: f64) -> Self {
        Self { count, start_deg }
    }

    pub fn step(&self) -> f64 {
        360.0 / self.count as f64
    }

    pub fn center_angle(&self, index: usize) -> f64 {
        (self.start_deg + index as f64 * self.step()).rem_euclid(360.0)
    }

    /// Each sector owns `[center - step/2, center + step/2)`; an angle on a
    /// shared boundary therefore belongs to the sector whose span starts
    /// there, and the wrap boundary belongs to sector 0. A zero-sector wheel
    /// (degenerate preset) never hits.
    pub fn hit(&self, angle_deg: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let step = self.step();
        let rel = (angle_deg - (self.start_deg - step / 2.0)).rem_euclid(360.0);
        let index = (rel / step).floor() as usize;
        // rel == 360.0 - epsilon can floor to count on fp noise
        Some(index.min(self.count - 1))
    }
}

/// Child wedges fan out around the parent sector's center angle rather than
/// splitting the whole circle, so small child counts keep comfortable hit
/// targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildFan {
    pub start_deg: f64,
    pub step_deg: f64,
    pub count: usize,
}

impl ChildFan {
    pub fn centered_on(center_deg: f64, count: usize, angle_multiplier: f64) -> Self {
        let step_deg = CHILD_BASE_STEP_DEG * angle_multiplier;
        let total = step_deg * count as f64;
        Self {
            start_deg: (center_deg - total / 2.0).rem_euclid(360.0),
            step_deg,
            count,
        }
    }

    pub fn total_arc(&self) -> f64 {
        self.step_deg * self.count as f64
    }

    pub fn child_start(&self, index: usize) -> f64 {
        (self.start_deg + index as f64 * self.step_deg).rem_euclid(360.0)
    }

    pub fn child_center(&self, index: usize) -> f64 {
        (self.start_deg + (index as f64 + 0.5) * self.step_deg).rem_euclid(360.0)
    }

    /// Closed-open spans like the sector wheel; angles outside the fan's
    /// total arc miss.
    pub fn hit(&self, angle_deg: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let rel = (angle_deg - self.start_deg).rem_euclid(360.0);
        let total = self.total_arc();
        if total >= 360.0 {
            let index = (rel / self.step_deg).floor() as usize;
            return Some(index.min(self.count - 1));
        }
        if rel >= total {
            None
        } else {
            Some((rel / self.step_deg).floor() as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_angle_is_clockwise_screen_space() {
        let center = Point::new(100.0, 100.0);
        // straight up on screen
        let up = polar(center, Point::new(100.0, 0.0));
        assert_eq!(up.angle_deg, 270.0);
        assert_eq!(up.distance, 100.0);
        // straight right
        let right = polar(center, Point::new(150.0, 100.0));
        assert_eq!(right.angle_deg, 0.0);
        // straight down
        let down = polar(center, Point::new(100.0, 160.0));
        assert_eq!(down.angle_deg, 90.0);
    }

    #[test]
    fn wheel_partitions_the_full_circle() {
        for count in [1usize, 2, 3, 4, 5, 8, 12] {
            let wheel = SectorWheel::new(count);
            let mut seen = vec![0usize; count];
            for tenth in 0..3600 {
                let angle = tenth as f64 * 0.1;
                let index = wheel.hit(angle).expect("every angle must hit a sector");
                assert!(index < count);
                seen[index] += 1;
            }
            // contiguous equal spans: every sector gets the same share
            let expected = 3600 / count;
            for hits in seen {
                assert!((hits as i64 - expected as i64).abs() <= 1);
            }
        }
    }

    #[test]
    fn boundary_angles_belong_to_the_starting_sector() {
        // 4 sectors referenced at 0°: spans [-45,45), [45,135), [135,225), [225,315)
        let wheel = SectorWheel::with_reference(4, 0.0);
        assert_eq!(wheel.hit(10.0), Some(0));
        assert_eq!(wheel.hit(44.999), Some(0));
        assert_eq!(wheel.hit(45.0), Some(1));
        assert_eq!(wheel.hit(135.0), Some(2));
        assert_eq!(wheel.hit(225.0), Some(3));
        // the wrap boundary resolves to the lowest index
        assert_eq!(wheel.hit(315.0), Some(0));
        assert_eq!(wheel.hit(359.9), Some(0));
    }

    #[test]
    fn default_reference_puts_sector_zero_at_the_top() {
        let wheel = SectorWheel::new(4);
        assert_eq!(wheel.hit(270.0), Some(0));
        assert_eq!(wheel.hit(0.0), Some(1));
        assert_eq!(wheel.hit(90.0), Some(2));
        assert_eq!(wheel.hit(180.0), Some(3));
        assert_eq!(wheel.center_angle(1), 0.0);
    }

    #[test]
    fn empty_wheel_never_hits() {
        let wheel = SectorWheel::new(0);
        for deg in 0..360 {
            assert_eq!(wheel.hit(deg as f64), None);
        }
    }

    #[test]
    fn dead_zone_blocks_activation_regardless_of_angle() {
        let layout = RingLayout::from_size(&GlobalSize::default());
        assert_eq!(layout.ring_at(5.0, false), Ring::None);
        assert_eq!(layout.ring_at(5.0, true), Ring::None);
        assert_eq!(layout.ring_at(DEAD_ZONE_RADIUS, false), Ring::None);
        assert_eq!(layout.ring_at(DEAD_ZONE_RADIUS + 0.1, false), Ring::Inner);
    }

    #[test]
    fn outer_ring_requires_an_open_child_fan() {
        let layout = RingLayout::from_size(&GlobalSize::default());
        // defaults: radius 150, gap 5, width 25
        assert_eq!(layout.ring_at(150.0, false), Ring::Inner);
        assert_eq!(layout.ring_at(160.0, false), Ring::None);
        assert_eq!(layout.ring_at(160.0, true), Ring::Outer);
        assert_eq!(layout.ring_at(180.0, true), Ring::Outer);
        assert_eq!(layout.ring_at(180.1, true), Ring::None);
        // the gap between the rings is inert even with children open
        assert_eq!(layout.ring_at(152.0, true), Ring::None);
    }

    #[test]
    fn child_fan_is_centered_on_the_parent() {
        let fan = ChildFan::centered_on(270.0, 2, 1.0);
        // two 25° wedges: [245, 270) and [270, 295)
        assert_eq!(fan.hit(250.0), Some(0));
        assert_eq!(fan.hit(270.0), Some(1));
        assert_eq!(fan.hit(269.999), Some(0));
        assert_eq!(fan.hit(294.0), Some(1));
        assert_eq!(fan.hit(295.0), None);
        assert_eq!(fan.hit(90.0), None);
        assert_eq!(fan.child_center(0), 257.5);
    }

    #[test]
    fn child_multiplier_widens_the_wedges() {
        let fan = ChildFan::centered_on(0.0, 3, 2.0);
        assert_eq!(fan.step_deg, 50.0);
        assert_eq!(fan.total_arc(), 150.0);
        // spans start at -75° == 285°
        assert_eq!(fan.hit(285.0), Some(0));
        assert_eq!(fan.hit(340.0), Some(1));
        assert_eq!(fan.hit(30.0), Some(2));
        assert_eq!(fan.hit(80.0), None);
    }

    #[test]
    fn wrapping_fan_covers_everything() {
        // 15 children at base step: 375° > full circle
        let fan = ChildFan::centered_on(0.0, 15, 1.0);
        for deg in 0..360 {
            let index = fan.hit(deg as f64).expect("wrapped fan covers all angles");
            assert!(index < 15);
        }
    }
}
