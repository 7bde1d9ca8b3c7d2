pub mod geometry;
pub mod model;
pub mod view;

pub use geometry::{ChildFan, Point, Ring, RingLayout, SectorWheel};
pub use model::{Phase, ReleaseOutcome, State};
pub use view::draw;

pub const LABEL_RADIUS_FACTOR: f64 = 0.6; // sector labels sit at this fraction of the radius
pub const LABEL_FONT_SIZE: f64 = 12.0;
pub const CHILD_FONT_SIZE: f64 = 11.0;
pub const DESCRIPTION_FONT_SIZE: f64 = 10.0;
pub const DESCRIPTION_OFFSET: f64 = 16.0; // below the outer edge
pub const HIGHLIGHT_MIX: f64 = 0.2; // child hover lightening
pub const SECTOR_LINE_WIDTH: f64 = 2.0;
