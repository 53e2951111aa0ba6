//! Manufacturability analyses built on top of the geometry kernel and the
//! spatial indices: sharp interior angles, narrow edge-to-edge spacing, and
//! edge intersections (self- and cross-polygon).

mod intersection;
mod narrow_spacing;
mod sharp_angle;

pub use intersection::{find_intersections, find_intersections_sweep_line, IntersectionRecord};
pub use narrow_spacing::{find_narrow_spacing, SpacingRecord};
pub use sharp_angle::{find_sharp_angles, SharpAngleRecord};
