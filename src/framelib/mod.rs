//! Local reference frames tied to the ellipsoid

pub mod enu;

pub use enu::{east_north_up_to_fixed_frame, EnuFrame};
