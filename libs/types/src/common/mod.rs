//! Value types shared by every entity kind

pub mod errors;
pub mod fixed_point;
pub mod time;
