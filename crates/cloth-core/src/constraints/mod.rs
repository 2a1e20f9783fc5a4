pub mod collision;
pub mod distance;
