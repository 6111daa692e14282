pub mod song;
pub mod tuning;
