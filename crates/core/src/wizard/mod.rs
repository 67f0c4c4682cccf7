pub mod controller;
pub mod steps;

pub use controller::Wizard;
pub use steps::{Step, STEP_SEQUENCE};
