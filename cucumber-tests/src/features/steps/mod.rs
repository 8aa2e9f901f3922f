pub mod access_steps;
pub mod inheritance_steps;
pub mod lifecycle_steps;
