pub mod backdrop;
pub mod mood;
