pub mod analysis;
pub mod breathing;
