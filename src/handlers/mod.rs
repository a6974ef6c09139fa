pub mod analysis;
pub mod backdrop;
pub mod breathing;
pub mod health;
pub mod moods;
pub mod ws;
