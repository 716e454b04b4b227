//! Data models for Questbook

pub mod booking;
pub mod enums;
pub mod game_stats;
pub mod location;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails, Slot};
pub use enums::{BookingStatus, GameLanguage, Role};
pub use game_stats::GameStats;
pub use location::{Game, Location, WorkingHours};
pub use user::{User, UserClaims};
