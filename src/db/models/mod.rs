//! Database models split into domain-specific modules.

pub mod booking;
pub mod guest;
pub mod invoice;
pub mod room;
pub mod user;

pub use booking::*;
pub use guest::*;
pub use invoice::*;
pub use room::*;
pub use user::*;
