//! Core domain entities
//!
//! Plain data structures with their validation rules. No I/O here.

pub mod location;
pub mod order;
mod product;
pub mod result;
mod user;

pub use location::{default_locations, Coordinates, Location, MapRegion};
pub use order::{OrderConfirmation, OrderDraft, OrderLine, PaymentMethod};
pub use product::{Product, Rating};
pub use user::{RegistrationForm, SessionUser, UserRecord};
