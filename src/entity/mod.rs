use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

pub mod products;
pub mod wishlists;

pub use products::Entity as Products;
pub use wishlists::Entity as Wishlists;

/// Current time in the representation the timestamp columns use.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}
