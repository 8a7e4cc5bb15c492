pub mod products;
pub mod wishlists;
