pub mod product_service;
pub mod wishlist_service;
