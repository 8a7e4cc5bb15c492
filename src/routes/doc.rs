use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        products::{CreateProductRequest, UpdateProductRequest},
        wishlists::{CreateWishlistRequest, DeletedProducts, RenameWishlistRequest, WishlistList},
    },
    models::{Availability, InCartStatus, Product, Wishlist},
    response::{ApiResponse, Empty, Meta},
    routes::{
        health::{self, HealthData, ServiceInfo},
        products, wishlists,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wishlists Service REST API",
        description = "Wishlists and the products saved in them."
    ),
    paths(
        health::health_check,
        health::info,
        wishlists::list_wishlists,
        wishlists::create_wishlist,
        wishlists::get_wishlist,
        wishlists::rename_wishlist,
        wishlists::delete_wishlist,
        products::add_product,
        products::clear_products,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::add_to_cart,
        products::get_product_by_id,
        products::delete_product_by_id
    ),
    components(
        schemas(
            Wishlist,
            Product,
            Availability,
            InCartStatus,
            CreateWishlistRequest,
            RenameWishlistRequest,
            CreateProductRequest,
            UpdateProductRequest,
            WishlistList,
            DeletedProducts,
            HealthData,
            ServiceInfo,
            Meta,
            Empty,
            ApiResponse<Empty>,
            ApiResponse<Wishlist>,
            ApiResponse<WishlistList>,
            ApiResponse<Product>,
            ApiResponse<DeletedProducts>
        )
    ),
    tags(
        (name = "Health", description = "Health and info endpoints"),
        (name = "Wishlists", description = "Wishlist endpoints"),
        (name = "Products", description = "Wishlist product endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
