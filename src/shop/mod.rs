//! 商城后端边界
//!
//! ShopBackend trait 抽象 REST 契约（§外部接口），HttpShopClient 为 reqwest 实现，
//! InMemoryShop 为测试 / 离线用的内存实现（与开发后端 store 语义一致）。
//! 后端是数据的唯一权威：核心不缓存、不修改返回结果。

pub mod client;
pub mod mock;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpShopClient;
pub use mock::InMemoryShop;
pub use types::{Cart, CartItem, Order, Product, ProductListing, Promo, PromoListing};

/// 商城后端调用错误（非 2xx、超时、传输、解码）
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Transport: {0}")]
    Transport(String),

    #[error("Decode: {0}")]
    Decode(String),
}

/// 商城后端操作面：与 REST 契约一一对应
#[async_trait]
pub trait ShopBackend: Send + Sync {
    /// GET /api/products?q=...（query 为空时不带过滤）
    async fn list_products(&self, query: Option<&str>) -> Result<Vec<Product>, ShopError>;

    /// GET /api/products/{id}
    async fn get_product(&self, product_id: &str) -> Result<Product, ShopError>;

    /// POST /api/cart
    async fn create_cart(&self) -> Result<Cart, ShopError>;

    /// POST /api/cart/{cartId}/items
    async fn add_to_cart(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, ShopError>;

    /// POST /api/cart/{cartId}/checkout
    async fn checkout(&self, cart_id: &str, promo_code: Option<&str>) -> Result<Order, ShopError>;

    /// GET /api/orders/{id}
    async fn get_order(&self, order_id: &str) -> Result<Order, ShopError>;

    /// GET /api/promos
    async fn list_promos(&self) -> Result<Vec<Promo>, ShopError>;
}
