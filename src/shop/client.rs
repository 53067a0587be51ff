//! 商城 REST 客户端（reqwest）
//!
//! 所有请求带统一超时（默认 10 秒）；超时视为后端故障而非无限等待。
//! 非 2xx 一律转 ShopError::Status（404 的商品 / 订单转 NotFound）。
//! 核心不做自动重试，「再试一次」是规划器 / 用户层面的决定。

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::shop::types::{Cart, Order, Product, ProductListing, Promo, PromoListing};
use crate::shop::{ShopBackend, ShopError};

/// HTTP 后端实现：base_url + 带超时的共享 Client
pub struct HttpShopClient {
    client: Client,
    base_url: String,
}

impl HttpShopClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<(&str, &str)>,
    ) -> Result<T, ShopError> {
        let mut req = self.client.get(self.url(path));
        if let Some((k, v)) = query {
            req = req.query(&[(k, v)]);
        }
        let resp = req.send().await.map_err(map_reqwest_err)?;
        decode(path, resp).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, ShopError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_err)?;
        decode(path, resp).await
    }
}

fn map_reqwest_err(e: reqwest::Error) -> ShopError {
    if e.is_timeout() {
        ShopError::Timeout
    } else {
        ShopError::Transport(e.to_string())
    }
}

/// 非 2xx 转 Status（带响应体便于排障），2xx 解码为目标类型
async fn decode<T: DeserializeOwned>(path: &str, resp: reqwest::Response) -> Result<T, ShopError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ShopError::Transport(e.to_string()))?;
    if !status.is_success() {
        tracing::warn!(path = %path, status = %status, "shop backend error");
        return Err(ShopError::Status {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| ShopError::Decode(format!("{}: {}", path, e)))
}

#[async_trait::async_trait]
impl ShopBackend for HttpShopClient {
    async fn list_products(&self, query: Option<&str>) -> Result<Vec<Product>, ShopError> {
        let q = query.map(str::trim).filter(|q| !q.is_empty());
        let listing: ProductListing = self
            .get_json("/api/products", q.map(|q| ("q", q)))
            .await?;
        Ok(listing.products)
    }

    async fn get_product(&self, product_id: &str) -> Result<Product, ShopError> {
        let path = format!("/api/products/{}", product_id);
        match self.get_json::<Product>(&path, None).await {
            Err(ShopError::Status { status: 404, .. }) => {
                Err(ShopError::NotFound(format!("product {}", product_id)))
            }
            other => other,
        }
    }

    async fn create_cart(&self) -> Result<Cart, ShopError> {
        self.post_json("/api/cart", serde_json::json!({})).await
    }

    async fn add_to_cart(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, ShopError> {
        let path = format!("/api/cart/{}/items", cart_id);
        self.post_json(
            &path,
            serde_json::json!({ "productId": product_id, "quantity": quantity }),
        )
        .await
    }

    async fn checkout(&self, cart_id: &str, promo_code: Option<&str>) -> Result<Order, ShopError> {
        let path = format!("/api/cart/{}/checkout", cart_id);
        let body = match promo_code {
            Some(code) => serde_json::json!({ "promoCode": code }),
            None => serde_json::json!({}),
        };
        self.post_json(&path, body).await
    }

    async fn get_order(&self, order_id: &str) -> Result<Order, ShopError> {
        let path = format!("/api/orders/{}", order_id);
        match self.get_json::<Order>(&path, None).await {
            Err(ShopError::Status { status: 404, .. }) => {
                Err(ShopError::NotFound(format!("order {}", order_id)))
            }
            other => other,
        }
    }

    async fn list_promos(&self) -> Result<Vec<Promo>, ShopError> {
        let listing: PromoListing = self.get_json("/api/promos", None).await?;
        Ok(listing.promos)
    }
}
