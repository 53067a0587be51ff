//! 商城后端数据类型
//!
//! 每个操作的返回都有显式结构体（不做字段鸭子类型访问）；线上 JSON 为 camelCase。
//! 金额一律为「分」（cents），避免浮点。

use serde::{Deserialize, Serialize};

/// 商品
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// 后端种子数据里可能为空串
    #[serde(default)]
    pub description: String,
    /// 单价（分）
    pub price: i64,
    pub currency: String,
    pub sku: String,
    pub stock: i64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// 购物车条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

/// 购物车
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub items: Vec<CartItem>,
}

/// 订单（结账后由后端生成）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub cart_id: String,
    /// 实付总额（分）
    pub total: i64,
    pub currency: String,
    /// processing / paid / shipped / delivered
    pub status: String,
    pub eta_days: i64,
    pub created_at: String,
}

/// 促销码
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promo {
    pub code: String,
    pub description: String,
    /// 折扣百分比 0..100，0 表示非折扣类促销（如免运费）
    pub discount_pct: i64,
}

/// GET /api/products 的响应包装
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListing {
    pub products: Vec<Product>,
}

/// GET /api/promos 的响应包装
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoListing {
    pub promos: Vec<Promo>,
}
