//! 内存商城后端（用于测试与离线运行，无需启动 HTTP 后端）
//!
//! 语义对齐开发后端 store：按名称 / 描述子串过滤商品、结账计算小计减促销折扣、
//! 订单初始状态 processing / etaDays 5。create_cart 调用次数可查询，
//! 便于测试「懒建购物车恰好调用一次」。

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::shop::types::{Cart, CartItem, Order, Product, Promo};
use crate::shop::{ShopBackend, ShopError};

/// 内存后端：种子商品 + 促销码，购物车 / 订单存于 Mutex<HashMap>
pub struct InMemoryShop {
    products: Vec<Product>,
    promos: Vec<Promo>,
    carts: Mutex<HashMap<String, Cart>>,
    orders: Mutex<HashMap<String, Order>>,
    create_cart_calls: AtomicUsize,
    checkout_calls: AtomicUsize,
}

fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

impl InMemoryShop {
    /// 与开发后端相同的种子目录
    pub fn new() -> Self {
        let products = vec![
            Product {
                id: "p-100".into(),
                name: "Aurora Headphones".into(),
                description: "Wireless over-ear with spatial audio".into(),
                price: 12900,
                currency: "USD".into(),
                sku: "AUR-HE-001".into(),
                stock: 12,
                category: "audio".into(),
                image: None,
            },
            Product {
                id: "p-101".into(),
                name: "Nimbus Keyboard".into(),
                description: "Low-profile mechanical, hot-swappable".into(),
                price: 9900,
                currency: "USD".into(),
                sku: "NIM-KB-002".into(),
                stock: 8,
                category: "peripherals".into(),
                image: None,
            },
            Product {
                id: "p-102".into(),
                name: "Lumen Desk Lamp".into(),
                description: "USB-C smart lamp, warm-to-cool".into(),
                price: 5900,
                currency: "USD".into(),
                sku: "LUM-LA-003".into(),
                stock: 25,
                category: "home".into(),
                image: None,
            },
        ];
        let promos = vec![
            Promo {
                code: "WELCOME10".into(),
                description: "10% off first order".into(),
                discount_pct: 10,
            },
            Promo {
                code: "FREESHIP".into(),
                description: "Free shipping over $50".into(),
                discount_pct: 0,
            },
        ];
        Self::with_catalog(products, promos)
    }

    /// 空目录后端（测试「空目录返回空列表而非错误」）
    pub fn empty() -> Self {
        Self::with_catalog(Vec::new(), Vec::new())
    }

    pub fn with_catalog(products: Vec<Product>, promos: Vec<Promo>) -> Self {
        Self {
            products,
            promos,
            carts: Mutex::new(HashMap::new()),
            orders: Mutex::new(HashMap::new()),
            create_cart_calls: AtomicUsize::new(0),
            checkout_calls: AtomicUsize::new(0),
        }
    }

    /// create_cart 被调用的次数（测试懒建恰好一次）
    pub fn create_cart_calls(&self) -> usize {
        self.create_cart_calls.load(Ordering::SeqCst)
    }

    /// checkout 被调用的次数（测试「无购物车时不触后端」）
    pub fn checkout_calls(&self) -> usize {
        self.checkout_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryShop {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShopBackend for InMemoryShop {
    async fn list_products(&self, query: Option<&str>) -> Result<Vec<Product>, ShopError> {
        let mut data = self.products.clone();
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            data.retain(|p| {
                p.name.to_lowercase().contains(&q) || p.description.to_lowercase().contains(&q)
            });
        }
        Ok(data)
    }

    async fn get_product(&self, product_id: &str) -> Result<Product, ShopError> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| ShopError::NotFound(format!("product {}", product_id)))
    }

    async fn create_cart(&self) -> Result<Cart, ShopError> {
        self.create_cart_calls.fetch_add(1, Ordering::SeqCst);
        let cart = Cart {
            id: format!("c-{}", short_id()),
            items: Vec::new(),
        };
        self.carts
            .lock()
            .expect("carts lock")
            .insert(cart.id.clone(), cart.clone());
        Ok(cart)
    }

    async fn add_to_cart(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, ShopError> {
        self.get_product(product_id).await?;
        let mut carts = self.carts.lock().expect("carts lock");
        let cart = carts
            .get_mut(cart_id)
            .ok_or_else(|| ShopError::NotFound(format!("cart {}", cart_id)))?;
        match cart.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity += quantity,
            None => cart.items.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
            }),
        }
        Ok(cart.clone())
    }

    async fn checkout(&self, cart_id: &str, promo_code: Option<&str>) -> Result<Order, ShopError> {
        self.checkout_calls.fetch_add(1, Ordering::SeqCst);
        let cart = self
            .carts
            .lock()
            .expect("carts lock")
            .get(cart_id)
            .cloned()
            .ok_or_else(|| ShopError::NotFound(format!("cart {}", cart_id)))?;

        let mut subtotal: i64 = 0;
        for item in &cart.items {
            if let Some(p) = self.products.iter().find(|p| p.id == item.product_id) {
                subtotal += p.price * item.quantity as i64;
            }
        }
        let mut discount: i64 = 0;
        if let Some(code) = promo_code {
            if let Some(promo) = self
                .promos
                .iter()
                .find(|p| p.code.eq_ignore_ascii_case(code))
            {
                // 四舍五入到分
                discount = (subtotal * promo.discount_pct + 50) / 100;
            }
        }
        let order = Order {
            id: format!("o-{}", short_id()),
            cart_id: cart_id.to_string(),
            total: (subtotal - discount).max(0),
            currency: "USD".into(),
            status: "processing".into(),
            eta_days: 5,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.orders
            .lock()
            .expect("orders lock")
            .insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn get_order(&self, order_id: &str) -> Result<Order, ShopError> {
        self.orders
            .lock()
            .expect("orders lock")
            .get(order_id)
            .cloned()
            .ok_or_else(|| ShopError::NotFound(format!("order {}", order_id)))
    }

    async fn list_promos(&self) -> Result<Vec<Promo>, ShopError> {
        Ok(self.promos.clone())
    }
}
