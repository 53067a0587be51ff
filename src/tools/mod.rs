//! 工具箱：暴露给外部规划器的八个操作与执行器

pub mod cart;
pub mod context_search;
pub mod executor;
pub mod orders;
pub mod products;
pub mod registry;
pub mod schema;

pub use cart::{AddToCartTool, CheckoutCartTool, CreateCartTool};
pub use context_search::SearchContextTool;
pub use executor::ToolExecutor;
pub use orders::{ListPromotionsTool, TrackOrderTool};
pub use products::{GetProductTool, ListProductsTool};
pub use registry::{Tool, ToolRegistry};
pub use schema::tool_call_schema_json;
