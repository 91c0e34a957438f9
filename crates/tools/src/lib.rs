//! Tool implementations for the Motormind reasoning loop.
//!
//! Tools give the loop the ability to act mid-reasoning: look up car data
//! with SQL, resolve image context, or fall back to general car chat.
//! Which tools an agent carries is decided here at wiring time — the loop
//! itself only sees the registry.

pub mod car_chat;
pub mod image_analysis;
pub mod sql_query;

pub use car_chat::CarChatTool;
pub use image_analysis::{ImageAnalysisTool, ImageContextRegistry};
pub use sql_query::SqlQueryTool;

use motormind_core::provider::Provider;
use motormind_core::tool::ToolRegistry;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Create the default tool registry: SQL lookup, car chat, image analysis.
pub fn default_registry(
    provider: Arc<dyn Provider>,
    pool: SqlitePool,
    images: Arc<ImageContextRegistry>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(SqlQueryTool::new(pool, provider.clone())));
    registry.register(Box::new(CarChatTool::new(provider)));
    registry.register(Box::new(ImageAnalysisTool::new(images)));
    registry
}
