pub mod add;
pub mod flutter;
pub mod likeminds_query;
pub mod registry;

pub use add::AddTool;
pub use flutter::FlutterChatTool;
pub use likeminds_query::LikeMindsQueryTool;
pub use registry::{build_registry, ToolRegistry};
