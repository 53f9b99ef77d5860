// Handlers module

pub mod invoke_tool;
pub mod list_tools;
pub mod search_tools;

pub use invoke_tool::invoke_tool_handler;
pub use list_tools::list_tools_handler;
pub use search_tools::search_tools_handler;
