//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and executes the operation against the record server.

pub mod browse;
pub mod delete;
pub mod export;
pub mod filter;
pub mod page;
pub mod search;
pub mod upload;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use delete::execute as delete;
pub use export::execute as export;
pub use filter::execute as filter;
pub use page::execute as page;
pub use search::execute as search;
pub use upload::execute as upload;
