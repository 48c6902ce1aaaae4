mod serve;
mod tools;

pub use serve::serve;
pub use tools::list_tools;
