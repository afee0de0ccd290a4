pub mod interface;
pub mod prompt;
pub mod invoker;

pub use interface::*;
pub use invoker::*;
