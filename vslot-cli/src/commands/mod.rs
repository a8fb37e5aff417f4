//! CLI command implementations.

mod allocate;
mod completions;
mod pools;
mod validate;

pub use allocate::AllocateCommand;
pub use completions::CompletionsCommand;
pub use pools::PoolsCommand;
pub use validate::ValidateCommand;
