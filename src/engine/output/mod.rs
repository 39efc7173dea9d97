//! Public exports for building & injecting LLM-ready prompts.

pub mod builder;
pub mod formatter;
pub mod injector;
pub mod schema;
pub mod templates;

pub use builder::*;
pub use formatter::*;
pub use injector::*;
pub use schema::*;
pub use templates::*;

#[cfg(test)]
mod tests;
