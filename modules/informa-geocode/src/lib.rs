//! Resolve loose incident location fields to a coordinate pair.
//!
//! The pipeline is: canonical cache key -> search query -> web search ->
//! coordinate extraction -> write-once cache. Every failure collapses to
//! `None`; nothing in this crate returns an error to its caller.

pub mod cache;
pub mod extract;
pub mod gateway;
pub mod query;
pub mod resolver;

pub use cache::{cache_key, CacheEntry, ResolutionCache};
pub use extract::CoordinateExtractor;
pub use gateway::{SearchGateway, SerperGateway};
pub use query::build_query;
pub use resolver::Resolver;
