//! Session store adapters.
//!
//! - `InMemorySessionStore` - single process, used in development and tests
//! - `RedisSessionStore` - shared between instances

mod in_memory;
mod redis;

pub use in_memory::InMemorySessionStore;
pub use redis::RedisSessionStore;
