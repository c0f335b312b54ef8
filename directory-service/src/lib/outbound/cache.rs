pub mod redis;

pub use redis::RedisContactCache;
