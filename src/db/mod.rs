pub mod initialize;
pub mod kv;
pub mod log;
pub mod pool;
