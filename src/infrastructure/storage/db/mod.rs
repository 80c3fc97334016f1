pub mod dao;
pub mod models;
pub mod pool;
pub mod schema;

pub use pool::DbPool;
