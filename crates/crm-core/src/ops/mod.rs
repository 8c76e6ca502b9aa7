pub mod customer_ops;
pub mod store;

pub use store::Store;
