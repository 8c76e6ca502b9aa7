pub mod customer_render;

pub use customer_render::{render_customer, render_order, render_short};
