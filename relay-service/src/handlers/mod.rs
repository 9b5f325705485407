pub mod health;
pub mod relay;

pub use health::health_check;
pub use relay::{preflight, relay};
