pub mod pool;
pub mod route;
pub mod tick_data_provider;
pub mod trade;

pub use pool::*;
pub use route::*;
pub use tick_data_provider::*;
pub use trade::*;
