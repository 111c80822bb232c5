pub mod currency_map;
pub mod encode_route_to_path;
pub mod hook;
pub mod path_currency;
pub mod price_tick_conversions;
pub mod sorts_before;

pub use currency_map::*;
pub use encode_route_to_path::*;
pub use hook::*;
pub use path_currency::*;
pub use price_tick_conversions::{price_to_closest_tick, tick_to_price};
pub use sorts_before::*;
