mod network;
mod payment;
mod request;
mod screen;

pub use network::{Asset, Network, assets_for};
pub use payment::{BANKS, DetailField, DetailRule, DetailRules, PaymentMethod};
pub use request::{OrderRequest, OrderResponse, SERVICE_UNAVAILABLE};
pub use screen::Screen;
