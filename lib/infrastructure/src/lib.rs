mod http;
mod monitoring;

pub use http::server::HttpServerConfig;
pub use monitoring::MonitoringConfig;

pub mod meter {
    pub use super::monitoring::meter::{increment, set};
}
