pub mod api;
pub mod dom;
pub mod error;
pub mod format;
pub mod http;
pub mod messages;
pub mod page;
pub mod platform;
pub mod schedule;
pub mod settings;
pub mod sidebar;
pub mod status;
pub mod timer;
pub mod transport;
pub mod validation;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

pub use api::{ApiClient, Outcome};
pub use error::{Error, Result};
pub use page::Page;
pub use platform::Platform;
pub use settings::Settings;
pub use transport::ReqwestClient;
