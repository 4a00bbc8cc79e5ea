//! Cloneable handles for talking to the services.

#[macro_use]
mod macros;

mod admin_client;
mod api_client;
mod cart_client;
mod records_client;
mod session_client;

pub use admin_client::AdminClient;
pub use api_client::ApiClient;
pub use cart_client::CartClient;
pub use records_client::RecordsClient;
pub use session_client::SessionClient;
