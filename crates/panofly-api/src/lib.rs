// panofly-api: async client for PAN-OS style configuration APIs

pub mod auth;
pub mod bulk;
pub mod client;
pub mod error;
pub mod transport;
pub mod version;
pub mod xapi;
pub mod xml;
pub mod xpath;

pub use auth::Credentials;
pub use bulk::BulkElement;
pub use client::{ImportKind, ReadMode, XapiClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use version::ProtocolVersion;
pub use xapi::HttpXapiClient;
pub use xpath::Xpath;
