// Device configuration API client modules
//
// Hand-written client for the device's `/api/` endpoint: version
// negotiation, keygen, `type=config` reads/writes and vsys imports, all
// wrapped in the `<response status=".." code="..">` envelope. Bodies are
// converted to and from JSON at this boundary by `crate::xml`.

pub mod auth;
pub mod client;
pub mod config;
pub mod models;
pub mod session;
pub mod vsys;

pub use client::HttpXapiClient;
