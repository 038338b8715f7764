//! Versioned configuration sync between `panofly-api` and its consumers.
//!
//! This crate owns the interface families and the machinery that keeps
//! them correct across firmware generations:
//!
//! - **[`Device`]**: facade over one session. [`connect()`](Device::connect)
//!   authenticates and negotiates the protocol version, then vends
//!   per-family namespaces that share the session.
//!
//! - **[`Namespace`]**: list, get, show, set, edit and delete for one
//!   family. Writes run configure, vsys unimport, then vsys import, and
//!   report the failing [`WriteStep`] inside [`CoreError::Step`].
//!
//! - **[`codec`]**: each family's closed [`Schema`] enum of wire
//!   generations, with version-based selection.
//!
//! - **[`PathBuilder`]** and [`normalize`]: xpath construction and
//!   response flattening.
//!
//! - **Families** ([`netw::interface`]): ethernet (four generations,
//!   HA and aggregate-group members stay out of vsys imports) and tunnel.

pub mod codec;
pub mod config;
pub mod device;
pub mod error;
pub mod namespace;
pub mod netw;
pub mod normalize;
pub mod path;
pub mod scope;

// ── Primary re-exports ──────────────────────────────────────────────
pub use codec::{Codec, Schema};
pub use config::{AuthCredentials, DeviceConfig, TlsVerification};
pub use device::Device;
pub use error::CoreError;
pub use namespace::{DeleteTarget, Entity, Family, Labels, Namespace, WriteStep};
pub use normalize::EntitySet;
pub use path::PathBuilder;
pub use scope::Scope;

pub use netw::interface::eth::{self, Ethernet};
pub use netw::interface::tunnel::{self, Tunnel};

pub use panofly_api::{Error as ApiError, ProtocolVersion, ReadMode, XapiClient};
