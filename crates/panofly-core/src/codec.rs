// ── Versioned codecs ──
//
// Each object family declares a closed, ordered set of wire-format
// generations. Selection is a pure lookup: the newest generation whose
// minimum version the device meets, or the oldest one for devices that
// predate every threshold.

use std::fmt;

use serde_json::Value;

use panofly_api::ProtocolVersion;

use crate::error::CoreError;
use crate::normalize;

/// Decode one entry object.
pub type DecodeFn<E> = fn(&Value) -> Result<E, CoreError>;

/// Encode one entity into its wire fragment.
pub type EncodeFn<E> = fn(&E) -> Result<Value, CoreError>;

/// A closed set of schema generations for one entity type.
///
/// `ALL` lists every variant oldest first, and `min_version` must grow
/// along it.
pub trait Schema: Copy + Eq + Ord + fmt::Debug + Send + Sync + 'static {
    type Entry;

    const ALL: &'static [Self];
    const OLDEST: Self;

    /// First protocol version that speaks this variant.
    fn min_version(self) -> ProtocolVersion;

    fn codec(self) -> Codec<Self::Entry>;
}

/// Pick the variant for a negotiated version.
pub fn select<S: Schema>(version: &ProtocolVersion) -> S {
    S::ALL
        .iter()
        .rev()
        .copied()
        .find(|variant| variant.min_version() <= *version)
        .unwrap_or(S::OLDEST)
}

/// The decoder/encoder pair of one schema variant.
pub struct Codec<E> {
    decode_entry: DecodeFn<E>,
    encode: EncodeFn<E>,
}

impl<E> Codec<E> {
    pub const fn new(decode_entry: DecodeFn<E>, encode: EncodeFn<E>) -> Self {
        Self {
            decode_entry,
            encode,
        }
    }

    /// Decode a raw read result, list-shaped or single-shaped.
    pub fn decode(&self, raw: &Value) -> Result<Vec<E>, CoreError> {
        normalize::entries(raw)?
            .into_iter()
            .map(self.decode_entry)
            .collect()
    }

    pub fn decode_entry(&self, entry: &Value) -> Result<E, CoreError> {
        (self.decode_entry)(entry)
    }

    pub fn encode(&self, entity: &E) -> Result<Value, CoreError> {
        (self.encode)(entity)
    }
}

impl<E> Clone for Codec<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Codec<E> {}

impl<E> fmt::Debug for Codec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec").finish_non_exhaustive()
    }
}
