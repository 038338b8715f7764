// ── Path construction ──
//
// Entity addresses are: scope prefix, device root, a fixed per-family
// spine, then the name predicate. Scope emptiness is checked by the
// caller before building.

use panofly_api::Xpath;
use panofly_api::xpath::{as_entry_xpath, device_root};

use crate::scope::Scope;

/// Builds xpaths for one entity family.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder {
    spine: &'static [&'static str],
}

impl PathBuilder {
    /// `spine` is the literal segments between the device root and the
    /// name predicate (e.g. `network / interface / ethernet`).
    pub const fn new(spine: &'static [&'static str]) -> Self {
        Self { spine }
    }

    /// Address the collection (no names), one entity, or a filtered
    /// subset.
    pub fn build<S: AsRef<str>>(&self, scope: &Scope, names: &[S]) -> Xpath {
        let mut path = scope.prefix();
        path = path.join(device_root().segments().iter().cloned());
        path = path.join(self.spine.iter().copied());
        path.push(as_entry_xpath(names));
        path
    }

    /// Target of a bulk `set` carrying `names`.
    ///
    /// One entity is written beneath its collection; several are written
    /// beneath the collection's parent, wrapped in the collection tag.
    pub fn write_path<S: AsRef<str>>(&self, scope: &Scope, names: &[S]) -> Xpath {
        self.build(scope, names).strip(strip_depth(names.len()))
    }
}

/// Trailing segments removed from the entity path for a bulk write.
pub const fn strip_depth(count: usize) -> usize {
    if count == 1 { 1 } else { 2 }
}
