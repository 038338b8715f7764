//! Network configuration families.

pub mod interface;
