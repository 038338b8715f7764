//! Interface families: physical ethernet ports and tunnel units.

pub mod eth;
pub mod tunnel;

pub(crate) mod wire;
