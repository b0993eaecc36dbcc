//! Identity of records that the registry tracks.

/// A record with a stable key.
///
/// For devices the key is the operator-entered serial number. The registry
/// compares keys only; two devices with the same serial and different
/// brands still collide.
pub trait Entity {
    /// Key the registry checks for uniqueness and looks records up by.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
