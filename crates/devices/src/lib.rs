//! Peripheral device catalog.
//!
//! This crate contains the device model, the per-variant factories and the
//! in-memory registry, implemented purely as deterministic domain logic
//! (no IO, no console).

pub mod device;
pub mod factory;
pub mod registry;

pub use device::{Device, DeviceBase, DeviceKind, Headphones, Keyboard, Microphone};
pub use factory::{
    DeviceFactory, FieldSpec, FieldValues, HeadphonesFactory, KeyboardFactory, MicrophoneFactory,
    factory_for,
};
pub use registry::DeviceRegistry;
