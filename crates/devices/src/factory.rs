//! Per-variant device factories.
//!
//! A factory knows which extra fields its variant needs and how to turn them
//! into a [`Device`]. Callers that collect input field by field (the console
//! session) ask [`DeviceFactory::fields`] what to prompt for and hand the
//! answers back as [`FieldValues`]; callers that already hold typed values use
//! the `build` constructors directly.
//!
//! Factories do not validate business rules. Price parsing happens before a
//! factory is reached and uniqueness is the registry's concern.

use std::collections::BTreeMap;

use titanium_core::{DomainError, DomainResult};

use crate::device::{Device, DeviceBase, DeviceKind, Headphones, Keyboard, Microphone};

/// One variant-specific input the operator must supply.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key used in [`FieldValues`].
    pub key: &'static str,
    /// Prompt shown when collecting the value.
    pub prompt: &'static str,
}

/// Raw variant-specific values keyed by [`FieldSpec::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn require(&self, key: &str) -> DomainResult<String> {
        self.get(key)
            .map(str::to_owned)
            .ok_or_else(|| DomainError::missing_field(key))
    }
}

/// Constructor capability for one device variant.
pub trait DeviceFactory {
    /// Variant this factory produces.
    fn kind(&self) -> DeviceKind;

    /// Variant-specific fields, in the order they are collected and described.
    fn fields(&self) -> &'static [FieldSpec];

    /// Build a device from the shared base and the variant fields.
    ///
    /// Fails with [`DomainError::MissingField`] if `fields` lacks any key from
    /// [`DeviceFactory::fields`]. Extra keys are ignored.
    fn create(&self, base: DeviceBase, fields: &FieldValues) -> DomainResult<Device>;
}

pub const CONSTRUCTION_TYPE: &str = "construction_type";
pub const MOUNTING_METHOD: &str = "mounting_method";
pub const FREQUENCY_RANGE: &str = "frequency_range";
pub const SENSITIVITY: &str = "sensitivity";
pub const SWITCH_TYPE: &str = "switch_type";
pub const INTERFACE: &str = "interface";

#[derive(Debug, Copy, Clone, Default)]
pub struct HeadphonesFactory;

impl HeadphonesFactory {
    pub fn build(
        base: DeviceBase,
        construction_type: impl Into<String>,
        mounting_method: impl Into<String>,
    ) -> Device {
        Device::Headphones(Headphones::new(
            base,
            construction_type.into(),
            mounting_method.into(),
        ))
    }
}

impl DeviceFactory for HeadphonesFactory {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Headphones
    }

    fn fields(&self) -> &'static [FieldSpec] {
        &[
            FieldSpec {
                key: CONSTRUCTION_TYPE,
                prompt: "Enter construction type: ",
            },
            FieldSpec {
                key: MOUNTING_METHOD,
                prompt: "Enter mounting method: ",
            },
        ]
    }

    fn create(&self, base: DeviceBase, fields: &FieldValues) -> DomainResult<Device> {
        let construction_type = fields.require(CONSTRUCTION_TYPE)?;
        let mounting_method = fields.require(MOUNTING_METHOD)?;
        tracing::debug!(serial_number = %base.serial_number, "building headphones");
        Ok(Self::build(base, construction_type, mounting_method))
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct MicrophoneFactory;

impl MicrophoneFactory {
    pub fn build(
        base: DeviceBase,
        frequency_range: impl Into<String>,
        sensitivity: impl Into<String>,
    ) -> Device {
        Device::Microphone(Microphone::new(
            base,
            frequency_range.into(),
            sensitivity.into(),
        ))
    }
}

impl DeviceFactory for MicrophoneFactory {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Microphone
    }

    fn fields(&self) -> &'static [FieldSpec] {
        &[
            FieldSpec {
                key: FREQUENCY_RANGE,
                prompt: "Enter frequency range: ",
            },
            FieldSpec {
                key: SENSITIVITY,
                prompt: "Enter sensitivity: ",
            },
        ]
    }

    fn create(&self, base: DeviceBase, fields: &FieldValues) -> DomainResult<Device> {
        let frequency_range = fields.require(FREQUENCY_RANGE)?;
        let sensitivity = fields.require(SENSITIVITY)?;
        tracing::debug!(serial_number = %base.serial_number, "building microphone");
        Ok(Self::build(base, frequency_range, sensitivity))
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct KeyboardFactory;

impl KeyboardFactory {
    pub fn build(
        base: DeviceBase,
        switch_type: impl Into<String>,
        interface: impl Into<String>,
    ) -> Device {
        Device::Keyboard(Keyboard::new(base, switch_type.into(), interface.into()))
    }
}

impl DeviceFactory for KeyboardFactory {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Keyboard
    }

    fn fields(&self) -> &'static [FieldSpec] {
        &[
            FieldSpec {
                key: SWITCH_TYPE,
                prompt: "Enter switch type: ",
            },
            FieldSpec {
                key: INTERFACE,
                prompt: "Enter interface: ",
            },
        ]
    }

    fn create(&self, base: DeviceBase, fields: &FieldValues) -> DomainResult<Device> {
        let switch_type = fields.require(SWITCH_TYPE)?;
        let interface = fields.require(INTERFACE)?;
        tracing::debug!(serial_number = %base.serial_number, "building keyboard");
        Ok(Self::build(base, switch_type, interface))
    }
}

/// Factory capability for a variant tag.
pub fn factory_for(kind: DeviceKind) -> &'static dyn DeviceFactory {
    match kind {
        DeviceKind::Headphones => &HeadphonesFactory,
        DeviceKind::Microphone => &MicrophoneFactory,
        DeviceKind::Keyboard => &KeyboardFactory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanium_core::Price;

    fn base(serial: &str) -> DeviceBase {
        DeviceBase::new(serial, "Acme", Price::new(10.0).unwrap())
    }

    #[test]
    fn factory_for_returns_matching_kind() {
        for kind in DeviceKind::ALL {
            assert_eq!(factory_for(kind).kind(), kind);
        }
    }

    #[test]
    fn every_factory_asks_for_two_distinct_fields() {
        for kind in DeviceKind::ALL {
            let fields = factory_for(kind).fields();
            assert_eq!(fields.len(), 2, "{kind}");
            assert_ne!(fields[0].key, fields[1].key);
        }
    }

    #[test]
    fn create_uses_field_values_in_order() {
        let fields = FieldValues::new()
            .with(FREQUENCY_RANGE, "20Hz-20kHz")
            .with(SENSITIVITY, "-38dB");
        let device = MicrophoneFactory.create(base("M1"), &fields).unwrap();

        match &device {
            Device::Microphone(mic) => {
                assert_eq!(mic.frequency_range(), "20Hz-20kHz");
                assert_eq!(mic.sensitivity(), "-38dB");
            }
            other => panic!("Expected Microphone, got {other:?}"),
        }
        assert_eq!(device.serial_number(), "M1");
    }

    #[test]
    fn create_matches_typed_build() {
        let fields = FieldValues::new()
            .with(SWITCH_TYPE, "red")
            .with(INTERFACE, "USB");
        let via_fields = factory_for(DeviceKind::Keyboard)
            .create(base("K1"), &fields)
            .unwrap();
        let via_build = KeyboardFactory::build(base("K1"), "red", "USB");
        assert_eq!(via_fields, via_build);
    }

    #[test]
    fn create_rejects_missing_field() {
        let fields = FieldValues::new().with(CONSTRUCTION_TYPE, "open-back");
        let err = HeadphonesFactory.create(base("H1"), &fields).unwrap_err();
        match err {
            DomainError::MissingField(key) => assert_eq!(key, MOUNTING_METHOD),
            _ => panic!("Expected MissingField error"),
        }
    }

    #[test]
    fn create_ignores_unrelated_keys() {
        let fields = FieldValues::new()
            .with(CONSTRUCTION_TYPE, "open-back")
            .with(MOUNTING_METHOD, "on-ear")
            .with(SWITCH_TYPE, "blue");
        assert!(HeadphonesFactory.create(base("H1"), &fields).is_ok());
    }

    #[test]
    fn empty_values_are_accepted() {
        let fields = FieldValues::new()
            .with(SWITCH_TYPE, "")
            .with(INTERFACE, "");
        let device = KeyboardFactory.create(base(""), &fields).unwrap();
        assert_eq!(device.serial_number(), "");
    }
}
