use core::str::FromStr;

use serde::{Deserialize, Serialize};

use titanium_core::{DomainError, Entity, Price, SerialNumber};

/// The closed set of device variants the shop stocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Headphones,
    Microphone,
    Keyboard,
}

impl DeviceKind {
    /// Every variant, in menu order.
    pub const ALL: [DeviceKind; 3] = [
        DeviceKind::Headphones,
        DeviceKind::Microphone,
        DeviceKind::Keyboard,
    ];

    /// Human-readable variant name; leads every description.
    pub fn label(self) -> &'static str {
        match self {
            DeviceKind::Headphones => "Headphones",
            DeviceKind::Microphone => "Microphone",
            DeviceKind::Keyboard => "Keyboard",
        }
    }

    /// Key the operator types to pick this variant.
    pub fn menu_key(self) -> &'static str {
        match self {
            DeviceKind::Headphones => "1",
            DeviceKind::Microphone => "2",
            DeviceKind::Keyboard => "3",
        }
    }
}

impl core::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses an operator menu selection (`"1"`..`"3"`).
impl FromStr for DeviceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim();
        DeviceKind::ALL
            .into_iter()
            .find(|kind| kind.menu_key() == choice)
            .ok_or_else(|| DomainError::invalid_selection(choice))
    }
}

/// Identity and pricing shared by every variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceBase {
    pub serial_number: SerialNumber,
    pub brand: String,
    pub price: Price,
}

impl DeviceBase {
    pub fn new(serial_number: impl Into<SerialNumber>, brand: impl Into<String>, price: Price) -> Self {
        Self {
            serial_number: serial_number.into(),
            brand: brand.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headphones {
    #[serde(flatten)]
    base: DeviceBase,
    construction_type: String,
    mounting_method: String,
}

impl Headphones {
    pub(crate) fn new(base: DeviceBase, construction_type: String, mounting_method: String) -> Self {
        Self {
            base,
            construction_type,
            mounting_method,
        }
    }

    pub fn construction_type(&self) -> &str {
        &self.construction_type
    }

    pub fn mounting_method(&self) -> &str {
        &self.mounting_method
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Microphone {
    #[serde(flatten)]
    base: DeviceBase,
    frequency_range: String,
    sensitivity: String,
}

impl Microphone {
    pub(crate) fn new(base: DeviceBase, frequency_range: String, sensitivity: String) -> Self {
        Self {
            base,
            frequency_range,
            sensitivity,
        }
    }

    pub fn frequency_range(&self) -> &str {
        &self.frequency_range
    }

    pub fn sensitivity(&self) -> &str {
        &self.sensitivity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyboard {
    #[serde(flatten)]
    base: DeviceBase,
    switch_type: String,
    interface: String,
}

impl Keyboard {
    pub(crate) fn new(base: DeviceBase, switch_type: String, interface: String) -> Self {
        Self {
            base,
            switch_type,
            interface,
        }
    }

    pub fn switch_type(&self) -> &str {
        &self.switch_type
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

/// A sellable peripheral record.
///
/// Built only through a [`DeviceFactory`](crate::factory::DeviceFactory);
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Device {
    Headphones(Headphones),
    Microphone(Microphone),
    Keyboard(Keyboard),
}

impl Device {
    fn base(&self) -> &DeviceBase {
        match self {
            Device::Headphones(d) => &d.base,
            Device::Microphone(d) => &d.base,
            Device::Keyboard(d) => &d.base,
        }
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            Device::Headphones(_) => DeviceKind::Headphones,
            Device::Microphone(_) => DeviceKind::Microphone,
            Device::Keyboard(_) => DeviceKind::Keyboard,
        }
    }

    pub fn serial_number(&self) -> &SerialNumber {
        &self.base().serial_number
    }

    pub fn brand(&self) -> &str {
        &self.base().brand
    }

    pub fn price(&self) -> Price {
        self.base().price
    }

    /// Variant-specific attributes as `(label, value)` pairs, in display order.
    pub fn attributes(&self) -> [(&'static str, &str); 2] {
        match self {
            Device::Headphones(d) => [
                ("Construction type", d.construction_type()),
                ("Mounting method", d.mounting_method()),
            ],
            Device::Microphone(d) => [
                ("Frequency range", d.frequency_range()),
                ("Sensitivity", d.sensitivity()),
            ],
            Device::Keyboard(d) => [
                ("Switch type", d.switch_type()),
                ("Interface", d.interface()),
            ],
        }
    }

    /// One-line description: variant label, serial number, brand, price, then
    /// the variant attributes, comma-separated.
    pub fn describe(&self) -> String {
        let base = self.base();
        let mut line = format!(
            "{} - serial number: {}, Brand: {}, Price: {}",
            self.kind().label(),
            base.serial_number,
            base.brand,
            base.price,
        );
        for (label, value) in self.attributes() {
            line.push_str(", ");
            line.push_str(label);
            line.push_str(": ");
            line.push_str(value);
        }
        line
    }
}

impl Entity for Device {
    type Id = SerialNumber;

    fn id(&self) -> &Self::Id {
        self.serial_number()
    }
}

impl core::fmt::Display for Device {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{HeadphonesFactory, KeyboardFactory, MicrophoneFactory};

    fn price(value: f64) -> Price {
        Price::new(value).unwrap()
    }

    fn headphones() -> Device {
        HeadphonesFactory::build(
            DeviceBase::new("H1", "Acme", price(49.99)),
            "closed-back",
            "over-ear",
        )
    }

    /// Asserts that every needle occurs in `haystack`, each after the previous one.
    fn assert_in_order(haystack: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            match haystack[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!("{needle:?} not found in order within {haystack:?}"),
            }
        }
    }

    #[test]
    fn headphones_description_lists_fields_in_order() {
        let device = headphones();
        assert_in_order(
            &device.describe(),
            &["Headphones", "H1", "Acme", "49.99", "closed-back", "over-ear"],
        );
    }

    #[test]
    fn microphone_description_lists_fields_in_order() {
        let device = MicrophoneFactory::build(
            DeviceBase::new("M1", "Shure", price(99.0)),
            "50Hz-15kHz",
            "-54dB",
        );
        assert_eq!(
            device.describe(),
            "Microphone - serial number: M1, Brand: Shure, Price: 99.0, \
             Frequency range: 50Hz-15kHz, Sensitivity: -54dB"
        );
    }

    #[test]
    fn keyboard_description_lists_fields_in_order() {
        let device = KeyboardFactory::build(
            DeviceBase::new("K1", "Keychron", price(79.5)),
            "brown",
            "USB-C",
        );
        assert_in_order(
            &device.describe(),
            &["Keyboard", "K1", "Keychron", "79.5", "Switch type: brown", "Interface: USB-C"],
        );
    }

    #[test]
    fn describe_is_deterministic() {
        let device = headphones();
        let first = device.describe();
        for _ in 0..10 {
            assert_eq!(device.describe(), first);
        }
        assert_eq!(device.to_string(), first);
    }

    #[test]
    fn shared_accessors_expose_base_fields() {
        let device = headphones();
        assert_eq!(device.kind(), DeviceKind::Headphones);
        assert_eq!(device.serial_number(), "H1");
        assert_eq!(device.id(), device.serial_number());
        assert_eq!(device.brand(), "Acme");
        assert_eq!(device.price().value(), 49.99);
    }

    #[test]
    fn kind_parses_menu_keys_only() {
        assert_eq!("1".parse::<DeviceKind>().unwrap(), DeviceKind::Headphones);
        assert_eq!(" 2 ".parse::<DeviceKind>().unwrap(), DeviceKind::Microphone);
        assert_eq!("3".parse::<DeviceKind>().unwrap(), DeviceKind::Keyboard);

        for choice in ["0", "4", "", "keyboard"] {
            match choice.parse::<DeviceKind>() {
                Err(DomainError::InvalidSelection(_)) => {}
                other => panic!("expected InvalidSelection for {choice:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn serializes_with_kind_tag_and_flat_fields() {
        let json = serde_json::to_value(headphones()).unwrap();
        assert_eq!(json["kind"], "headphones");
        assert_eq!(json["serial_number"], "H1");
        assert_eq!(json["brand"], "Acme");
        assert_eq!(json["price"], 49.99);
        assert_eq!(json["construction_type"], "closed-back");
        assert_eq!(json["mounting_method"], "over-ear");
    }
}
