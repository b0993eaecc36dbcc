//! In-memory device registry.
//!
//! An ordered `Vec` scanned linearly by serial number. The registry is sized
//! for one operator at a counter, so there is no secondary index; listing
//! order is insertion order.

use titanium_core::{DomainError, DomainResult, Entity};

use crate::device::Device;

/// Authoritative collection of devices for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Whether a device with this serial number is registered.
    pub fn contains(&self, serial_number: &str) -> bool {
        self.position(serial_number).is_some()
    }

    /// Append `device` unless its serial number is already taken.
    ///
    /// On [`DomainError::DuplicateIdentifier`] the collection is untouched.
    pub fn add(&mut self, device: Device) -> DomainResult<()> {
        if self.contains(device.id().as_str()) {
            tracing::debug!(serial_number = %device.id(), "rejected duplicate device");
            return Err(DomainError::duplicate(device.id().clone()));
        }

        tracing::debug!(
            serial_number = %device.id(),
            kind = %device.kind(),
            size = self.devices.len() + 1,
            "device added"
        );
        self.devices.push(device);
        Ok(())
    }

    /// Remove the device with this serial number and hand it back.
    ///
    /// Order of the remaining devices is preserved.
    pub fn remove(&mut self, serial_number: &str) -> DomainResult<Device> {
        let index = self
            .position(serial_number)
            .ok_or_else(|| DomainError::not_found(serial_number))?;
        let device = self.devices.remove(index);
        tracing::debug!(
            serial_number = %device.id(),
            kind = %device.kind(),
            size = self.devices.len(),
            "device removed"
        );
        Ok(device)
    }

    pub fn find(&self, serial_number: &str) -> DomainResult<&Device> {
        self.position(serial_number)
            .map(|index| &self.devices[index])
            .ok_or_else(|| DomainError::not_found(serial_number))
    }

    /// Devices in insertion order.
    pub fn list_all(&self) -> impl ExactSizeIterator<Item = &Device> + '_ {
        self.devices.iter()
    }

    fn position(&self, serial_number: &str) -> Option<usize> {
        self.devices.iter().position(|d| d.id() == serial_number)
    }
}

impl<'a> IntoIterator for &'a DeviceRegistry {
    type Item = &'a Device;
    type IntoIter = core::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}
