//! Device information DIB.
//!
//! ```text
//! ┌────┬────┬────────┬────────┬──────────┬─────────┬──────────┬───────────┬─────┬──────────┐
//! │Len │Code│ Medium │ Status │ Ind.Addr │ Project │ Serial   │ Multicast │ MAC │ Name     │
//! │0x36│0x01│   1    │   1    │    2     │    2    │    6     │     4     │  6  │ 30, NUL  │
//! └────┴────┴────────┴────────┴──────────┴─────────┴──────────┴───────────┴─────┴──────────┘
//! ```

use crate::addressing::IndividualAddress;
use crate::codec;
use crate::net::Ipv4Addr;
use crate::protocol::constants::{DescriptionType, KnxMedium};
use crate::protocol::structure::knx_struct;

/// Device name field, NUL padded.
pub type DeviceName = heapless::String<{ DeviceInfoDib::NAME_SIZE }>;

/// Field values for building a [`DeviceInfoDib`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo<'a> {
    /// Medium the device is attached to
    pub medium: KnxMedium,
    /// Device status, bit 0 is programming mode
    pub status: u8,
    /// KNX individual address of the device
    pub individual_address: IndividualAddress,
    /// Project-installation identifier
    pub project_installation_id: u16,
    /// KNX serial number
    pub serial_number: [u8; 6],
    /// Routing multicast address
    pub multicast_address: Ipv4Addr,
    /// Ethernet MAC address
    pub mac_address: [u8; 6],
    /// Friendly name, at most 29 bytes are kept
    pub name: &'a str,
}

knx_struct!(
    /// Hardware description of a KNXnet/IP server.
    DeviceInfoDib,
    DescriptionType
);

impl DeviceInfoDib {
    /// Encoded size.
    pub const SIZE: usize = 54;
    /// Size of the name field.
    pub const NAME_SIZE: usize = 30;

    const MEDIUM: usize = 0;
    const STATUS: usize = 1;
    const ADDRESS: usize = 2;
    const PROJECT: usize = 4;
    const SERIAL: usize = 6;
    const MULTICAST: usize = 12;
    const MAC: usize = 16;
    const NAME: usize = 22;

    /// Build the DIB. The name is cut at a character boundary so that at
    /// least one NUL terminator remains.
    pub fn new(info: &DeviceInfo<'_>) -> Self {
        let mut payload = [0u8; Self::SIZE - 2];
        payload[Self::MEDIUM] = info.medium as u8;
        payload[Self::STATUS] = info.status;
        payload[Self::ADDRESS..Self::PROJECT].copy_from_slice(&info.individual_address.bytes());
        payload[Self::PROJECT..Self::SERIAL]
            .copy_from_slice(&codec::u16_to_bytes(info.project_installation_id));
        payload[Self::SERIAL..Self::MULTICAST].copy_from_slice(&info.serial_number);
        payload[Self::MULTICAST..Self::MAC]
            .copy_from_slice(&codec::host_address_to_bytes(info.multicast_address));
        payload[Self::MAC..Self::NAME].copy_from_slice(&info.mac_address);

        let name = truncate_to_boundary(info.name, Self::NAME_SIZE - 1);
        payload[Self::NAME..Self::NAME + name.len()].copy_from_slice(name.as_bytes());
        Self::with_payload(DescriptionType::DeviceInfo, &payload)
    }

    /// Medium, `None` when unknown.
    pub fn medium(&self) -> Option<KnxMedium> {
        self.payload().get(Self::MEDIUM).copied().and_then(KnxMedium::from_u8)
    }

    /// Raw device status.
    pub fn device_status(&self) -> u8 {
        self.payload().get(Self::STATUS).copied().unwrap_or(0)
    }

    /// Programming mode flag from the status octet.
    pub fn is_programming_mode(&self) -> bool {
        self.device_status() & 0x01 != 0
    }

    /// Individual address of the device.
    pub fn individual_address(&self) -> Option<IndividualAddress> {
        IndividualAddress::from_bytes(self.payload(), Self::ADDRESS)
    }

    /// Project-installation identifier.
    pub fn project_installation_id(&self) -> u16 {
        codec::u16_from_bytes(self.payload(), Self::PROJECT).unwrap_or(0)
    }

    /// KNX serial number.
    pub fn serial_number(&self) -> [u8; 6] {
        codec::array_at(self.payload(), Self::SERIAL).unwrap_or_default()
    }

    /// Routing multicast address.
    pub fn multicast_address(&self) -> Ipv4Addr {
        codec::host_address_from_bytes(self.payload(), Self::MULTICAST).unwrap_or_default()
    }

    /// Ethernet MAC address.
    pub fn mac_address(&self) -> [u8; 6] {
        codec::array_at(self.payload(), Self::MAC).unwrap_or_default()
    }

    /// Friendly name up to the first NUL. Invalid UTF-8 ends the name.
    pub fn device_name(&self) -> DeviceName {
        let raw = self
            .payload()
            .get(Self::NAME..)
            .unwrap_or(&[]);
        let raw = raw.split(|&b| b == 0).next().unwrap_or(&[]);
        let text = match core::str::from_utf8(raw) {
            Ok(text) => text,
            Err(e) => core::str::from_utf8(&raw[..e.valid_up_to()]).unwrap_or(""),
        };
        let mut name = DeviceName::new();
        // The field is NAME_SIZE bytes, so this cannot overflow.
        let _ = name.push_str(truncate_to_boundary(text, Self::NAME_SIZE));
        name
    }

    /// 54 bytes with the device info code.
    pub fn is_valid(&self) -> bool {
        self.as_struct().is_valid()
            && self.size() == Self::SIZE
            && self.code() == Some(DescriptionType::DeviceInfo)
    }
}

fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
