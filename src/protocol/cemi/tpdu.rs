//! Transport protocol data unit.
//!
//! ```text
//! Octet 0: TPCI (bits 7..2, sequence number in 5..2 when numbered)
//!          | APCI bits 9..8
//! Octet 1: APCI bits 7..0; for 4-bit APCIs the low 6 bits carry data
//! Octet 2..: payload
//! ```
//!
//! Control TPDUs (`Connect`, `Disconnect`, `Ack`, `Nak`) are a single octet.
//! The TPCI of a data TPDU is not fully encoded on the wire: group,
//! broadcast and individual transfers share the same bits and are told
//! apart by the destination address of the enclosing frame.

use alloc::vec::Vec;

use crate::addressing::{AddressType, KnxAddress};
use crate::byte_store::ByteStore;

/// Transport layer control information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tpci {
    /// `T_Data_Group`: unnumbered, group destination
    DataGroup,
    /// `T_Data_Tag_Group`: unnumbered, group destination, tag bit set
    DataTagGroup,
    /// `T_Data_Broadcast`: unnumbered, destination 0/0/0
    DataBroadcast,
    /// `T_Data_Individual`: unnumbered, individual destination
    DataIndividual,
    /// `T_Data_Connected`: numbered, individual destination
    DataConnected,
    /// `T_Connect`
    Connect,
    /// `T_Disconnect`
    Disconnect,
    /// `T_ACK`, numbered
    Ack,
    /// `T_NAK`, numbered
    Nak,
    /// Not a valid transport control field
    Invalid,
}

impl Tpci {
    /// One-octet control TPDUs.
    pub const fn is_control(self) -> bool {
        matches!(self, Self::Connect | Self::Disconnect | Self::Ack | Self::Nak)
    }

    /// TPCIs carrying a sequence number.
    pub const fn is_numbered(self) -> bool {
        matches!(self, Self::DataConnected | Self::Ack | Self::Nak)
    }

    /// TPCIs followed by an APCI.
    pub const fn is_data(self) -> bool {
        matches!(
            self,
            Self::DataGroup
                | Self::DataTagGroup
                | Self::DataBroadcast
                | Self::DataIndividual
                | Self::DataConnected
        )
    }

    const fn bits(self, seq: u8) -> u8 {
        let seq = (seq & 0x0F) << 2;
        match self {
            Self::DataGroup | Self::DataBroadcast | Self::DataIndividual | Self::Invalid => 0x00,
            Self::DataTagGroup => 0x04,
            Self::DataConnected => 0x40 | seq,
            Self::Connect => 0x80,
            Self::Disconnect => 0x81,
            Self::Ack => 0xC2 | seq,
            Self::Nak => 0xC3 | seq,
        }
    }
}

/// Application layer control information
///
/// The discriminant is the 10-bit APCI code. For 4-bit codes the low six
/// bits are zero and carry data on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Apci {
    /// `A_GroupValue_Read`
    GroupValueRead = 0x000,
    /// `A_GroupValue_Response`
    GroupValueResponse = 0x040,
    /// `A_GroupValue_Write`
    GroupValueWrite = 0x080,
    /// `A_IndividualAddress_Write`
    IndividualAddressWrite = 0x0C0,
    /// `A_IndividualAddress_Read`
    IndividualAddressRead = 0x100,
    /// `A_IndividualAddress_Response`
    IndividualAddressResponse = 0x140,
    /// `A_ADC_Read`
    AdcRead = 0x180,
    /// `A_ADC_Response`
    AdcResponse = 0x1C0,
    /// `A_SystemNetworkParameter_Read`
    SystemNetworkParameterRead = 0x1C8,
    /// `A_SystemNetworkParameter_Response`
    SystemNetworkParameterResponse = 0x1C9,
    /// `A_SystemNetworkParameter_Write`
    SystemNetworkParameterWrite = 0x1CA,
    /// `A_Memory_Read`
    MemoryRead = 0x200,
    /// `A_Memory_Response`
    MemoryResponse = 0x240,
    /// `A_Memory_Write`
    MemoryWrite = 0x280,
    /// `A_UserMemory_Read`
    UserMemoryRead = 0x2C0,
    /// `A_UserMemory_Response`
    UserMemoryResponse = 0x2C1,
    /// `A_UserMemory_Write`
    UserMemoryWrite = 0x2C2,
    /// `A_UserManufacturerInfo_Read`
    UserManufacturerInfoRead = 0x2C5,
    /// `A_UserManufacturerInfo_Response`
    UserManufacturerInfoResponse = 0x2C6,
    /// `A_FunctionPropertyCommand`
    FunctionPropertyCommand = 0x2C7,
    /// `A_FunctionPropertyState_Read`
    FunctionPropertyStateRead = 0x2C8,
    /// `A_FunctionPropertyState_Response`
    FunctionPropertyStateResponse = 0x2C9,
    /// `A_DeviceDescriptor_Read`
    DeviceDescriptorRead = 0x300,
    /// `A_DeviceDescriptor_Response`
    DeviceDescriptorResponse = 0x340,
    /// `A_Restart`
    Restart = 0x380,
    /// `A_Authorize_Request`
    AuthorizeRequest = 0x3D1,
    /// `A_Authorize_Response`
    AuthorizeResponse = 0x3D2,
    /// `A_Key_Write`
    KeyWrite = 0x3D3,
    /// `A_Key_Response`
    KeyResponse = 0x3D4,
    /// `A_PropertyValue_Read`
    PropertyValueRead = 0x3D5,
    /// `A_PropertyValue_Response`
    PropertyValueResponse = 0x3D6,
    /// `A_PropertyValue_Write`
    PropertyValueWrite = 0x3D7,
    /// `A_PropertyDescription_Read`
    PropertyDescriptionRead = 0x3D8,
    /// `A_PropertyDescription_Response`
    PropertyDescriptionResponse = 0x3D9,
    /// `A_NetworkParameter_Read`
    NetworkParameterRead = 0x3DA,
    /// `A_NetworkParameter_Response`
    NetworkParameterResponse = 0x3DB,
    /// `A_IndividualAddressSerialNumber_Read`
    IndividualAddressSerialNumberRead = 0x3DC,
    /// `A_IndividualAddressSerialNumber_Response`
    IndividualAddressSerialNumberResponse = 0x3DD,
    /// `A_IndividualAddressSerialNumber_Write`
    IndividualAddressSerialNumberWrite = 0x3DE,
    /// `A_NetworkParameter_Write`
    NetworkParameterWrite = 0x3E4,
    /// `A_Link_Read`
    LinkRead = 0x3E5,
    /// `A_Link_Response`
    LinkResponse = 0x3E6,
    /// `A_Link_Write`
    LinkWrite = 0x3E7,
    /// `A_FileStream_InfoReport`
    FileStreamInfoReport = 0x3F0,
    /// Not a valid application control field
    Invalid = 0xFFFF,
}

impl Apci {
    /// The 10-bit code.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Codes whose low six bits carry data.
    pub const fn is_four_bit(self) -> bool {
        matches!(
            self,
            Self::GroupValueRead
                | Self::GroupValueResponse
                | Self::GroupValueWrite
                | Self::IndividualAddressWrite
                | Self::IndividualAddressRead
                | Self::IndividualAddressResponse
                | Self::AdcRead
                | Self::AdcResponse
                | Self::MemoryRead
                | Self::MemoryResponse
                | Self::MemoryWrite
                | Self::DeviceDescriptorRead
                | Self::DeviceDescriptorResponse
                | Self::Restart
        )
    }

    /// Resolve a raw 10-bit value.
    ///
    /// `0x1C8..=0x1CA` are system network parameter services on a broadcast
    /// and `A_ADC_Response` with channel 8..=10 otherwise.
    pub const fn from_raw(raw: u16, tpci: Tpci) -> Self {
        let ten_bit = match raw & 0x03FF {
            0x1C8 => Self::SystemNetworkParameterRead,
            0x1C9 => Self::SystemNetworkParameterResponse,
            0x1CA => Self::SystemNetworkParameterWrite,
            0x2C0 => Self::UserMemoryRead,
            0x2C1 => Self::UserMemoryResponse,
            0x2C2 => Self::UserMemoryWrite,
            0x2C5 => Self::UserManufacturerInfoRead,
            0x2C6 => Self::UserManufacturerInfoResponse,
            0x2C7 => Self::FunctionPropertyCommand,
            0x2C8 => Self::FunctionPropertyStateRead,
            0x2C9 => Self::FunctionPropertyStateResponse,
            0x3D1 => Self::AuthorizeRequest,
            0x3D2 => Self::AuthorizeResponse,
            0x3D3 => Self::KeyWrite,
            0x3D4 => Self::KeyResponse,
            0x3D5 => Self::PropertyValueRead,
            0x3D6 => Self::PropertyValueResponse,
            0x3D7 => Self::PropertyValueWrite,
            0x3D8 => Self::PropertyDescriptionRead,
            0x3D9 => Self::PropertyDescriptionResponse,
            0x3DA => Self::NetworkParameterRead,
            0x3DB => Self::NetworkParameterResponse,
            0x3DC => Self::IndividualAddressSerialNumberRead,
            0x3DD => Self::IndividualAddressSerialNumberResponse,
            0x3DE => Self::IndividualAddressSerialNumberWrite,
            0x3E4 => Self::NetworkParameterWrite,
            0x3E5 => Self::LinkRead,
            0x3E6 => Self::LinkResponse,
            0x3E7 => Self::LinkWrite,
            0x3F0 => Self::FileStreamInfoReport,
            _ => Self::Invalid,
        };
        let system_parameter = matches!(
            ten_bit,
            Self::SystemNetworkParameterRead
                | Self::SystemNetworkParameterResponse
                | Self::SystemNetworkParameterWrite
        );
        if !matches!(ten_bit, Self::Invalid)
            && (!system_parameter || matches!(tpci, Tpci::DataBroadcast))
        {
            return ten_bit;
        }

        match raw & 0x03C0 {
            0x000 => Self::GroupValueRead,
            0x040 => Self::GroupValueResponse,
            0x080 => Self::GroupValueWrite,
            0x0C0 => Self::IndividualAddressWrite,
            0x100 => Self::IndividualAddressRead,
            0x140 => Self::IndividualAddressResponse,
            0x180 => Self::AdcRead,
            0x1C0 => Self::AdcResponse,
            0x200 => Self::MemoryRead,
            0x240 => Self::MemoryResponse,
            0x280 => Self::MemoryWrite,
            0x300 => Self::DeviceDescriptorRead,
            0x340 => Self::DeviceDescriptorResponse,
            0x380 => Self::Restart,
            _ => Self::Invalid,
        }
    }
}

/// Transport protocol data unit.
///
/// ```
/// use knx_ip_core::protocol::cemi::{Apci, Tpci, Tpdu};
/// use knx_ip_core::KnxAddress;
///
/// let tpdu = Tpdu::from_bytes(&[0x00, 0x81], KnxAddress::group(0x0A03));
/// assert_eq!(tpdu.tpci(), Tpci::DataGroup);
/// assert_eq!(tpdu.apci(), Apci::GroupValueWrite);
/// assert_eq!(tpdu.apci_data(), 0x01);
/// assert_eq!(tpdu.bytes(), [0x00, 0x81]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tpdu {
    tpci: Tpci,
    seq: u8,
    apci: Apci,
    apci_data: u8,
    data: ByteStore,
}

impl Default for Tpdu {
    fn default() -> Self {
        Self::invalid()
    }
}

impl Tpdu {
    /// Largest payload after the two TPCI/APCI octets.
    pub const MAX_DATA_SIZE: usize = 254;

    /// An invalid TPDU.
    pub const fn invalid() -> Self {
        Self {
            tpci: Tpci::Invalid,
            seq: 0,
            apci: Apci::Invalid,
            apci_data: 0,
            data: ByteStore::new(),
        }
    }

    /// Data TPDU with a payload after the APCI.
    pub fn new(tpci: Tpci, apci: Apci, seq: u8, data: &[u8]) -> Self {
        Self::with_apci_data(tpci, apci, seq, 0, data)
    }

    /// Data TPDU with `apci_data` merged into the low six bits of a 4-bit
    /// APCI. Anything that does not fit yields an invalid TPDU.
    pub fn with_apci_data(tpci: Tpci, apci: Apci, seq: u8, apci_data: u8, data: &[u8]) -> Self {
        let data_fits = apci_data == 0 || (apci.is_four_bit() && apci_data <= 0x3F);
        if !tpci.is_data()
            || matches!(apci, Apci::Invalid)
            || seq > 15
            || !data_fits
            || data.len() > Self::MAX_DATA_SIZE
        {
            return Self::invalid();
        }
        Self {
            tpci,
            seq: if tpci.is_numbered() { seq } else { 0 },
            apci,
            apci_data,
            data: ByteStore::from_slice(data),
        }
    }

    /// One-octet control TPDU.
    pub fn control(tpci: Tpci, seq: u8) -> Self {
        if !tpci.is_control() || seq > 15 {
            return Self::invalid();
        }
        Self {
            tpci,
            seq: if tpci.is_numbered() { seq } else { 0 },
            apci: Apci::Invalid,
            apci_data: 0,
            data: ByteStore::new(),
        }
    }

    /// Decode a TPDU addressed to `destination`.
    pub fn from_bytes(bytes: &[u8], destination: KnxAddress) -> Self {
        let Some(&first) = bytes.first() else {
            return Self::invalid();
        };
        let seq = (first >> 2) & 0x0F;
        let individual = destination.address_type() == AddressType::Individual;

        if first & 0x80 != 0 {
            let tpci = match first & 0xC3 {
                0x80 if first == 0x80 => Tpci::Connect,
                0x81 if first == 0x81 => Tpci::Disconnect,
                0xC2 => Tpci::Ack,
                0xC3 => Tpci::Nak,
                _ => Tpci::Invalid,
            };
            if bytes.len() != 1 || !individual {
                return Self::invalid();
            }
            return Self::control(tpci, seq);
        }

        let Some(&second) = bytes.get(1) else {
            return Self::invalid();
        };
        let tpci = if first & 0x40 != 0 {
            if individual {
                Tpci::DataConnected
            } else {
                Tpci::Invalid
            }
        } else {
            match (individual, first & 0x3C) {
                (true, 0x00) => Tpci::DataIndividual,
                (false, 0x00) if destination.is_broadcast() => Tpci::DataBroadcast,
                (false, 0x00) => Tpci::DataGroup,
                (false, 0x04) => Tpci::DataTagGroup,
                _ => Tpci::Invalid,
            }
        };

        let raw = (u16::from(first & 0x03) << 8) | u16::from(second);
        let apci = Apci::from_raw(raw, tpci);
        let apci_data = if apci.is_four_bit() { second & 0x3F } else { 0 };
        Self::with_apci_data(tpci, apci, seq, apci_data, &bytes[2..])
    }

    /// Transport control field.
    pub const fn tpci(&self) -> Tpci {
        self.tpci
    }

    /// Sequence number, 0 for unnumbered TPCIs.
    pub const fn sequence_number(&self) -> u8 {
        self.seq
    }

    /// Application control field, `Invalid` for control TPDUs.
    pub const fn apci(&self) -> Apci {
        self.apci
    }

    /// Data in the low six bits of a 4-bit APCI.
    pub const fn apci_data(&self) -> u8 {
        self.apci_data
    }

    /// Payload following the APCI.
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Encoded size: 1 for control TPDUs, 2 + payload for data TPDUs.
    pub fn size(&self) -> usize {
        match self.tpci {
            Tpci::Invalid => 0,
            tpci if tpci.is_control() => 1,
            _ => 2 + self.data.size(),
        }
    }

    /// Encoded octets, empty for an invalid TPDU.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        if self.tpci == Tpci::Invalid {
            return out;
        }
        let tpci = self.tpci.bits(self.seq);
        if self.tpci.is_control() {
            out.push(tpci);
            return out;
        }
        let code = self.apci.code() | u16::from(self.apci_data);
        out.push(tpci | ((code >> 8) as u8 & 0x03));
        out.push(code as u8);
        out.extend_from_slice(self.data.as_slice());
        out
    }

    /// A known TPCI, and for data TPDUs a known APCI.
    pub fn is_valid(&self) -> bool {
        match self.tpci {
            Tpci::Invalid => false,
            tpci if tpci.is_control() => true,
            _ => self.apci != Apci::Invalid && self.data.size() <= Self::MAX_DATA_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> KnxAddress {
        KnxAddress::group(0x0A03)
    }

    fn device() -> KnxAddress {
        KnxAddress::individual(0x1101)
    }

    #[test]
    fn test_group_value_read() {
        let tpdu = Tpdu::from_bytes(&[0x00, 0x00], group());
        assert!(tpdu.is_valid());
        assert_eq!(tpdu.tpci(), Tpci::DataGroup);
        assert_eq!(tpdu.apci(), Apci::GroupValueRead);
        assert_eq!(tpdu.size(), 2);
    }

    #[test]
    fn test_group_value_write_long() {
        let tpdu = Tpdu::from_bytes(&[0x00, 0x80, 0x0C, 0x33], group());
        assert_eq!(tpdu.apci(), Apci::GroupValueWrite);
        assert_eq!(tpdu.apci_data(), 0);
        assert_eq!(tpdu.data(), &[0x0C, 0x33]);
        assert_eq!(tpdu.bytes(), [0x00, 0x80, 0x0C, 0x33]);
    }

    #[test]
    fn test_tpci_depends_on_destination() {
        let bytes = [0x01, 0x00];
        assert_eq!(Tpdu::from_bytes(&bytes, KnxAddress::group(0)).tpci(), Tpci::DataBroadcast);
        assert_eq!(Tpdu::from_bytes(&bytes, device()).tpci(), Tpci::DataIndividual);
        assert_eq!(Tpdu::from_bytes(&[0x04, 0x80], group()).tpci(), Tpci::DataTagGroup);
    }

    #[test]
    fn test_numbered_data() {
        // DataConnected seq 3, memory read count 2 at 0x0104
        let bytes = [0x4E, 0x02, 0x01, 0x04];
        let tpdu = Tpdu::from_bytes(&bytes, device());
        assert_eq!(tpdu.tpci(), Tpci::DataConnected);
        assert_eq!(tpdu.sequence_number(), 3);
        assert_eq!(tpdu.apci(), Apci::MemoryRead);
        assert_eq!(tpdu.apci_data(), 2);
        assert_eq!(tpdu.bytes(), bytes);

        // numbered data to a group is not defined
        assert!(!Tpdu::from_bytes(&bytes, group()).is_valid());
    }

    #[test]
    fn test_control_tpdus() {
        assert_eq!(Tpdu::from_bytes(&[0x80], device()).tpci(), Tpci::Connect);
        assert_eq!(Tpdu::from_bytes(&[0x81], device()).tpci(), Tpci::Disconnect);

        let ack = Tpdu::from_bytes(&[0xC2 | (5 << 2)], device());
        assert_eq!(ack.tpci(), Tpci::Ack);
        assert_eq!(ack.sequence_number(), 5);
        assert_eq!(ack.size(), 1);
        assert_eq!(ack.bytes(), [0xD6]);

        let nak = Tpdu::control(Tpci::Nak, 15);
        assert_eq!(nak.bytes(), [0xFF]);

        assert!(!Tpdu::from_bytes(&[0x80, 0x00], device()).is_valid());
        assert!(!Tpdu::from_bytes(&[0x80], group()).is_valid());
        assert!(!Tpdu::from_bytes(&[0x84], device()).is_valid());
    }

    #[test]
    fn test_system_network_parameter_needs_broadcast() {
        let bytes = [0x01, 0xC8, 0x00, 0x00, 0x00, 0x10];
        let broadcast = Tpdu::from_bytes(&bytes, KnxAddress::group(0));
        assert_eq!(broadcast.apci(), Apci::SystemNetworkParameterRead);

        let p2p = Tpdu::from_bytes(&bytes, device());
        assert_eq!(p2p.apci(), Apci::AdcResponse);
        assert_eq!(p2p.apci_data(), 8);
        assert_eq!(p2p.bytes(), bytes);
    }

    #[test]
    fn test_ten_bit_apci() {
        let tpdu = Tpdu::from_bytes(&[0x43, 0xD5, 0x00, 0x0B, 0x10, 0x01], device());
        assert_eq!(tpdu.apci(), Apci::PropertyValueRead);
        assert_eq!(tpdu.apci_data(), 0);
        assert_eq!(tpdu.data(), &[0x00, 0x0B, 0x10, 0x01]);
    }

    #[test]
    fn test_invalid_input() {
        assert!(!Tpdu::from_bytes(&[], group()).is_valid());
        assert!(!Tpdu::from_bytes(&[0x00], group()).is_valid());
        assert!(!Tpdu::from_bytes(&[0x03, 0xFF], device()).is_valid());
        assert!(Tpdu::invalid().bytes().is_empty());
        assert!(!Tpdu::with_apci_data(Tpci::DataGroup, Apci::UserMemoryRead, 0, 1, &[]).is_valid());
        assert!(!Tpdu::new(Tpci::DataConnected, Apci::MemoryRead, 16, &[]).is_valid());
    }
}
