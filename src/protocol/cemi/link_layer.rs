//! `L_Data`, `L_Raw`, `L_Poll_Data` and `L_Busmon` frames.
//!
//! ## Frame Structure
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Message Code (1 byte)                    │
//! ├──────────────────────────────────────────┤
//! │ Additional Info Length (1 byte)          │
//! ├──────────────────────────────────────────┤
//! │ Additional Info (variable)               │
//! ├──────────────────────────────────────────┤
//! │ Service Information                      │
//! │  ├─ Control Field 1 (1 byte)             │
//! │  ├─ Control Field 2 (1 byte)             │
//! │  ├─ Source Address (2 bytes)             │
//! │  ├─ Destination Address (2 bytes)        │
//! │  ├─ NPDU Length (1 byte)                 │
//! │  └─ TPDU (NPDU Length + 1 bytes)         │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use knx_ip_core::protocol::cemi::{tpdu_factory::multicast, LinkLayerFrame, MessageCode};
//! use knx_ip_core::KnxAddress;
//!
//! let frame = LinkLayerFrame::from_bytes(&[
//!     0x29, 0x00, 0xBC, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x01, 0x00, 0x81,
//! ]);
//! assert!(frame.is_valid());
//! assert_eq!(frame.message_code(), Some(MessageCode::LDataInd));
//! assert_eq!(frame.destination_address(), KnxAddress::group(0x0A03));
//! assert_eq!(frame.tpdu(), &multicast::group_value_write_short(1));
//! ```

use alloc::vec::Vec;

use super::additional_info::{AdditionalInfo, AdditionalInfoType};
use super::control_field::{ControlField1, ControlField2};
use super::message_code::MessageCode;
use super::tpdu::Tpdu;
use crate::addressing::{AddressType, KnxAddress};

/// Link-layer cEMI frame.
///
/// Parsing never fails. A frame decoded from malformed input keeps
/// whatever could be read and reports `is_valid() == false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkLayerFrame {
    message_code: u8,
    additional_info_length: u8,
    additional_infos: Vec<AdditionalInfo>,
    control1: ControlField1,
    control2: ControlField2,
    source: u16,
    destination: u16,
    npdu_length: u8,
    tpdu: Tpdu,
    complete: bool,
}

impl Default for LinkLayerFrame {
    fn default() -> Self {
        Self::new(MessageCode::LDataReq)
    }
}

impl LinkLayerFrame {
    /// Octets before the TPDU when no additional info is present.
    pub const MIN_SIZE: usize = 9;

    /// Empty frame with default control fields and no TPDU.
    pub fn new(code: MessageCode) -> Self {
        Self {
            message_code: code.to_u8(),
            additional_info_length: 0,
            additional_infos: Vec::new(),
            control1: ControlField1::default(),
            control2: ControlField2::default(),
            source: 0,
            destination: 0,
            npdu_length: 0,
            tpdu: Tpdu::invalid(),
            complete: true,
        }
    }

    /// Frame carrying `tpdu` from `source` to `destination`.
    ///
    /// The destination type is written to control field 2; control field 1
    /// keeps its default.
    pub fn with_tpdu(
        code: MessageCode,
        source: KnxAddress,
        destination: KnxAddress,
        tpdu: Tpdu,
    ) -> Self {
        let mut frame = Self::new(code);
        frame.set_source_address(source);
        frame.set_destination_address(destination);
        frame.set_tpdu(tpdu);
        frame
    }

    /// Decode a frame. Never fails; check [`is_valid`](Self::is_valid).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut frame = Self::new(MessageCode::LDataReq);
        frame.complete = false;

        let (Some(&code), Some(&info_length)) = (bytes.first(), bytes.get(1)) else {
            frame.message_code = bytes.first().copied().unwrap_or(0);
            return frame;
        };
        frame.message_code = code;
        frame.additional_info_length = info_length;

        let info_end = 2 + usize::from(info_length);
        let mut offset = 2;
        while offset < info_end.min(bytes.len()) {
            let info = AdditionalInfo::from_bytes(bytes, offset);
            if info.size() == 0 {
                break;
            }
            offset += info.size();
            frame.additional_infos.push(info);
        }

        let Some(service) = bytes.get(info_end..) else {
            return frame;
        };
        if service.len() < 7 {
            return frame;
        }
        frame.control1 = ControlField1::from(service[0]);
        frame.control2 = ControlField2::from(service[1]);
        frame.source = u16::from_be_bytes([service[2], service[3]]);
        frame.destination = u16::from_be_bytes([service[4], service[5]]);
        frame.npdu_length = service[6];

        let tpdu_end = 7 + usize::from(frame.npdu_length) + 1;
        if let Some(tpdu) = service.get(7..tpdu_end) {
            frame.tpdu = Tpdu::from_bytes(tpdu, frame.destination_address());
            frame.complete = service.len() == tpdu_end;
        }
        frame
    }

    /// Message code, `None` when unknown.
    pub fn message_code(&self) -> Option<MessageCode> {
        MessageCode::from_u8(self.message_code)
    }

    /// Replace the message code.
    pub fn set_message_code(&mut self, code: MessageCode) {
        self.message_code = code.to_u8();
    }

    /// Declared length of the additional info block.
    pub fn additional_info_length(&self) -> u8 {
        self.additional_info_length
    }

    /// Additional info elements in frame order.
    pub fn additional_infos(&self) -> &[AdditionalInfo] {
        &self.additional_infos
    }

    /// Append an element. Invalid elements, or elements that would push the
    /// block past 255 octets, are ignored.
    pub fn add_additional_info(&mut self, info: AdditionalInfo) -> bool {
        let length = usize::from(self.additional_info_length) + info.size();
        if !info.is_valid() || length > usize::from(u8::MAX) {
            return false;
        }
        self.additional_info_length = length as u8;
        self.additional_infos.push(info);
        true
    }

    /// Drop every element of `info_type`.
    pub fn remove_additional_info(&mut self, info_type: AdditionalInfoType) {
        self.additional_infos
            .retain(|info| info.info_type() != Some(info_type));
        self.additional_info_length = self.infos_size() as u8;
    }

    /// Drop all additional info.
    pub fn clear_additional_info(&mut self) {
        self.additional_infos.clear();
        self.additional_info_length = 0;
    }

    /// Control field 1.
    pub fn control_field1(&self) -> ControlField1 {
        self.control1
    }

    /// Replace control field 1.
    pub fn set_control_field1(&mut self, control: ControlField1) {
        self.control1 = control;
    }

    /// Control field 2.
    pub fn control_field2(&self) -> ControlField2 {
        self.control2
    }

    /// Replace control field 2. The destination type follows its group bit.
    pub fn set_control_field2(&mut self, control: ControlField2) {
        self.control2 = control;
    }

    /// Source address, always individual.
    pub fn source_address(&self) -> KnxAddress {
        KnxAddress::individual(self.source)
    }

    /// Set the source address.
    pub fn set_source_address(&mut self, address: KnxAddress) {
        self.source = address.value();
    }

    /// Destination address typed by control field 2.
    pub fn destination_address(&self) -> KnxAddress {
        let kind = if self.control2.is_group_address() {
            AddressType::Group
        } else {
            AddressType::Individual
        };
        KnxAddress::new(kind, self.destination)
    }

    /// Set the destination address and the matching control field 2 bit.
    pub fn set_destination_address(&mut self, address: KnxAddress) {
        self.destination = address.value();
        self.control2.set_group_address(address.is_group());
    }

    /// Length octet: TPDU size minus one.
    pub fn npdu_length(&self) -> u8 {
        self.npdu_length
    }

    /// Transport PDU.
    pub fn tpdu(&self) -> &Tpdu {
        &self.tpdu
    }

    /// Replace the TPDU and update the length octet.
    pub fn set_tpdu(&mut self, tpdu: Tpdu) {
        self.npdu_length = tpdu.size().saturating_sub(1) as u8;
        self.tpdu = tpdu;
    }

    /// Encoded size.
    pub fn size(&self) -> usize {
        2 + usize::from(self.additional_info_length) + 7 + self.tpdu.size()
    }

    /// Encode the frame.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        out.push(self.message_code);
        out.push(self.additional_info_length);
        for info in &self.additional_infos {
            out.extend_from_slice(info.bytes());
        }
        out.push(self.control1.raw());
        out.push(self.control2.raw());
        out.extend_from_slice(&self.source.to_be_bytes());
        out.extend_from_slice(&self.destination.to_be_bytes());
        out.push(self.npdu_length);
        out.extend_from_slice(&self.tpdu.bytes());
        out
    }

    /// Link-layer message code, consistent additional info, complete input
    /// and a TPDU matching the length octet.
    pub fn is_valid(&self) -> bool {
        let code_ok = self.message_code().is_some_and(MessageCode::is_link_layer);
        let infos_ok = self.additional_infos.iter().all(AdditionalInfo::is_valid)
            && self.infos_size() == usize::from(self.additional_info_length);
        code_ok
            && infos_ok
            && self.complete
            && self.tpdu.is_valid()
            && usize::from(self.npdu_length) + 1 == self.tpdu.size()
    }

    fn infos_size(&self) -> usize {
        self.additional_infos.iter().map(AdditionalInfo::size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::cemi::control_field::Priority;
    use crate::protocol::cemi::tpdu::{Apci, Tpci};
    use crate::protocol::cemi::tpdu_factory::{connection_oriented, multicast};

    const GROUP_WRITE: [u8; 11] =
        [0x29, 0x00, 0xBC, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x01, 0x00, 0x81];

    #[test]
    fn test_parse_group_write() {
        let frame = LinkLayerFrame::from_bytes(&GROUP_WRITE);
        assert!(frame.is_valid());
        assert_eq!(frame.message_code(), Some(MessageCode::LDataInd));
        assert_eq!(frame.source_address(), KnxAddress::individual(0x1101));
        assert_eq!(frame.destination_address(), KnxAddress::group(0x0A03));
        assert_eq!(frame.npdu_length(), 1);
        assert_eq!(frame.tpdu().apci(), Apci::GroupValueWrite);
        assert_eq!(frame.tpdu().apci_data(), 1);
        assert_eq!(frame.control_field1().priority(), Priority::Low);
        assert_eq!(frame.bytes(), GROUP_WRITE);
    }

    #[test]
    fn test_parse_with_additional_info() {
        let bytes = [
            0x11, 0x04, 0x03, 0x01, 0x00, 0x00, 0xBC, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x01, 0x00,
            0x80,
        ];
        let frame = LinkLayerFrame::from_bytes(&bytes);
        assert!(!frame.is_valid(), "declared length 4 but element is 3 octets");

        let bytes = [
            0x11, 0x03, 0x03, 0x01, 0x00, 0xBC, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x01, 0x00, 0x80,
        ];
        let frame = LinkLayerFrame::from_bytes(&bytes);
        assert!(frame.is_valid());
        assert_eq!(frame.additional_infos().len(), 1);
        assert_eq!(
            frame.additional_infos()[0].info_type(),
            Some(AdditionalInfoType::BusmonitorStatusInfo)
        );
        assert_eq!(frame.bytes(), bytes);
    }

    #[test]
    fn test_build() {
        let mut frame = LinkLayerFrame::with_tpdu(
            MessageCode::LDataReq,
            KnxAddress::individual(0),
            KnxAddress::group(0x0A03),
            multicast::group_value_write(&[0x0C, 0x33]),
        );
        assert!(frame.is_valid());
        assert_eq!(frame.npdu_length(), 3);
        assert_eq!(
            frame.bytes(),
            [0x11, 0x00, 0x94, 0xE0, 0x00, 0x00, 0x0A, 0x03, 0x03, 0x00, 0x80, 0x0C, 0x33]
        );

        let info = AdditionalInfo::new(AdditionalInfoType::BusmonitorStatusInfo, &[0x00]);
        assert!(frame.add_additional_info(info));
        assert_eq!(frame.additional_info_length(), 3);
        assert!(frame.is_valid());
        frame.remove_additional_info(AdditionalInfoType::BusmonitorStatusInfo);
        assert_eq!(frame.additional_info_length(), 0);
        assert!(!frame.add_additional_info(AdditionalInfo::default()));
    }

    #[test]
    fn test_individual_destination() {
        let frame = LinkLayerFrame::with_tpdu(
            MessageCode::LDataReq,
            KnxAddress::individual(0x1101),
            KnxAddress::individual(0x1105),
            connection_oriented::connect(),
        );
        assert!(!frame.control_field2().is_group_address());
        assert_eq!(frame.npdu_length(), 0);
        assert!(frame.is_valid());

        let parsed = LinkLayerFrame::from_bytes(&frame.bytes());
        assert_eq!(parsed.tpdu().tpci(), Tpci::Connect);
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_malformed_input() {
        assert!(!LinkLayerFrame::from_bytes(&[]).is_valid());
        assert!(!LinkLayerFrame::from_bytes(&GROUP_WRITE[..9]).is_valid());

        let mut trailing = GROUP_WRITE.to_vec();
        trailing.push(0xFF);
        assert!(!LinkLayerFrame::from_bytes(&trailing).is_valid());

        let mut device_management = GROUP_WRITE;
        device_management[0] = 0xFC;
        assert!(!LinkLayerFrame::from_bytes(&device_management).is_valid());

        assert!(!LinkLayerFrame::new(MessageCode::LDataReq).is_valid());
    }
}
