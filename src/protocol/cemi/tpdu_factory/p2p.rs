//! Point-to-point services.
//!
//! Most services here may run with or without a transport connection and
//! take a [`Mode`]; the sequence number only reaches the wire for
//! [`Mode::ConnectionOriented`]. The network parameter services at the end
//! are always connectionless.

use super::super::interface_object::InterfaceObjectType;
use super::super::tpdu::{Apci, Tpci, Tpdu};
use super::{build, Mode};
use crate::addressing::KnxAddress;
use crate::codec::{u16_to_bytes, u8_to_bytes};

/// Kind of `A_Restart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetType {
    /// Restart without payload or response
    BasicRestart,
    /// Restart with erase code and channel, confirmed by a response
    MasterReset,
}

/// Erase code of a master reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EraseCode {
    /// Not allowed on the wire
    Reserved = 0x00,
    /// Confirmed restart
    ConfirmedRestart = 0x01,
    /// Factory reset
    FactoryReset = 0x02,
    /// Reset individual address
    ResetIa = 0x03,
    /// Reset application program
    ResetAp = 0x04,
    /// Reset parameter memory
    ResetParam = 0x05,
    /// Reset links
    ResetLinks = 0x06,
    /// Factory reset keeping the individual address
    FactoryResetWithoutIa = 0x07,
}

/// Error code of a master reset response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RestartError {
    /// Restart done
    NoError = 0x00,
    /// Access denied
    AccessDenied = 0x01,
    /// Erase code not supported
    UnsupportedEraseCode = 0x02,
    /// Channel number not valid
    InvalidChannelNumber = 0x03,
}

/// Description of a property for `A_PropertyDescription_Response`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PropertyDescription {
    /// Index of the property within the object
    pub property_index: u8,
    /// Write enable flag
    pub writeable: bool,
    /// Property data type code (0x00..=0x3F)
    pub data_type: u8,
    /// Maximum number of elements (0..=0xFFF)
    pub max_elements: u16,
    /// Read access level (0..=15)
    pub read_level: u8,
    /// Write access level (0..=15)
    pub write_level: u8,
}

/// `A_FunctionPropertyCommand`
pub fn function_property_command(
    mode: Mode,
    object_index: u8,
    property: u8,
    data: &[u8],
    seq: u8,
) -> Tpdu {
    if data.len() > 251 {
        return Tpdu::invalid();
    }
    let apci = Apci::FunctionPropertyCommand;
    build(mode.tpci(), apci, seq, 0, &[&[object_index, property], data])
}

/// `A_FunctionPropertyState_Read`
pub fn function_property_state_read(
    mode: Mode,
    object_index: u8,
    property: u8,
    data: &[u8],
    seq: u8,
) -> Tpdu {
    if data.len() > 251 {
        return Tpdu::invalid();
    }
    let apci = Apci::FunctionPropertyStateRead;
    build(mode.tpci(), apci, seq, 0, &[&[object_index, property], data])
}

/// `A_FunctionPropertyState_Response`
pub fn function_property_state_response(
    mode: Mode,
    object_index: u8,
    property: u8,
    return_code: u8,
    data: &[u8],
    seq: u8,
) -> Tpdu {
    if data.len() > 250 {
        return Tpdu::invalid();
    }
    build(
        mode.tpci(),
        Apci::FunctionPropertyStateResponse,
        seq,
        0,
        &[&[object_index, property, return_code], data],
    )
}

/// `A_DeviceDescriptor_Read`, `descriptor_type` below 64.
pub fn device_descriptor_read(mode: Mode, descriptor_type: u8, seq: u8) -> Tpdu {
    if descriptor_type >= 64 {
        return Tpdu::invalid();
    }
    build(mode.tpci(), Apci::DeviceDescriptorRead, seq, descriptor_type, &[])
}

/// `A_DeviceDescriptor_Response`
pub fn device_descriptor_response(
    mode: Mode,
    descriptor_type: u8,
    descriptor: &[u8],
    seq: u8,
) -> Tpdu {
    if descriptor_type >= 64 || descriptor.len() > 254 {
        return Tpdu::invalid();
    }
    let apci = Apci::DeviceDescriptorResponse;
    build(mode.tpci(), apci, seq, descriptor_type, &[descriptor])
}

/// `A_Restart`. A basic restart ignores erase code and channel.
pub fn restart(
    mode: Mode,
    reset_type: ResetType,
    erase_code: EraseCode,
    channel: u8,
    seq: u8,
) -> Tpdu {
    if reset_type == ResetType::BasicRestart {
        return build(mode.tpci(), Apci::Restart, seq, 0, &[]);
    }
    let channel_free = matches!(
        erase_code,
        EraseCode::ConfirmedRestart | EraseCode::ResetIa | EraseCode::ResetAp
    );
    if erase_code == EraseCode::Reserved || (channel_free && channel != 0) {
        return Tpdu::invalid();
    }
    build(mode.tpci(), Apci::Restart, seq, 0x01, &[&[erase_code as u8, channel]])
}

/// `A_Restart` response to a master reset. Basic restarts have no response.
pub fn restart_response(
    mode: Mode,
    reset_type: ResetType,
    error: RestartError,
    process_time: u16,
    seq: u8,
) -> Tpdu {
    if reset_type == ResetType::BasicRestart {
        return Tpdu::invalid();
    }
    let payload: [&[u8]; 2] = [&u8_to_bytes(error as u8), &u16_to_bytes(process_time)];
    build(mode.tpci(), Apci::Restart, seq, 0x21, &payload)
}

#[allow(clippy::too_many_arguments, reason = "one parameter per wire field")]
fn property_value(
    mode: Mode,
    apci: Apci,
    object_index: u8,
    property: u8,
    elements: u8,
    start_index: u16,
    data: &[u8],
    seq: u8,
) -> Tpdu {
    if data.len() > 249 || elements > 0x0F || start_index > 0x0FFF {
        return Tpdu::invalid();
    }
    let [start_high, start_low] = start_index.to_be_bytes();
    build(
        mode.tpci(),
        apci,
        seq,
        0,
        &[&[object_index, property, (elements << 4) | start_high, start_low], data],
    )
}

/// `A_PropertyValue_Read`
pub fn property_value_read(
    mode: Mode,
    object_index: u8,
    property: u8,
    elements: u8,
    start_index: u16,
    seq: u8,
) -> Tpdu {
    let apci = Apci::PropertyValueRead;
    property_value(mode, apci, object_index, property, elements, start_index, &[], seq)
}

/// `A_PropertyValue_Response`
pub fn property_value_response(
    mode: Mode,
    object_index: u8,
    property: u8,
    elements: u8,
    start_index: u16,
    data: &[u8],
    seq: u8,
) -> Tpdu {
    let apci = Apci::PropertyValueResponse;
    property_value(mode, apci, object_index, property, elements, start_index, data, seq)
}

/// `A_PropertyValue_Write`
pub fn property_value_write(
    mode: Mode,
    object_index: u8,
    property: u8,
    elements: u8,
    start_index: u16,
    data: &[u8],
    seq: u8,
) -> Tpdu {
    let apci = Apci::PropertyValueWrite;
    property_value(mode, apci, object_index, property, elements, start_index, data, seq)
}

/// `A_PropertyDescription_Read`
pub fn property_description_read(
    mode: Mode,
    object_index: u8,
    property: u8,
    property_index: u8,
    seq: u8,
) -> Tpdu {
    let apci = Apci::PropertyDescriptionRead;
    build(mode.tpci(), apci, seq, 0, &[&[object_index, property, property_index]])
}

/// `A_PropertyDescription_Response`
pub fn property_description_response(
    mode: Mode,
    object_index: u8,
    property: u8,
    description: PropertyDescription,
    seq: u8,
) -> Tpdu {
    let PropertyDescription {
        property_index,
        writeable,
        data_type,
        max_elements,
        read_level,
        write_level,
    } = description;
    if data_type > 0x3F || max_elements > 0x0FFF || read_level > 15 || write_level > 15 {
        return Tpdu::invalid();
    }
    let type_octet = if writeable { 0x80 | data_type } else { data_type };
    build(
        mode.tpci(),
        Apci::PropertyDescriptionResponse,
        seq,
        0,
        &[
            &[object_index, property, property_index, type_octet],
            &u16_to_bytes(max_elements),
            &[(read_level << 4) | write_level],
        ],
    )
}

/// `A_Link_Read`
pub fn link_read(mode: Mode, group_object: u8, start_index: u8, seq: u8) -> Tpdu {
    if start_index > 0x0F {
        return Tpdu::invalid();
    }
    build(mode.tpci(), Apci::LinkRead, seq, 0, &[&[group_object, start_index]])
}

/// `A_Link_Response` with up to six group addresses.
pub fn link_response(
    mode: Mode,
    group_object: u8,
    sending_address: u8,
    start_address: u8,
    addresses: &[KnxAddress],
    seq: u8,
) -> Tpdu {
    if sending_address > 15
        || start_address > 15
        || addresses.len() > 6
        || !addresses.iter().all(KnxAddress::is_group)
    {
        return Tpdu::invalid();
    }
    let mut payload = heapless::Vec::<u8, 14>::new();
    let mut encoded = [group_object, (sending_address << 4) | start_address]
        .into_iter()
        .chain(addresses.iter().flat_map(KnxAddress::bytes));
    if encoded.try_for_each(|byte| payload.push(byte)).is_err() {
        return Tpdu::invalid();
    }
    build(mode.tpci(), Apci::LinkResponse, seq, 0, &[&payload])
}

/// `A_Link_Write`, `group_address` must be a group address.
pub fn link_write(
    mode: Mode,
    group_object: u8,
    flags: u8,
    group_address: KnxAddress,
    seq: u8,
) -> Tpdu {
    if !group_address.is_group() {
        return Tpdu::invalid();
    }
    let payload: [&[u8]; 2] = [&[group_object, flags], &group_address.bytes()];
    build(mode.tpci(), Apci::LinkWrite, seq, 0, &payload)
}

/// `A_FileStream_InfoReport`
pub fn file_stream_info_report(
    mode: Mode,
    file_handle: u8,
    block_sequence: u8,
    data: &[u8],
    seq: u8,
) -> Tpdu {
    if file_handle > 15 || block_sequence > 15 || data.len() > 254 {
        return Tpdu::invalid();
    }
    let apci = Apci::FileStreamInfoReport;
    build(mode.tpci(), apci, seq, 0, &[&[(file_handle << 4) | block_sequence], data])
}

fn network_parameter(
    tpci: Tpci,
    apci: Apci,
    object: InterfaceObjectType,
    property: u8,
    head: &[u8],
    tail: &[u8],
) -> Tpdu {
    if !object.is_match(property) {
        return Tpdu::invalid();
    }
    build(tpci, apci, 0, 0, &[&u16_to_bytes(object.to_u16()), head, tail])
}

/// `A_NetworkParameter_Read`
pub fn network_parameter_read(object: InterfaceObjectType, property: u8, test_info: &[u8]) -> Tpdu {
    if test_info.len() > 250 {
        return Tpdu::invalid();
    }
    let apci = Apci::NetworkParameterRead;
    network_parameter(Tpci::DataIndividual, apci, object, property, &[property], test_info)
}

/// `A_NetworkParameter_Response`, at most 21 octets of test result.
pub fn network_parameter_response(
    object: InterfaceObjectType,
    property: u8,
    test_info: &[u8],
    test_result: &[u8],
) -> Tpdu {
    if test_result.len() > 21 || test_info.len() + test_result.len() > 250 {
        return Tpdu::invalid();
    }
    let mut head = heapless::Vec::<u8, 251>::new();
    if head.push(property).is_err() || head.extend_from_slice(test_info).is_err() {
        return Tpdu::invalid();
    }
    let apci = Apci::NetworkParameterResponse;
    network_parameter(Tpci::DataIndividual, apci, object, property, &head, test_result)
}

/// `A_NetworkParameter_Write`
pub fn network_parameter_write(object: InterfaceObjectType, property: u8, value: &[u8]) -> Tpdu {
    if value.len() > 250 {
        return Tpdu::invalid();
    }
    let apci = Apci::NetworkParameterWrite;
    network_parameter(Tpci::DataIndividual, apci, object, property, &[property], value)
}

/// The system variants carry a 12-bit property identifier followed by
/// four reserved bits and are sent as system broadcast.
fn system_property(property: u8) -> [u8; 2] {
    u16_to_bytes(u16::from(property) << 4)
}

/// `A_SystemNetworkParameter_Read`
pub fn system_network_parameter_read(
    object: InterfaceObjectType,
    property: u8,
    test_info: &[u8],
) -> Tpdu {
    if test_info.len() > 249 {
        return Tpdu::invalid();
    }
    network_parameter(
        Tpci::DataBroadcast,
        Apci::SystemNetworkParameterRead,
        object,
        property,
        &system_property(property),
        test_info,
    )
}

/// `A_SystemNetworkParameter_Response`, at most 21 octets of test result.
pub fn system_network_parameter_response(
    object: InterfaceObjectType,
    property: u8,
    test_info: &[u8],
    test_result: &[u8],
) -> Tpdu {
    if test_result.len() > 21 || test_info.len() + test_result.len() > 249 {
        return Tpdu::invalid();
    }
    let mut head = heapless::Vec::<u8, 251>::new();
    if head.extend_from_slice(&system_property(property)).is_err()
        || head.extend_from_slice(test_info).is_err()
    {
        return Tpdu::invalid();
    }
    network_parameter(
        Tpci::DataBroadcast,
        Apci::SystemNetworkParameterResponse,
        object,
        property,
        &head,
        test_result,
    )
}

/// `A_SystemNetworkParameter_Write`
pub fn system_network_parameter_write(
    object: InterfaceObjectType,
    property: u8,
    value: &[u8],
) -> Tpdu {
    if value.len() > 249 {
        return Tpdu::invalid();
    }
    network_parameter(
        Tpci::DataBroadcast,
        Apci::SystemNetworkParameterWrite,
        object,
        property,
        &system_property(property),
        value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::cemi::interface_object::property;

    const CO: Mode = Mode::ConnectionOriented;
    const CL: Mode = Mode::Connectionless;

    #[test]
    fn test_mode_selects_tpci() {
        assert_eq!(device_descriptor_read(CL, 0, 5).tpci(), Tpci::DataIndividual);
        assert_eq!(device_descriptor_read(CL, 0, 5).sequence_number(), 0);
        let tpdu = device_descriptor_read(CO, 0, 5);
        assert_eq!(tpdu.tpci(), Tpci::DataConnected);
        assert_eq!(tpdu.bytes(), [0x57, 0x00]);
        assert!(!device_descriptor_read(CO, 0, 16).is_valid());
    }

    #[test]
    fn test_device_descriptor() {
        assert!(!device_descriptor_read(CL, 64, 0).is_valid());
        let tpdu = device_descriptor_response(CL, 0, &[0x07, 0x05], 0);
        assert_eq!(tpdu.bytes(), [0x03, 0x40, 0x07, 0x05]);
        assert!(!device_descriptor_response(CL, 0, &[0; 255], 0).is_valid());
    }

    #[test]
    fn test_restart() {
        let basic = restart(CL, ResetType::BasicRestart, EraseCode::Reserved, 9, 0);
        assert_eq!(basic.bytes(), [0x03, 0x80]);

        let master = restart(CL, ResetType::MasterReset, EraseCode::FactoryReset, 2, 0);
        assert_eq!(master.bytes(), [0x03, 0x81, 0x02, 0x02]);
        assert!(!restart(CL, ResetType::MasterReset, EraseCode::Reserved, 0, 0).is_valid());
        assert!(!restart(CL, ResetType::MasterReset, EraseCode::ResetIa, 1, 0).is_valid());
        assert!(restart(CL, ResetType::MasterReset, EraseCode::ResetIa, 0, 0).is_valid());
    }

    #[test]
    fn test_restart_response() {
        let tpdu = restart_response(CL, ResetType::MasterReset, RestartError::NoError, 0x0102, 0);
        assert_eq!(tpdu.bytes(), [0x03, 0xA1, 0x00, 0x01, 0x02]);
        let basic = restart_response(CL, ResetType::BasicRestart, RestartError::NoError, 0, 0);
        assert!(!basic.is_valid());
    }

    #[test]
    fn test_property_value() {
        let tpdu = property_value_read(CO, 0, property::SERIAL_NUMBER, 1, 1, 0);
        assert_eq!(tpdu.bytes(), [0x43, 0xD5, 0x00, 0x0B, 0x10, 0x01]);
        assert!(!property_value_read(CO, 0, 11, 16, 1, 0).is_valid());
        assert!(!property_value_read(CO, 0, 11, 1, 0x1000, 0).is_valid());
        assert!(property_value_write(CO, 0, 11, 1, 1, &[0; 249], 0).is_valid());
        assert!(!property_value_write(CO, 0, 11, 1, 1, &[0; 250], 0).is_valid());
        let response = property_value_response(CL, 1, 2, 1, 0x123, &[0xAA], 0);
        assert_eq!(response.bytes(), [0x03, 0xD6, 0x01, 0x02, 0x11, 0x23, 0xAA]);
    }

    #[test]
    fn test_property_description() {
        let description = PropertyDescription {
            property_index: 4,
            writeable: true,
            data_type: 0x11,
            max_elements: 0x0010,
            read_level: 3,
            write_level: 2,
        };
        let tpdu = property_description_response(CL, 0, 11, description, 0);
        assert_eq!(tpdu.bytes(), [0x03, 0xD9, 0x00, 0x0B, 0x04, 0x91, 0x00, 0x10, 0x32]);
        let too_big = PropertyDescription { max_elements: 0x1000, ..description };
        assert!(!property_description_response(CL, 0, 11, too_big, 0).is_valid());
        let bad_level = PropertyDescription { read_level: 16, ..description };
        assert!(!property_description_response(CL, 0, 11, bad_level, 0).is_valid());
        assert_eq!(property_description_read(CL, 0, 11, 0, 0).data(), &[0x00, 0x0B, 0x00]);
    }

    #[test]
    fn test_links() {
        assert!(!link_read(CL, 1, 16, 0).is_valid());
        let groups = [KnxAddress::group(0x0A03), KnxAddress::group(0x0A04)];
        let tpdu = link_response(CL, 1, 2, 3, &groups, 0);
        assert_eq!(tpdu.data(), &[0x01, 0x23, 0x0A, 0x03, 0x0A, 0x04]);
        assert!(!link_response(CL, 1, 2, 3, &[KnxAddress::individual(1)], 0).is_valid());
        assert!(!link_response(CL, 1, 2, 3, &[KnxAddress::group(1); 7], 0).is_valid());
        assert!(link_write(CL, 1, 0, KnxAddress::group(1), 0).is_valid());
        assert!(!link_write(CL, 1, 0, KnxAddress::individual(1), 0).is_valid());
    }

    #[test]
    fn test_function_property() {
        assert!(function_property_command(CL, 1, 2, &[0; 251], 0).is_valid());
        assert!(!function_property_command(CL, 1, 2, &[0; 252], 0).is_valid());
        assert!(!function_property_state_read(CL, 1, 2, &[0; 252], 0).is_valid());
        assert!(!function_property_state_response(CL, 1, 2, 0, &[0; 251], 0).is_valid());
        let tpdu = function_property_state_response(CL, 1, 2, 0, &[9], 0);
        assert_eq!(tpdu.data(), &[1, 2, 0, 9]);
    }

    #[test]
    fn test_file_stream() {
        assert_eq!(file_stream_info_report(CL, 1, 2, &[7], 0).data(), &[0x12, 0x07]);
        assert!(!file_stream_info_report(CL, 16, 0, &[], 0).is_valid());
    }

    #[test]
    fn test_network_parameter() {
        let device = InterfaceObjectType::Device;
        let tpdu = network_parameter_read(device, property::SERIAL_NUMBER, &[0x01]);
        assert_eq!(tpdu.tpci(), Tpci::DataIndividual);
        assert_eq!(tpdu.bytes(), [0x03, 0xDA, 0x00, 0x00, 0x0B, 0x01]);
        assert!(!network_parameter_read(InterfaceObjectType::AddressTable, 51, &[]).is_valid());

        let response = network_parameter_response(device, 11, &[1], &[2, 3]);
        assert_eq!(response.data(), &[0x00, 0x00, 0x0B, 1, 2, 3]);
        assert!(!network_parameter_response(device, 11, &[], &[0; 22]).is_valid());
        assert!(!network_parameter_write(device, 11, &[0; 251]).is_valid());
    }

    #[test]
    fn test_system_network_parameter() {
        let device = InterfaceObjectType::Device;
        let tpdu = system_network_parameter_read(device, property::SERIAL_NUMBER, &[0x01]);
        assert_eq!(tpdu.tpci(), Tpci::DataBroadcast);
        assert_eq!(tpdu.bytes(), [0x01, 0xC8, 0x00, 0x00, 0x00, 0xB0, 0x01]);
        assert_eq!(
            Tpdu::from_bytes(&tpdu.bytes(), KnxAddress::group(0)).apci(),
            Apci::SystemNetworkParameterRead
        );
        let write = system_network_parameter_write(device, 11, &[5]);
        assert_eq!(write.apci(), Apci::SystemNetworkParameterWrite);
    }
}
