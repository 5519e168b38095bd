//! `M_Prop*`, `M_FuncProp*` and `M_Reset` frames.
//!
//! ```text
//! Property services:
//! [code:1][object type:2][instance:1][pid:1][elements:4 | start index:12][data]
//!
//! Function property services:
//! [code:1][object type:2][instance:1][pid:1][return code:1, .con only][data]
//!
//! Reset:
//! [code:1]
//! ```
//!
//! ```
//! use knx_ip_core::protocol::cemi::{
//!     interface_object::property, DeviceManagementFrame, InterfaceObjectType,
//! };
//!
//! let request = DeviceManagementFrame::property_read_request(
//!     InterfaceObjectType::Device, 1, property::SERIAL_NUMBER, 1, 1,
//! );
//! assert_eq!(request.bytes(), [0xFC, 0x00, 0x00, 0x01, 0x0B, 0x10, 0x01]);
//! assert!(request.is_valid());
//! ```

use super::interface_object::{self, InterfaceObjectType};
use super::message_code::MessageCode;
use crate::byte_store::ByteStore;
use crate::codec::{u16_from_bytes, u16_to_bytes};

/// Error carried by a negative property confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CemiErrorCode {
    /// Unknown error
    Unspecified = 0x00,
    /// Write value not allowed
    OutOfRange = 0x01,
    /// Write value too high
    OutOfMaxRange = 0x02,
    /// Write value too low
    OutOfMinRange = 0x03,
    /// Memory cannot be written or only with fault(s)
    Memory = 0x04,
    /// Write access to a read-only or write-protected property
    ReadOnly = 0x05,
    /// Command not valid or not supported
    IllegalCommand = 0x06,
    /// Read or write access to a non-existing property
    VoidDp = 0x07,
    /// Write access with a wrong data type
    TypeConflict = 0x08,
    /// Read or write access to a non-existing array index
    PropIndexRangeError = 0x09,
    /// The property exists but cannot be set to a new value at this time
    ValueNotWriteableNow = 0x0A,
    /// The confirmation lacks the error octet
    Data = 0xFF,
}

impl CemiErrorCode {
    /// Decode an error octet.
    pub const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0x00 => Self::Unspecified,
            0x01 => Self::OutOfRange,
            0x02 => Self::OutOfMaxRange,
            0x03 => Self::OutOfMinRange,
            0x04 => Self::Memory,
            0x05 => Self::ReadOnly,
            0x06 => Self::IllegalCommand,
            0x07 => Self::VoidDp,
            0x08 => Self::TypeConflict,
            0x09 => Self::PropIndexRangeError,
            0x0A => Self::ValueNotWriteableNow,
            _ => return None,
        })
    }
}

/// Device-management cEMI frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceManagementFrame {
    store: ByteStore,
}

const DEFAULT_SERVICE_INFO: [u8; 6] = [0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00];

const OBJECT_TYPE: usize = 1;
const OBJECT_INSTANCE: usize = 3;
const PROPERTY: usize = 4;
const ELEMENTS: usize = 5;
const PROPERTY_DATA: usize = 7;
const FUNCTION_DATA: usize = 5;

impl DeviceManagementFrame {
    /// Frame with the given code. Non-reset frames start with the service
    /// info `FF FF 00 00 00 00`.
    pub fn new(code: MessageCode) -> Self {
        let mut store = ByteStore::from_slice(&[code.to_u8()]);
        if !code.is_reset() {
            store.append(&DEFAULT_SERVICE_INFO);
        }
        Self { store }
    }

    /// Wrap received bytes. Never fails; check [`is_valid`](Self::is_valid).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            store: ByteStore::from_slice(bytes),
        }
    }

    fn property_service(
        code: MessageCode,
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        elements: u8,
        start_index: u16,
        data: &[u8],
    ) -> Self {
        let mut frame = Self::new(code);
        let stored = frame.set_object_type(object_type)
            && frame.set_object_instance(instance)
            && frame.set_property(pid)
            && frame.set_number_of_elements(elements)
            && frame.set_start_index(start_index);
        if !stored {
            knx_log!(debug, "property service field out of range");
            return Self::from_bytes(&[]);
        }
        frame.store.append(data);
        frame
    }

    fn function_service(
        code: MessageCode,
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        data: &[u8],
    ) -> Self {
        let mut store = ByteStore::from_slice(&[code.to_u8()]);
        store.append(&u16_to_bytes(object_type.to_u16()));
        store.append(&[instance, pid]);
        store.append(data);
        Self { store }
    }

    /// `M_PropRead.req`
    pub fn property_read_request(
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        elements: u8,
        start_index: u16,
    ) -> Self {
        let code = MessageCode::MPropReadReq;
        Self::property_service(code, object_type, instance, pid, elements, start_index, &[])
    }

    /// `M_PropRead.con`
    pub fn property_read_confirmation(
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        elements: u8,
        start_index: u16,
        data: &[u8],
    ) -> Self {
        let code = MessageCode::MPropReadCon;
        Self::property_service(code, object_type, instance, pid, elements, start_index, data)
    }

    /// `M_PropWrite.req`
    pub fn property_write_request(
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        elements: u8,
        start_index: u16,
        data: &[u8],
    ) -> Self {
        let code = MessageCode::MPropWriteReq;
        Self::property_service(code, object_type, instance, pid, elements, start_index, data)
    }

    /// `M_PropWrite.con`
    pub fn property_write_confirmation(
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        elements: u8,
        start_index: u16,
    ) -> Self {
        let code = MessageCode::MPropWriteCon;
        Self::property_service(code, object_type, instance, pid, elements, start_index, &[])
    }

    /// `M_PropInfo.ind`
    pub fn property_info_indication(
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        elements: u8,
        start_index: u16,
        data: &[u8],
    ) -> Self {
        let code = MessageCode::MPropInfoInd;
        Self::property_service(code, object_type, instance, pid, elements, start_index, data)
    }

    /// Negative confirmation answering a property read or write request.
    ///
    /// Returns `None` for any other message code.
    pub fn negative_confirmation(request: &Self, error: CemiErrorCode) -> Option<Self> {
        let code = match request.message_code()? {
            MessageCode::MPropReadReq => MessageCode::MPropReadCon,
            MessageCode::MPropWriteReq => MessageCode::MPropWriteCon,
            _ => return None,
        };
        let mut store = ByteStore::from_slice(&[code.to_u8()]);
        store.append(request.store.bytes(OBJECT_TYPE, PROPERTY_DATA - OBJECT_TYPE)?);
        let mut frame = Self { store };
        frame.set_number_of_elements(0);
        frame.store.append(&[error as u8]);
        Some(frame)
    }

    /// `M_FuncPropCommand.req`
    pub fn function_property_command(
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        data: &[u8],
    ) -> Self {
        let code = MessageCode::MFuncPropCommandReq;
        Self::function_service(code, object_type, instance, pid, data)
    }

    /// `M_FuncPropStateRead.req`
    pub fn function_property_state_read(
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        data: &[u8],
    ) -> Self {
        let code = MessageCode::MFuncPropStateReadReq;
        Self::function_service(code, object_type, instance, pid, data)
    }

    /// `M_FuncPropCommand.con` / `M_FuncPropStateRead.con`
    pub fn function_property_confirmation(
        object_type: InterfaceObjectType,
        instance: u8,
        pid: u8,
        return_code: u8,
        data: &[u8],
    ) -> Self {
        let mut frame = Self::function_service(
            MessageCode::MFuncPropCon,
            object_type,
            instance,
            pid,
            &[return_code],
        );
        frame.store.append(data);
        frame
    }

    /// `M_Reset.req`
    pub fn reset_request() -> Self {
        Self::new(MessageCode::MResetReq)
    }

    /// `M_Reset.ind`
    pub fn reset_indication() -> Self {
        Self::new(MessageCode::MResetInd)
    }

    /// Message code, `None` when unknown.
    pub fn message_code(&self) -> Option<MessageCode> {
        self.store.byte(0).and_then(MessageCode::from_u8)
    }

    /// Raw interface object type.
    pub fn object_type_raw(&self) -> Option<u16> {
        u16_from_bytes(self.store.as_slice(), OBJECT_TYPE)
    }

    /// Interface object type, `None` when missing or unknown.
    pub fn object_type(&self) -> Option<InterfaceObjectType> {
        self.object_type_raw().and_then(InterfaceObjectType::from_u16)
    }

    /// Set the interface object type.
    pub fn set_object_type(&mut self, object_type: InterfaceObjectType) -> bool {
        self.store
            .replace(OBJECT_TYPE, &u16_to_bytes(object_type.to_u16()))
            .is_ok()
    }

    /// Object instance, starting at 1.
    pub fn object_instance(&self) -> u8 {
        self.store.byte(OBJECT_INSTANCE).unwrap_or(0)
    }

    /// Set the object instance.
    pub fn set_object_instance(&mut self, instance: u8) -> bool {
        self.store.set_byte(OBJECT_INSTANCE, instance).is_ok()
    }

    /// Property identifier.
    pub fn property(&self) -> u8 {
        self.store.byte(PROPERTY).unwrap_or(0)
    }

    /// Set the property identifier.
    pub fn set_property(&mut self, pid: u8) -> bool {
        self.store.set_byte(PROPERTY, pid).is_ok()
    }

    /// Number of elements, upper nibble of the sixth octet.
    pub fn number_of_elements(&self) -> u8 {
        self.store.byte(ELEMENTS).map_or(0, |byte| byte >> 4)
    }

    /// Set the number of elements; values above 15 are rejected.
    pub fn set_number_of_elements(&mut self, elements: u8) -> bool {
        let Some(byte) = self.store.byte(ELEMENTS) else {
            return false;
        };
        if elements > 0x0F {
            return false;
        }
        self.store
            .set_byte(ELEMENTS, (byte & 0x0F) | (elements << 4))
            .is_ok()
    }

    /// Start index, the low twelve bits following the element count.
    pub fn start_index(&self) -> u16 {
        u16_from_bytes(self.store.as_slice(), ELEMENTS).map_or(0, |raw| raw & 0x0FFF)
    }

    /// Set the start index; values above 4095 are rejected.
    pub fn set_start_index(&mut self, index: u16) -> bool {
        let Some(raw) = u16_from_bytes(self.store.as_slice(), ELEMENTS) else {
            return false;
        };
        if index > 0x0FFF {
            return false;
        }
        self.store
            .replace(ELEMENTS, &u16_to_bytes((raw & 0xF000) | index))
            .is_ok()
    }

    fn data_offset(&self) -> usize {
        match self.message_code() {
            Some(MessageCode::MFuncPropCon) => FUNCTION_DATA + 1,
            Some(code) if code.is_function_property_service() => FUNCTION_DATA,
            _ => PROPERTY_DATA,
        }
    }

    /// Payload after the service header.
    pub fn data(&self) -> &[u8] {
        self.store.as_slice().get(self.data_offset()..).unwrap_or(&[])
    }

    /// Replace the payload after the service header.
    pub fn set_data(&mut self, data: &[u8]) {
        let offset = self.data_offset();
        if self.store.size() < offset {
            return;
        }
        self.store.resize(offset);
        self.store.append(data);
    }

    /// Return code of a function property confirmation.
    pub fn return_code(&self) -> Option<u8> {
        if self.message_code() != Some(MessageCode::MFuncPropCon) {
            return None;
        }
        self.store.byte(FUNCTION_DATA)
    }

    /// Read or write confirmation with zero elements.
    pub fn is_negative_confirmation(&self) -> bool {
        matches!(
            self.message_code(),
            Some(MessageCode::MPropReadCon | MessageCode::MPropWriteCon)
        ) && self.number_of_elements() == 0
    }

    /// Error of a negative confirmation, `None` otherwise.
    pub fn error_code(&self) -> Option<CemiErrorCode> {
        if !self.is_negative_confirmation() {
            return None;
        }
        Some(
            self.data()
                .first()
                .map_or(CemiErrorCode::Data, |&byte| {
                    CemiErrorCode::from_u8(byte).unwrap_or(CemiErrorCode::Unspecified)
                }),
        )
    }

    /// Encoded size.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Encoded frame.
    pub fn bytes(&self) -> &[u8] {
        self.store.as_slice()
    }

    /// Known device-management code with a size fitting the service, a
    /// registered object type, an instance of at least 1 and a property
    /// defined for the object type.
    pub fn is_valid(&self) -> bool {
        let Some(code) = self.message_code() else {
            return false;
        };
        let size = self.store.size();
        match code {
            MessageCode::MResetReq | MessageCode::MResetInd => return size == 1,
            MessageCode::MPropReadReq if size != PROPERTY_DATA => return false,
            code if code.is_link_layer() => return false,
            _ if size < PROPERTY_DATA => return false,
            _ => {}
        }
        let Some(object_type) = self.object_type_raw() else {
            return false;
        };
        self.object_instance() >= 1 && interface_object::is_match(object_type, self.property())
    }
}
