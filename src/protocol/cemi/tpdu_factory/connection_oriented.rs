//! Services that require a transport layer connection.
//!
//! All data TPDUs here are `T_Data_Connected` with the caller's sequence
//! number. The control TPDUs that open, close and acknowledge the
//! connection live here as well.

use super::super::tpdu::{Apci, Tpci, Tpdu};
use super::{build, Mode};
use crate::codec::{u16_to_bytes, u32_to_bytes};

const TPCI: Tpci = Mode::ConnectionOriented.tpci();

/// `T_Connect`
pub fn connect() -> Tpdu {
    Tpdu::control(Tpci::Connect, 0)
}

/// `T_Disconnect`
pub fn disconnect() -> Tpdu {
    Tpdu::control(Tpci::Disconnect, 0)
}

/// `T_ACK` for sequence number `seq`
pub fn ack(seq: u8) -> Tpdu {
    Tpdu::control(Tpci::Ack, seq)
}

/// `T_NAK` for sequence number `seq`
pub fn nak(seq: u8) -> Tpdu {
    Tpdu::control(Tpci::Nak, seq)
}

/// `A_Memory_Read` of `count` (at most 63) octets.
pub fn memory_read(count: u8, address: u16, seq: u8) -> Tpdu {
    if count > 0x3F {
        return Tpdu::invalid();
    }
    build(TPCI, Apci::MemoryRead, seq, count, &[&u16_to_bytes(address)])
}

/// `A_Memory_Response`
pub fn memory_response(count: u8, address: u16, data: &[u8], seq: u8) -> Tpdu {
    memory(Apci::MemoryResponse, count, address, data, seq)
}

/// `A_Memory_Write`
pub fn memory_write(count: u8, address: u16, data: &[u8], seq: u8) -> Tpdu {
    memory(Apci::MemoryWrite, count, address, data, seq)
}

fn memory(apci: Apci, count: u8, address: u16, data: &[u8], seq: u8) -> Tpdu {
    if count > 0x3F || data.len() > 250 || usize::from(count) != data.len() {
        return Tpdu::invalid();
    }
    build(TPCI, apci, seq, count, &[&u16_to_bytes(address), data])
}

/// `A_ADC_Read` on `channel` (at most 63).
pub fn adc_read(channel: u8, read_count: u8, seq: u8) -> Tpdu {
    if channel > 0x3F {
        return Tpdu::invalid();
    }
    build(TPCI, Apci::AdcRead, seq, channel, &[&[read_count]])
}

/// `A_ADC_Response`
pub fn adc_response(channel: u8, read_count: u8, sum: u16, seq: u8) -> Tpdu {
    if channel > 0x3F {
        return Tpdu::invalid();
    }
    build(TPCI, Apci::AdcResponse, seq, channel, &[&[read_count], &u16_to_bytes(sum)])
}

/// `A_UserMemory_Read`
pub fn user_memory_read(extension: u8, count: u8, address: u16, seq: u8) -> Tpdu {
    if extension > 15 || count > 15 {
        return Tpdu::invalid();
    }
    let head = [(extension << 4) | count];
    build(TPCI, Apci::UserMemoryRead, seq, 0, &[&head, &u16_to_bytes(address)])
}

/// `A_UserMemory_Response`
pub fn user_memory_response(extension: u8, count: u8, address: u16, data: &[u8], seq: u8) -> Tpdu {
    user_memory(Apci::UserMemoryResponse, extension, count, address, data, seq)
}

/// `A_UserMemory_Write`
pub fn user_memory_write(extension: u8, count: u8, address: u16, data: &[u8], seq: u8) -> Tpdu {
    user_memory(Apci::UserMemoryWrite, extension, count, address, data, seq)
}

fn user_memory(apci: Apci, extension: u8, count: u8, address: u16, data: &[u8], seq: u8) -> Tpdu {
    if extension > 15 || count > 15 || data.is_empty() || data.len() > 250 {
        return Tpdu::invalid();
    }
    let head = [(extension << 4) | count];
    build(TPCI, apci, seq, 0, &[&head, &u16_to_bytes(address), data])
}

/// `A_UserManufacturerInfo_Read`
pub fn user_manufacturer_info_read(seq: u8) -> Tpdu {
    build(TPCI, Apci::UserManufacturerInfoRead, seq, 0, &[])
}

/// `A_UserManufacturerInfo_Response`
pub fn user_manufacturer_info_response(manufacturer_id: u8, specific: u16, seq: u8) -> Tpdu {
    let apci = Apci::UserManufacturerInfoResponse;
    build(TPCI, apci, seq, 0, &[&[manufacturer_id], &u16_to_bytes(specific)])
}

/// `A_Authorize_Request`
pub fn authorize_request(key: u32, seq: u8) -> Tpdu {
    build(TPCI, Apci::AuthorizeRequest, seq, 0, &[&[0x00], &u32_to_bytes(key)])
}

/// `A_Authorize_Response`
pub fn authorize_response(level: u8, seq: u8) -> Tpdu {
    build(TPCI, Apci::AuthorizeResponse, seq, 0, &[&[level]])
}

/// `A_Key_Write`
pub fn key_write(level: u8, key: u32, seq: u8) -> Tpdu {
    build(TPCI, Apci::KeyWrite, seq, 0, &[&[level], &u32_to_bytes(key)])
}

/// `A_Key_Response`
pub fn key_response(level: u8, seq: u8) -> Tpdu {
    build(TPCI, Apci::KeyResponse, seq, 0, &[&[level]])
}
