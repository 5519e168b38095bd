//! Link-layer control fields.
//!
//! Both fields are a single octet. Every bit group has a named extractor
//! and a matching `set_*` inserter that leaves the other bits untouched.

/// KNX message priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Priority {
    /// System priority
    System = 0b00,
    /// Normal priority (default)
    #[default]
    Normal = 0b01,
    /// Urgent priority
    Urgent = 0b10,
    /// Low priority
    Low = 0b11,
}

impl Priority {
    /// Convert the two low bits of `value` to Priority
    pub const fn from_u8(value: u8) -> Self {
        match value & 0b11 {
            0b00 => Self::System,
            0b01 => Self::Normal,
            0b10 => Self::Urgent,
            _ => Self::Low,
        }
    }

    /// Convert Priority to u8
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Control Field 1 of `L_Data` frame
///
/// ```text
/// Bit 7: Frame Type (0=extended, 1=standard)
/// Bit 6: Reserved
/// Bit 5: Repeat (0=repeat, 1=do not repeat)
/// Bit 4: System Broadcast (0=system, 1=broadcast)
/// Bit 3-2: Priority (00=system, 01=normal, 10=urgent, 11=low)
/// Bit 1: Acknowledge Request (0=no ack, 1=ack requested)
/// Bit 0: Confirm (0=no error, 1=error)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlField1 {
    raw: u8,
}

impl From<u8> for ControlField1 {
    #[inline(always)]
    fn from(raw: u8) -> Self {
        Self { raw }
    }
}

impl From<ControlField1> for u8 {
    #[inline(always)]
    fn from(ctrl: ControlField1) -> u8 {
        ctrl.raw
    }
}

const fn with_bit(raw: u8, mask: u8, on: bool) -> u8 {
    if on {
        raw | mask
    } else {
        raw & !mask
    }
}

impl ControlField1 {
    const STANDARD_FRAME: u8 = 0x80;
    const DO_NOT_REPEAT: u8 = 0x20;
    const BROADCAST: u8 = 0x10;
    const PRIORITY: u8 = 0x0C;
    const ACK_REQUEST: u8 = 0x02;
    const CONFIRM_ERROR: u8 = 0x01;

    /// Get raw byte value
    #[inline(always)]
    pub const fn raw(self) -> u8 {
        self.raw
    }

    /// Check if frame is standard (true) or extended (false)
    #[inline(always)]
    pub const fn is_standard_frame(self) -> bool {
        (self.raw & Self::STANDARD_FRAME) != 0
    }

    /// Check if repeat flag is set (do not repeat if true)
    #[inline(always)]
    pub const fn do_not_repeat(self) -> bool {
        (self.raw & Self::DO_NOT_REPEAT) != 0
    }

    /// Domain broadcast (true) or system broadcast (false)
    #[inline(always)]
    pub const fn is_broadcast(self) -> bool {
        (self.raw & Self::BROADCAST) != 0
    }

    /// Get priority
    #[inline(always)]
    pub const fn priority(self) -> Priority {
        Priority::from_u8(self.raw >> 2)
    }

    /// Check if acknowledge is requested
    #[inline(always)]
    pub const fn ack_requested(self) -> bool {
        (self.raw & Self::ACK_REQUEST) != 0
    }

    /// Check if confirm error flag is set
    #[inline(always)]
    pub const fn has_error(self) -> bool {
        (self.raw & Self::CONFIRM_ERROR) != 0
    }

    /// Set frame type
    pub fn set_standard_frame(&mut self, standard: bool) {
        self.raw = with_bit(self.raw, Self::STANDARD_FRAME, standard);
    }

    /// Set repeat flag
    pub fn set_do_not_repeat(&mut self, do_not_repeat: bool) {
        self.raw = with_bit(self.raw, Self::DO_NOT_REPEAT, do_not_repeat);
    }

    /// Set broadcast type
    pub fn set_broadcast(&mut self, broadcast: bool) {
        self.raw = with_bit(self.raw, Self::BROADCAST, broadcast);
    }

    /// Set priority
    pub fn set_priority(&mut self, priority: Priority) {
        self.raw = (self.raw & !Self::PRIORITY) | (priority.to_u8() << 2);
    }

    /// Set acknowledge request
    pub fn set_ack_requested(&mut self, requested: bool) {
        self.raw = with_bit(self.raw, Self::ACK_REQUEST, requested);
    }

    /// Set confirm error flag
    pub fn set_error(&mut self, error: bool) {
        self.raw = with_bit(self.raw, Self::CONFIRM_ERROR, error);
    }

    /// Create a new Control Field 1
    pub const fn new(
        standard_frame: bool,
        do_not_repeat: bool,
        broadcast: bool,
        priority: Priority,
        ack_requested: bool,
        has_error: bool,
    ) -> Self {
        let mut raw = with_bit(0, Self::STANDARD_FRAME, standard_frame);
        raw = with_bit(raw, Self::DO_NOT_REPEAT, do_not_repeat);
        raw = with_bit(raw, Self::BROADCAST, broadcast);
        raw |= priority.to_u8() << 2;
        raw = with_bit(raw, Self::ACK_REQUEST, ack_requested);
        raw = with_bit(raw, Self::CONFIRM_ERROR, has_error);
        Self { raw }
    }
}

impl Default for ControlField1 {
    /// Standard frame, repeat, broadcast, normal priority (`0x94`).
    #[inline]
    fn default() -> Self {
        Self { raw: 0x94 }
    }
}

/// Control Field 2 of `L_Data` frame
///
/// ```text
/// Bit 7: Destination Address Type (0=individual, 1=group)
/// Bit 6-4: Hop Count (0-7)
/// Bit 3-0: Extended Frame Format (0000=standard)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlField2 {
    raw: u8,
}

impl From<u8> for ControlField2 {
    #[inline(always)]
    fn from(raw: u8) -> Self {
        Self { raw }
    }
}

impl From<ControlField2> for u8 {
    #[inline(always)]
    fn from(ctrl: ControlField2) -> u8 {
        ctrl.raw
    }
}

impl ControlField2 {
    const GROUP_DESTINATION: u8 = 0x80;
    const HOP_COUNT: u8 = 0x70;
    const EXTENDED_FORMAT: u8 = 0x0F;

    /// Get raw byte value
    #[inline(always)]
    pub const fn raw(self) -> u8 {
        self.raw
    }

    /// Check if destination is group address (true) or individual (false)
    #[inline(always)]
    pub const fn is_group_address(self) -> bool {
        (self.raw & Self::GROUP_DESTINATION) != 0
    }

    /// Get hop count (0-7)
    #[inline(always)]
    pub const fn hop_count(self) -> u8 {
        (self.raw & Self::HOP_COUNT) >> 4
    }

    /// Get extended frame format
    #[inline(always)]
    pub const fn extended_format(self) -> u8 {
        self.raw & Self::EXTENDED_FORMAT
    }

    /// Set destination address type
    pub fn set_group_address(&mut self, group: bool) {
        self.raw = with_bit(self.raw, Self::GROUP_DESTINATION, group);
    }

    /// Set hop count. Values above 7 are ignored.
    pub fn set_hop_count(&mut self, hops: u8) {
        if hops <= 7 {
            self.raw = (self.raw & !Self::HOP_COUNT) | (hops << 4);
        }
    }

    /// Set extended frame format. Values above 15 are ignored.
    pub fn set_extended_format(&mut self, format: u8) {
        if format <= 0x0F {
            self.raw = (self.raw & !Self::EXTENDED_FORMAT) | format;
        }
    }

    /// Create a new Control Field 2
    pub const fn new(is_group: bool, hop_count: u8, extended_format: u8) -> Self {
        let raw = with_bit(0, Self::GROUP_DESTINATION, is_group)
            | ((hop_count & 0x07) << 4)
            | (extended_format & Self::EXTENDED_FORMAT);
        Self { raw }
    }
}

impl Default for ControlField2 {
    /// Group destination, hop count 6, standard format.
    #[inline]
    fn default() -> Self {
        Self { raw: 0xE0 }
    }
}
