//! Routing services: indication, lost message and busy.

use super::service_frame;
use crate::codec;
use crate::protocol::cemi::LinkLayerFrame;

service_frame!(
    /// Link-layer cEMI multicast between routers.
    RoutingIndication,
    RoutingIndication
);

impl RoutingIndication {
    /// Smallest cEMI body accepted.
    pub const MIN_CEMI_SIZE: usize = 8;

    /// Wrap `cemi`.
    pub fn new(cemi: &LinkLayerFrame) -> Self {
        Self::with_body(&cemi.bytes())
    }

    /// Carried link-layer frame.
    pub fn cemi(&self) -> LinkLayerFrame {
        LinkLayerFrame::from_bytes(self.body())
    }

    /// Valid frame with at least [`Self::MIN_CEMI_SIZE`] body bytes. The
    /// cEMI itself is not checked; use [`Self::cemi`] for that.
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid() && self.body().len() >= Self::MIN_CEMI_SIZE
    }
}

service_frame!(
    /// Router report of frames lost to a full queue.
    ///
    /// ```text
    /// [header][0x04][device state][lost messages:2]
    /// ```
    RoutingLostMessage,
    RoutingLostMessage
);

impl RoutingLostMessage {
    const BODY_SIZE: u8 = 4;

    /// Build the report.
    pub fn new(device_state: u8, lost_messages: u16) -> Self {
        let [hi, lo] = codec::u16_to_bytes(lost_messages);
        Self::with_body(&[Self::BODY_SIZE, device_state, hi, lo])
    }

    /// Device state octet.
    pub fn device_state(&self) -> u8 {
        self.body().get(1).copied().unwrap_or(0)
    }

    /// Number of lost frames.
    pub fn lost_messages(&self) -> u16 {
        codec::u16_from_bytes(self.body(), 2).unwrap_or(0)
    }

    /// Four byte body whose length octet matches.
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid()
            && self.body().len() == usize::from(Self::BODY_SIZE)
            && self.body().first() == Some(&Self::BODY_SIZE)
    }
}

service_frame!(
    /// Router flow control request.
    ///
    /// ```text
    /// [header][0x06][device state][wait time ms:2][control:2]
    /// ```
    RoutingBusy,
    RoutingBusy
);

impl RoutingBusy {
    const BODY_SIZE: u8 = 6;

    /// Build the request.
    pub fn new(device_state: u8, wait_time_ms: u16, control: u16) -> Self {
        let [wait_hi, wait_lo] = codec::u16_to_bytes(wait_time_ms);
        let [ctrl_hi, ctrl_lo] = codec::u16_to_bytes(control);
        Self::with_body(&[Self::BODY_SIZE, device_state, wait_hi, wait_lo, ctrl_hi, ctrl_lo])
    }

    /// Device state octet.
    pub fn device_state(&self) -> u8 {
        self.body().get(1).copied().unwrap_or(0)
    }

    /// Time other routers should pause, in milliseconds.
    pub fn wait_time_ms(&self) -> u16 {
        codec::u16_from_bytes(self.body(), 2).unwrap_or(0)
    }

    /// Busy control field.
    pub fn control(&self) -> u16 {
        codec::u16_from_bytes(self.body(), 4).unwrap_or(0)
    }

    /// Six byte body whose length octet matches.
    pub fn is_valid(&self) -> bool {
        self.frame.is_valid()
            && self.body().len() == usize::from(Self::BODY_SIZE)
            && self.body().first() == Some(&Self::BODY_SIZE)
    }
}
