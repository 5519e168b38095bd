//! Connection request information (CRI).

use crate::protocol::constants::{ConnectionType, TunnelLayer};
use crate::protocol::structure::knx_struct;

knx_struct!(
    /// Connection type requested in a connect request.
    ///
    /// Tunnel CRIs carry the KNX layer and a reserved octet; every other
    /// connection type is just the two header octets.
    Cri,
    ConnectionType
);

impl Cri {
    /// Size of a tunnel CRI.
    pub const TUNNEL_SIZE: usize = 4;
    /// Size of every other CRI.
    pub const BASIC_SIZE: usize = 2;

    /// CRI without connection-specific data.
    ///
    /// For [`ConnectionType::Tunnel`] this falls back to the link layer.
    pub fn new(connection_type: ConnectionType) -> Self {
        match connection_type {
            ConnectionType::Tunnel => Self::tunnel(TunnelLayer::LinkLayer),
            other => Self::with_payload(other, &[]),
        }
    }

    /// Tunnel CRI for `layer`.
    pub fn tunnel(layer: TunnelLayer) -> Self {
        Self::with_payload(ConnectionType::Tunnel, &[layer as u8, 0x00])
    }

    /// Requested connection type.
    pub fn connection_type(&self) -> Option<ConnectionType> {
        self.code()
    }

    /// Tunnel layer, `None` for non-tunnel CRIs or unknown layers.
    pub fn tunnel_layer(&self) -> Option<TunnelLayer> {
        if self.code() != Some(ConnectionType::Tunnel) {
            return None;
        }
        self.payload().first().copied().and_then(TunnelLayer::from_u8)
    }

    /// Size matches the connection type and a tunnel names a known layer.
    pub fn is_valid(&self) -> bool {
        if !self.as_struct().is_valid() {
            return false;
        }
        match self.code() {
            Some(ConnectionType::Tunnel) => {
                self.size() == Self::TUNNEL_SIZE && self.tunnel_layer().is_some()
            }
            Some(_) => self.size() == Self::BASIC_SIZE,
            None => false,
        }
    }
}
