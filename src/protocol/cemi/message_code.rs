//! cEMI message codes.

/// cEMI message code, the first octet of every cEMI frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageCode {
    /// `L_Raw.req` - Raw frame request
    LRawReq = 0x10,
    /// `L_Data.req` - Data request
    LDataReq = 0x11,
    /// `L_Poll_Data.req` - Poll data request
    LPollDataReq = 0x13,
    /// `L_Poll_Data.con` - Poll data confirmation
    LPollDataCon = 0x25,
    /// `L_Data.ind` - Data indication
    LDataInd = 0x29,
    /// `L_Busmon.ind` - Bus monitor indication
    LBusmonInd = 0x2B,
    /// `L_Raw.ind` - Raw frame indication
    LRawInd = 0x2D,
    /// `L_Data.con` - Data confirmation
    LDataCon = 0x2E,
    /// `L_Raw.con` - Raw frame confirmation
    LRawCon = 0x2F,

    /// `M_Reset.ind`
    MResetInd = 0xF0,
    /// `M_Reset.req`
    MResetReq = 0xF1,
    /// `M_PropWrite.con`
    MPropWriteCon = 0xF5,
    /// `M_PropWrite.req`
    MPropWriteReq = 0xF6,
    /// `M_PropInfo.ind`
    MPropInfoInd = 0xF7,
    /// `M_FuncPropCommand.req`
    MFuncPropCommandReq = 0xF8,
    /// `M_FuncPropStateRead.req`
    MFuncPropStateReadReq = 0xF9,
    /// `M_FuncPropCommand.con` / `M_FuncPropStateRead.con`
    MFuncPropCon = 0xFA,
    /// `M_PropRead.con`
    MPropReadCon = 0xFB,
    /// `M_PropRead.req`
    MPropReadReq = 0xFC,
}

impl MessageCode {
    /// Convert u8 to `MessageCode`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x10 => Some(Self::LRawReq),
            0x11 => Some(Self::LDataReq),
            0x13 => Some(Self::LPollDataReq),
            0x25 => Some(Self::LPollDataCon),
            0x29 => Some(Self::LDataInd),
            0x2B => Some(Self::LBusmonInd),
            0x2D => Some(Self::LRawInd),
            0x2E => Some(Self::LDataCon),
            0x2F => Some(Self::LRawCon),
            0xF0 => Some(Self::MResetInd),
            0xF1 => Some(Self::MResetReq),
            0xF5 => Some(Self::MPropWriteCon),
            0xF6 => Some(Self::MPropWriteReq),
            0xF7 => Some(Self::MPropInfoInd),
            0xF8 => Some(Self::MFuncPropCommandReq),
            0xF9 => Some(Self::MFuncPropStateReadReq),
            0xFA => Some(Self::MFuncPropCon),
            0xFB => Some(Self::MPropReadCon),
            0xFC => Some(Self::MPropReadReq),
            _ => None,
        }
    }

    /// Convert `MessageCode` to u8
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Codes carried by link-layer frames.
    pub const fn is_link_layer(self) -> bool {
        (self as u8) < 0xF0
    }

    /// Codes carried by device-management frames.
    pub const fn is_device_management(self) -> bool {
        !self.is_link_layer()
    }

    /// `M_PropRead` / `M_PropWrite` / `M_PropInfo` codes.
    pub const fn is_property_service(self) -> bool {
        matches!(
            self,
            Self::MPropReadReq
                | Self::MPropReadCon
                | Self::MPropWriteReq
                | Self::MPropWriteCon
                | Self::MPropInfoInd
        )
    }

    /// `M_FuncProp*` codes.
    pub const fn is_function_property_service(self) -> bool {
        matches!(
            self,
            Self::MFuncPropCommandReq | Self::MFuncPropStateReadReq | Self::MFuncPropCon
        )
    }

    /// `M_Reset` codes.
    pub const fn is_reset(self) -> bool {
        matches!(self, Self::MResetReq | Self::MResetInd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families() {
        assert!(MessageCode::LDataInd.is_link_layer());
        assert!(MessageCode::MPropReadReq.is_device_management());
        assert!(MessageCode::MResetInd.is_reset());
        assert!(MessageCode::MFuncPropCon.is_function_property_service());
        assert!(!MessageCode::MFuncPropCon.is_property_service());
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(MessageCode::from_u8(0x29), Some(MessageCode::LDataInd));
        assert_eq!(MessageCode::from_u8(0xFC), Some(MessageCode::MPropReadReq));
        assert_eq!(MessageCode::from_u8(0x00), None);
        assert_eq!(MessageCode::from_u8(0xF2), None);
        assert_eq!(MessageCode::LRawCon.to_u8(), 0x2F);
    }
}
