//! Unified logging macro.
//!
//! `knx_log!` forwards to the `log` facade when the `log` feature is active,
//! to `defmt` when `defmt` is active, and compiles to nothing otherwise. The
//! arguments are still type-checked in the silent build.
//!
//! ```rust
//! use knx_ip_core::knx_log;
//!
//! knx_log!(debug, "dispatching service {:04x}", 0x0202u16);
//! knx_log!(warn, "dropping {} byte datagram", 3);
//! ```

/// Log through the configured backend.
#[macro_export]
#[cfg(feature = "log")]
macro_rules! knx_log {
    (info, $($arg:tt)*) => { $crate::__log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { $crate::__log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { $crate::__log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { $crate::__log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { $crate::__log::trace!($($arg)*) };
}

/// Log through the configured backend.
#[macro_export]
#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! knx_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

/// Log through the configured backend.
#[macro_export]
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! knx_log {
    ($level:ident, $($arg:tt)*) => {{
        if false {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macro_accepts_all_levels() {
        let n = 3;
        knx_log!(info, "info {}", n);
        knx_log!(debug, "debug {}", n);
        knx_log!(warn, "warn {}", n);
        knx_log!(error, "error {}", n);
        knx_log!(trace, "trace");
    }
}
