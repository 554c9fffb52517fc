//! Log macros for the application.
//!
//! Firmware logs through `defmt` (when the feature is on), the host
//! simulator through `tracing`.
#![allow(unused_macros)]

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(not(target_os = "none"))]
            ::tracing::info!($s $(, $x)*);
            #[cfg(all(target_os = "none", feature = "defmt"))]
            ::defmt::info!($s $(, $x)*);
            #[cfg(all(target_os = "none", not(feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(not(target_os = "none"))]
            ::tracing::warn!($s $(, $x)*);
            #[cfg(all(target_os = "none", feature = "defmt"))]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(all(target_os = "none", not(feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(not(target_os = "none"))]
            ::tracing::error!($s $(, $x)*);
            #[cfg(all(target_os = "none", feature = "defmt"))]
            ::defmt::error!($s $(, $x)*);
            #[cfg(all(target_os = "none", not(feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}
