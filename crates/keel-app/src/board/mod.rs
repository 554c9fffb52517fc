// Exactly one board per build; the selection never changes at run time.
cfg_if::cfg_if! {
    if #[cfg(not(target_os = "none"))] {
        mod sim;
        pub use sim::*;
    }
    else if #[cfg(feature = "nrf52840")] {
        mod nrf52840;
        pub use nrf52840::*;
    } else {
        // Plain Cortex-M, default phases throughout.
        mod generic;
        pub use generic::*;
    }
}
