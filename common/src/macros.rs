/// Compiles the wrapped items only on x86_64.
#[macro_export]
macro_rules! cfg_x86_64 {
    ($($item:item)*) => {
        $(
            #[cfg(target_arch = "x86_64")]
            $item
        )*
    };
}

/// Compiles the wrapped items only on aarch64.
#[macro_export]
macro_rules! cfg_aarch64 {
    ($($item:item)*) => {
        $(
            #[cfg(target_arch = "aarch64")]
            $item
        )*
    };
}
