/// Log a message the first time this call site is reached, then stay silent.
#[macro_export]
macro_rules! log_once {
    (target: $target:expr, $lvl:expr, $($arg:tt)+) => {{
        static ONCE: std::sync::Once = std::sync::Once::new();
        ONCE.call_once(|| log::log!(target: $target, $lvl, $($arg)+));
    }};
    ($lvl:expr, $($arg:tt)+) => ($crate::log_once!(target: module_path!(), $lvl, $($arg)+));
}

#[macro_export]
macro_rules! warn_once {
    ($($arg:tt)+) => ($crate::log_once!(log::Level::Warn, $($arg)+));
}

pub use log_once;
pub use warn_once;
