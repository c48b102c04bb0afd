pub mod logger;
#[macro_use]
pub mod macros;
