//! Common types and definitions used across `semihost`.

mod endianness;
mod errno;
mod exception;
mod request;

pub use self::endianness::Endianness;
pub use self::errno::Errno;
pub use self::exception::ExceptionReason;
pub use self::request::Request;
