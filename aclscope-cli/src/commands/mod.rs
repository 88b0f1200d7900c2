pub mod decode;
pub mod encode;
pub mod resolve;
pub mod rights;
