pub mod backend;
pub mod endpoint;
pub mod error;
pub mod request;

pub use backend::*;
pub use endpoint::*;
pub use error::*;
pub use request::*;
