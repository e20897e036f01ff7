pub mod light;
pub mod mqtt;
pub mod persistence;

pub use light::*;
pub use mqtt::*;
pub use persistence::*;
