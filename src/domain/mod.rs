pub mod dto;
pub mod effect;
pub mod entity;
mod merge;
pub mod ports;
