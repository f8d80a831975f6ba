#![deny(warnings)]

pub mod buffer;
pub mod config;
