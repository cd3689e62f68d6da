#![no_std]

pub mod fifo;
pub mod split;
mod devlog;

pub use log as __log;
