#![cfg_attr(not(test), no_std)]

//! Board support for the ESP32-S3 desk display: HAT keys, panel adapter,
//! landscape renderer, and the handles shared with async network workers.

pub mod input;
pub mod network;
pub mod platform;
pub mod render;
pub mod time;
