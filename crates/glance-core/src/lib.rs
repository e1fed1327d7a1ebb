#![cfg_attr(not(test), no_std)]

//! Board-independent core for the Glance desk display: the mode controller,
//! button latch, quote records, and wall-clock gating predicates. Everything
//! here is host-testable; hardware and networking live in the HAL crate and
//! the firmware binary.

pub mod app;
pub mod clock;
pub mod config;
pub mod input;
pub mod quote;
pub mod render;
pub mod wire;
