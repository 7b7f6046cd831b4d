//! Domain types for the Pulse task protocol

pub mod task;
