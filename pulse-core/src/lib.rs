//! Pulse Core
//!
//! Core types for the Pulse agent-task protocol.
//!
//! This crate contains:
//! - Domain types: task lifecycle entities (statuses, outputs, contexts)
//! - DTOs: request/response envelopes for the submission and polling endpoints

pub mod domain;
pub mod dto;
