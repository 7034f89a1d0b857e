//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into page-level operations.
//! - Keep presentation collaborators behind `surface` traits.

pub mod editor_service;
pub mod header_service;
pub mod id_gen;
pub mod profile_page;
pub mod reorder;
pub mod section_service;
