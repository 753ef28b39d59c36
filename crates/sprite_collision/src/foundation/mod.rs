//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and the 2D geometry kernel
//! - Logging utilities

pub mod math;
pub mod logging;
