//! Comprehensive test suite for the canvas core
//!
//! This module organizes tests into logical groups to help understand
//! different aspects of the editor.

#[cfg(test)]
mod gesture_tests;
#[cfg(test)]
mod property_tests;
