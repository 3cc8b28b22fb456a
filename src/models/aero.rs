//! Aerodynamic models.
//!
//! This module contains models for rotating lifting surfaces such as
//! propellers and lift rotors.

pub mod rotor;
