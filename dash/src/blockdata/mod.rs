//! Blockdata
//!
//! This module defines the transaction structures a masternode list diff
//! carries.

pub mod transaction;
