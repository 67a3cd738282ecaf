//! Data models for the ticket SOAP API.
//!
//! This module contains the response envelopes for every operation, the
//! ticket/work-log/device records they carry, and the SOAP fault model.

mod asset;
mod common;
mod fault;
mod responses;
mod ticket;

pub use asset::*;
pub use common::*;
pub use fault::*;
pub use responses::*;
pub use ticket::*;
