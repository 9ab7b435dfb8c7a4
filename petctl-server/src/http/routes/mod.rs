//! Route handlers organized by resource

pub mod health;
pub mod owners;
pub mod pets;

use serde::Serialize;

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
