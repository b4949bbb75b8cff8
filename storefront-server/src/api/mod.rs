//! HTTP API.
//!
//! Every orders endpoint requires the signed identity headers checked by
//! [`extractors::AuthenticatedUser`].

pub mod extractors;
pub mod orders;
