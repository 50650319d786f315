//! Auth types shared across IoT Hub services.
//!
//! Provides JWT validation and the `BearerIdentity` extractor that gates
//! every protected route.

pub mod bearer;
pub mod token;
