//! CAS gateway service: route assembly, request tracing and the standalone
//! server.

pub mod cas_service;
mod tracing;

pub use cas_service::CasService;
