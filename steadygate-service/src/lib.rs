//! steadygate Service - Validator Facades and Composition Root
//!
//! Wires rule evaluation, the result cache and the latency padder into the
//! two validators an outer layer calls:
//!
//! ```text
//! caller -> Validator::validate
//!             +-- padded region --------------------------------+
//!             | observer -> cache probe -> (miss) rules -> store |
//!             +--------------------------------------------------+
//!           <- Outcome, never sooner than the target latency
//! ```
//!
//! Cache hits and misses run inside the same padded region, so a caller
//! cannot tell them apart by latency.

pub mod service;
pub mod telemetry;
pub mod validator;

pub use service::{ValidationService, ValidationServiceBuilder};
pub use telemetry::{init_tracing, TelemetryConfig};
pub use validator::Validator;

pub use steadygate_core::{
    GateConfig, GateError, GateResult, NoopObserver, Outcome, RuleSetKind, TracingObserver,
    ValidationObserver, ValidatorKind,
};
