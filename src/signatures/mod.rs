pub mod builtin;
pub mod checks;
pub mod error;
pub mod library;
pub mod pattern;

pub use builtin::{
    AUTHORIZATION_EXPIRY, EXPRESSION_REFERENCE, OPERATION_TIMEOUT, RATE_LIMITING,
    SESSION_VISIBILITY, TYPE_MISMATCH,
};
pub use checks::{EvidenceCheck, MessageSignature};
pub use error::CatalogError;
pub use library::SignatureLibrary;
pub use pattern::{CausalDirection, RemediationClass, SignaturePattern, WeightedCheck};
