pub mod signature;

pub use signature::{sign_payload, verify_signature, SIGNATURE_HEADER};
