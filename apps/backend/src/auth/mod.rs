pub mod claims;
pub mod jwks;
pub mod management;
pub mod metadata;
pub mod verifier;
