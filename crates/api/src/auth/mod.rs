//! Access-token handling. Tokens are issued by the external auth provider
//! and validated here with a shared HS256 secret.

pub mod jwt;
