//! Identity only: tokens are issued elsewhere, this crate just verifies them.

mod claims;
pub mod extractors;

pub use claims::Claims;
pub use extractors::{AuthUser, JwtKeys};
