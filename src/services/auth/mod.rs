pub mod authenticator;
pub mod extract;
pub mod factory;
pub mod identity;

pub use authenticator::{AuthError, Authenticator};
pub use factory::build_authenticator;
