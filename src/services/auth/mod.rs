pub mod access_policy;
pub mod factory;
pub mod principal;
pub mod service;
pub mod token_codec;

pub use access_policy::{AccessDenial, AccessPolicy, Decision};
pub use factory::build_auth_service;
pub use principal::{Principal, Role};
pub use service::AuthService;
pub use token_codec::{TokenCodec, TokenError};
