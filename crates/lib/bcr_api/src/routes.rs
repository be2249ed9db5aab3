//! Route paths.

pub const GET_ROOT: &str = "/";
pub const POST_AUTH_REGISTER: &str = "/v1/auth/register";
pub const POST_AUTH_LOGIN: &str = "/v1/auth/login";
pub const GET_AUTH_WHOAMI: &str = "/v1/auth/whoami";
