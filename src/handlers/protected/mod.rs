// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route registered from this module is wrapped by
// `middleware::jwt_auth_middleware` at router assembly time.

pub mod products;
