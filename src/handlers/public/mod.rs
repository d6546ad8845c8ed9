// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, health and documentation. Nothing here passes through
// the bearer-token gate.

pub mod login;
pub mod system;

pub use login::login_post;
pub use system::{document, health, not_found};
