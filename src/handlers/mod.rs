// handlers/mod.rs - two security tiers:
// Public (no auth) → Protected (bearer token)
pub mod protected;
pub mod public;
