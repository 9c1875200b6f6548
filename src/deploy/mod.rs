// src/deploy/mod.rs
// =============================================================================
// Turns a resolved repository into a Deploy with Vercel button.
// =============================================================================

mod button;

pub use button::DeployArtifact;
