//! Animated ambient background.
//!
//! Renders a slow, faint scene on a full-viewport canvas:
//! - Soft radial orbs and a drifting grid
//! - A procedurally generated mountain silhouette
//! - Drifting particles joined by distance-faded lines, reaching toward the pointer
//! - Floating code glyphs
//!
//! Entity populations scale with the viewport and are rebuilt after a
//! debounced resize. A reduced-motion preference disables the whole thing.
//!
//! # Example
//!
//! ```ignore
//! use ambient_backdrop::AmbientBackground;
//!
//! view! { <AmbientBackground /> }
//! ```

mod component;
pub mod config;
mod engine;
mod host;
mod mountain;
mod particles;
mod render;
mod scene;
mod scheduler;
mod surface;
mod symbols;
pub mod theme;
mod types;

pub use component::{
	AmbientBackground, BackgroundHandle, REDUCED_MOTION_QUERY, mount_background,
	prefers_reduced_motion,
};
pub use config::BackgroundConfig;
pub use engine::AnimationEngine;
pub use host::{AttachError, Host, WebHost};
pub use mountain::{MountainPoint, MountainProfile};
pub use particles::{Particle, ParticleField};
pub use scene::Scene;
pub use scheduler::{Debouncer, FrameScheduler, PendingTimer};
pub use surface::{ColorStop, Gradient, Surface2d};
pub use symbols::{Symbol, SymbolField};
pub use theme::{BackgroundTheme, Color};
pub use types::{PointerState, Viewport};
