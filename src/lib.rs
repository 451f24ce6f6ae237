//! Motion and behavior core for a desktop mascot: a sprite that wanders the
//! screen with inertia, follows the pointer, naps, and slows down at night.
//!
//! [`pet::Pet`] is the entry point. Hosts implement [`host::Host`] and drive
//! timers through a [`schedule::Scheduler`].

pub mod config;
pub mod daynight;
pub mod error;
pub mod host;
pub mod mode;
pub mod motion;
pub mod pet;
pub mod platform;
pub mod routine;
pub mod schedule;

pub use config::PetConfig;
pub use error::{MascotError, Result};
pub use host::Host;
pub use mode::BehaviorMode;
pub use pet::Pet;
pub use schedule::{Scheduler, Task, TimerQueue};
