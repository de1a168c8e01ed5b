pub use crate::assemble::{Assembly, Logic, assemble_program};
pub use crate::compose::{Tagged, ViewThunk, batch_programs, map_program};
pub use crate::effects::{Effect, batch_effects, map_effect};
pub use crate::error::{Error, Result};
pub use crate::observe::{LifecycleEvent, LogObserver, Observer};
pub use crate::program::{Next, Program};
pub use crate::runtime::{Phase, Runtime, run, ulmen};
pub use crate::signal::{Signal, signal};
