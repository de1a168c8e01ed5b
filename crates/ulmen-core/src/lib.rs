//! # Programs, Effects, and the Runtime
//!
//! Ulmen is a small model → update → view runtime with deferred side effects,
//! plus combinators for building one program out of several. There are four
//! pieces:
//!
//! - [`Program`] — `init`, `update`, `view` and an optional `done` hook.
//! - [`Effect`] — deferred work that receives a [`Signal`] and may send
//!   messages with it, now or later.
//! - [`Runtime`] — drives one program: start, signal, stop.
//! - [`map_program`] / [`batch_programs`] — namespace and combine programs.
//!
//! ## A program
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ulmen_core::prelude::*;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let program = Program::new(
//!     Next::new(1),
//!     |msg: &'static str, count: &i32| match msg {
//!         "inc" => Next::new(count + 1),
//!         _ => Next::new(*count),
//!     },
//!     {
//!         let seen = seen.clone();
//!         move |count: &i32, _signal: &Signal<&'static str>| seen.borrow_mut().push(*count)
//!     },
//! );
//!
//! let runtime = ulmen(program);
//! runtime.start().unwrap();
//! runtime.signal("inc");
//! runtime.stop();
//! runtime.signal("inc"); // dropped
//!
//! assert_eq!(*seen.borrow(), vec![1, 2]);
//! ```
//!
//! ## Effects
//!
//! `update` never performs side effects itself. It returns a [`Next`] holding
//! the new model and, optionally, an effect. The runtime installs the model
//! first, then runs the effect with its own signal, then renders:
//!
//! ```rust
//! use ulmen_core::prelude::*;
//!
//! let fetch = Effect::new(|signal: &Signal<u32>| signal.send(42));
//! let next: Next<Option<u32>, u32> = Next::with_effect(None, fetch);
//! # let _ = next;
//! ```
//!
//! "No effect" is `None`. It is kept distinct from an effect that does
//! nothing, and every combinator maps `None` to `None`.
//!
//! ## Reentrancy
//!
//! Views and effects may send while the runtime is still processing a
//! message. The nested message is handled to completion (update, effect,
//! view) before the outer call continues. Messages sent after
//! [`Runtime::stop`] are dropped, which is how late callbacks from effects
//! that outlive the program are ignored.
//!
//! ## Composition
//!
//! [`batch_programs`] runs N programs side by side. Each child's outgoing
//! messages are tagged with its index ([`Tagged`]) and the composite `update`
//! routes them back. The container view receives one lazy [`ViewThunk`] per
//! child and decides how, and whether, to render each.

pub mod assemble;
pub mod compose;
pub mod effects;
pub mod error;
pub mod observe;
pub mod prelude;
pub mod program;
pub mod runtime;
pub mod signal;

pub use assemble::*;
pub use compose::*;
pub use effects::*;
pub use error::*;
pub use observe::*;
pub use program::*;
pub use runtime::*;
pub use signal::*;
