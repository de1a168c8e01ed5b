use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::{Error, Result};
use crate::observe::{LifecycleEvent, Observer};
use crate::program::{Done, Next, Program, Update, View};
use crate::signal::Signal;

/// Lifecycle of a runtime. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Created,
    Running,
    Stopped,
}

impl Phase {
    pub fn is_running(self) -> bool {
        self == Phase::Running
    }

    fn start(self) -> Result<Phase> {
        match self {
            Phase::Created => Ok(Phase::Running),
            phase => Err(Error::AlreadyStarted { phase }),
        }
    }

    /// Returns the phase after a stop request and whether the `done` hook
    /// fires. Only `Running -> Stopped` fires it.
    fn stop(self) -> (Phase, bool) {
        (Phase::Stopped, self == Phase::Running)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Created => "created",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
        })
    }
}

struct Driver<M, Msg, V> {
    phase: Cell<Phase>,
    init: RefCell<Option<Next<M, Msg>>>,
    update: Update<M, Msg, Msg>,
    view: View<M, Msg, V>,
    done: Option<Done<M>>,
    model: RefCell<Option<Rc<M>>>,
    depth: Cell<usize>,
    signal: Signal<Msg>,
    observers: RefCell<Vec<Rc<dyn Observer>>>,
}

/// Drives one [`Program`] through `start`, any number of signals, and `stop`.
///
/// Everything runs on the caller's stack. A signal sent from a view or an
/// effect while a cycle is in progress runs its own update, effect and view
/// to completion before the outer cycle continues; nothing is queued.
///
/// No `RefCell` borrow is held while user code runs, so a panic unwinding out
/// of `update`, `view`, an effect or `done` leaves the runtime usable. It does
/// not roll anything back either: whatever was installed before the panic
/// stays installed.
pub struct Runtime<M, Msg, V = ()> {
    driver: Rc<Driver<M, Msg, V>>,
}

/// Creates a runtime for `program` without starting it.
pub fn ulmen<M, Msg, V>(program: Program<M, Msg, Msg, V>) -> Runtime<M, Msg, V>
where
    M: 'static,
    Msg: 'static,
    V: 'static,
{
    Runtime::new(program)
}

/// Creates a runtime for `program` and starts it right away.
pub fn run<M, Msg, V>(program: Program<M, Msg, Msg, V>) -> Runtime<M, Msg, V>
where
    M: 'static,
    Msg: 'static,
    V: 'static,
{
    let runtime = Runtime::new(program);
    runtime.launch(Phase::Running);
    runtime
}

impl<M, Msg, V> Runtime<M, Msg, V>
where
    M: 'static,
    Msg: 'static,
    V: 'static,
{
    pub fn new(program: Program<M, Msg, Msg, V>) -> Self {
        let Program {
            init,
            update,
            view,
            done,
        } = program;
        let driver = Rc::new_cyclic(|weak: &Weak<Driver<M, Msg, V>>| {
            let weak = weak.clone();
            Driver {
                phase: Cell::new(Phase::Created),
                init: RefCell::new(Some(init)),
                update,
                view,
                done,
                model: RefCell::new(None),
                depth: Cell::new(0),
                signal: Signal::new(move |msg: Msg| match weak.upgrade() {
                    Some(driver) => driver.dispatch(msg),
                    None => log::trace!("runtime dropped; message ignored"),
                }),
                observers: RefCell::new(Vec::new()),
            }
        });
        Self { driver }
    }

    /// Adds an observer. Observers are notified in the order they were added.
    pub fn with_observer(self, observer: Rc<dyn Observer>) -> Self {
        self.driver.observers.borrow_mut().push(observer);
        self
    }

    pub fn phase(&self) -> Phase {
        self.driver.phase.get()
    }

    /// The model currently held, if the runtime has been started.
    pub fn model(&self) -> Option<Rc<M>> {
        self.driver.current()
    }

    /// Handle that sends into this runtime. It does not keep the runtime
    /// alive; once the runtime is dropped, sends are ignored.
    pub fn dispatcher(&self) -> Signal<Msg> {
        self.driver.signal.clone()
    }

    /// Installs the init model, runs the init effect, then renders.
    ///
    /// Only the first call on a fresh runtime does anything; later calls, or a
    /// call after `stop`, return [`Error::AlreadyStarted`] without touching
    /// the program.
    pub fn start(&self) -> Result<()> {
        let running = self.driver.phase.get().start()?;
        self.launch(running);
        Ok(())
    }

    fn launch(&self, running: Phase) {
        self.driver.phase.set(running);
        let init = self.driver.init.borrow_mut().take();
        self.driver.emit(LifecycleEvent::Started);
        if let Some(init) = init {
            self.driver.change(init);
        }
    }

    /// Same as sending through [`dispatcher`](Self::dispatcher).
    pub fn signal(&self, msg: Msg) {
        self.driver.dispatch(msg);
    }

    /// Stops the runtime and calls `done` with the last model.
    ///
    /// `done` runs on the `Running -> Stopped` transition only: stopping twice,
    /// or stopping a runtime that never started, does not call it. Effects
    /// already holding a signal are not interrupted; their later sends are
    /// dropped.
    pub fn stop(&self) {
        let (phase, fire) = self.driver.phase.get().stop();
        if self.driver.phase.replace(phase) == Phase::Stopped {
            return;
        }
        self.driver.init.borrow_mut().take();
        let model = self.driver.current();
        let done = match (&self.driver.done, fire, model) {
            (Some(done), true, Some(model)) => {
                done(&*model);
                true
            }
            _ => false,
        };
        self.driver.emit(LifecycleEvent::Stopped { done });
    }
}

impl<M, Msg, V> fmt::Debug for Runtime<M, Msg, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("phase", &self.driver.phase.get())
            .field("depth", &self.driver.depth.get())
            .finish()
    }
}

impl<M, Msg, V> Driver<M, Msg, V>
where
    M: 'static,
    Msg: 'static,
    V: 'static,
{
    fn current(&self) -> Option<Rc<M>> {
        self.model.borrow().clone()
    }

    fn emit(&self, event: LifecycleEvent) {
        let observers = self.observers.borrow().clone();
        for observer in &observers {
            observer.on_event(&event);
        }
    }

    fn dispatch(&self, msg: Msg) {
        let phase = self.phase.get();
        if !phase.is_running() {
            log::trace!("message dropped: runtime is {phase}");
            self.emit(LifecycleEvent::Dropped { phase });
            return;
        }
        let Some(model) = self.current() else {
            // sent from a `Started` observer, before init was installed
            log::trace!("message dropped: no model installed yet");
            self.emit(LifecycleEvent::Dropped { phase });
            return;
        };
        let _depth = DepthGuard::enter(&self.depth);
        let next = (self.update)(msg, &*model);
        drop(model);
        self.emit(LifecycleEvent::Updated {
            depth: self.depth.get(),
        });
        self.apply(next);
    }

    /// Runs the init cycle.
    fn change(&self, next: Next<M, Msg>) {
        let _depth = DepthGuard::enter(&self.depth);
        self.apply(next);
    }

    fn apply(&self, next: Next<M, Msg>) {
        let Next { model, effect } = next;
        let model = Rc::new(model);
        *self.model.borrow_mut() = Some(model.clone());

        if let Some(effect) = effect {
            self.emit(LifecycleEvent::Effect {
                depth: self.depth.get(),
            });
            effect.call(&self.signal);
        }

        // Nested signals may have replaced the model; render the latest one.
        let model = self.current().unwrap_or(model);
        (self.view)(&*model, &self.signal);
        self.emit(LifecycleEvent::Rendered {
            depth: self.depth.get(),
        });
    }
}

struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
