use std::fmt;
use std::rc::Rc;

/// Cloneable dispatch handle.
///
/// A `Signal` is the only way code outside the runtime can inject a message.
/// Views and effects receive one by reference and may clone it to keep it
/// around, e.g. to deliver a message once some I/O has completed.
pub struct Signal<Msg>(Rc<dyn Fn(Msg)>);

impl<Msg: 'static> Signal<Msg> {
    pub fn new(f: impl Fn(Msg) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn send(&self, msg: Msg) {
        (self.0)(msg)
    }

    /// Returns a signal accepting `A` that translates every message through
    /// `f` before forwarding it here.
    pub fn contramap<A: 'static>(&self, f: impl Fn(A) -> Msg + 'static) -> Signal<A> {
        let outer = self.clone();
        Signal::new(move |msg: A| outer.send(f(msg)))
    }

    /// True when both handles dispatch through the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<Msg> Clone for Signal<Msg> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Msg> fmt::Debug for Signal<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Signal(..)")
    }
}

pub fn signal<Msg: 'static>(f: impl Fn(Msg) + 'static) -> Signal<Msg> {
    Signal::new(f)
}
