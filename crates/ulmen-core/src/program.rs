use std::fmt;
use std::rc::Rc;

use crate::effects::{Effect, map_effect};
use crate::signal::Signal;

/// Result of `init` and of every `update`: the next model plus an optional
/// effect to run once the model is in place.
pub struct Next<M, Msg> {
    pub model: M,
    pub effect: Option<Effect<Msg>>,
}

impl<M, Msg: 'static> Next<M, Msg> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            effect: None,
        }
    }

    pub fn with_effect(model: M, effect: Effect<Msg>) -> Self {
        Self {
            model,
            effect: Some(effect),
        }
    }

    /// Translates the messages the effect emits; the model is untouched.
    pub fn map_msg<B: 'static>(self, f: impl Fn(Msg) -> B + 'static) -> Next<M, B> {
        Next {
            model: self.model,
            effect: map_effect(self.effect, f),
        }
    }
}

impl<M: fmt::Debug, Msg> fmt::Debug for Next<M, Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("model", &self.model)
            .field("effect", &self.effect)
            .finish()
    }
}

pub type Update<M, In, Out> = Rc<dyn Fn(In, &M) -> Next<M, Out>>;
pub type View<M, Out, V> = Rc<dyn Fn(&M, &Signal<Out>) -> V>;
pub type Done<M> = Rc<dyn Fn(&M)>;

/// One instance of the model/update/view pattern.
///
/// `update` receives `In` messages while effects and views emit `Out`. The two
/// only differ for programs produced by [`map_program`](crate::map_program),
/// whose outgoing side has been translated into an outer namespace; the
/// runtime only accepts programs where they coincide.
pub struct Program<M, In, Out = In, V = ()> {
    pub init: Next<M, Out>,
    pub update: Update<M, In, Out>,
    pub view: View<M, Out, V>,
    pub done: Option<Done<M>>,
}

impl<M, In, Out, V> Program<M, In, Out, V>
where
    M: 'static,
    In: 'static,
    Out: 'static,
    V: 'static,
{
    pub fn new(
        init: Next<M, Out>,
        update: impl Fn(In, &M) -> Next<M, Out> + 'static,
        view: impl Fn(&M, &Signal<Out>) -> V + 'static,
    ) -> Self {
        Self {
            init,
            update: Rc::new(update),
            view: Rc::new(view),
            done: None,
        }
    }

    /// Teardown hook, called with the last model when the runtime stops.
    pub fn with_done(mut self, done: impl Fn(&M) + 'static) -> Self {
        self.done = Some(Rc::new(done));
        self
    }
}
