use std::fmt;
use std::rc::Rc;

use crate::signal::Signal;

/// Deferred unit of work, run with the signal of whoever invokes it.
///
/// "No effect" is `Option::<Effect<_>>::None`, which is a different thing from
/// an effect that does nothing when called. Combinators keep the two apart so
/// callers can skip invocation entirely.
///
/// An effect may send messages synchronously, or clone the signal and send
/// later. `R` is whatever the effect chooses to return; it is passed through
/// [`map_effect`] untouched and collected per slot by [`batch_effects`].
pub struct Effect<Msg, R = ()>(Rc<dyn Fn(&Signal<Msg>) -> R>);

impl<Msg: 'static, R: 'static> Effect<Msg, R> {
    pub fn new(f: impl Fn(&Signal<Msg>) -> R + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, signal: &Signal<Msg>) -> R {
        (self.0)(signal)
    }

    pub fn map_output<S: 'static>(self, f: impl Fn(R) -> S + 'static) -> Effect<Msg, S> {
        Effect::new(move |signal| f(self.call(signal)))
    }

    /// Forgets the return value.
    pub fn discard(self) -> Effect<Msg> {
        Effect::new(move |signal| {
            self.call(signal);
        })
    }
}

impl<Msg, R> Clone for Effect<Msg, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Msg, R> fmt::Debug for Effect<Msg, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Effect(..)")
    }
}

/// Translates the messages an effect emits.
///
/// An absent effect stays absent. Otherwise the returned effect runs the
/// original with a signal that forwards `f(msg)` to the caller's signal, and
/// returns whatever the original returned.
pub fn map_effect<A, B, R>(
    effect: Option<Effect<A, R>>,
    f: impl Fn(A) -> B + 'static,
) -> Option<Effect<B, R>>
where
    A: 'static,
    B: 'static,
    R: 'static,
{
    let effect = effect?;
    let f = Rc::new(f);
    Some(Effect::new(move |signal: &Signal<B>| {
        let f = f.clone();
        effect.call(&signal.contramap(move |msg: A| f(msg)))
    }))
}

/// Runs every present effect with the same signal, in list order.
///
/// The combined effect returns one slot per input: `None` where the input was
/// absent, `Some(result)` otherwise. An empty list gives an effect that does
/// nothing and returns an empty list.
pub fn batch_effects<Msg, R>(
    effects: impl IntoIterator<Item = Option<Effect<Msg, R>>>,
) -> Effect<Msg, Vec<Option<R>>>
where
    Msg: 'static,
    R: 'static,
{
    let effects: Vec<Option<Effect<Msg, R>>> = effects.into_iter().collect();
    Effect::new(move |signal| {
        effects
            .iter()
            .map(|effect| effect.as_ref().map(|effect| effect.call(signal)))
            .collect::<Vec<_>>()
    })
}
