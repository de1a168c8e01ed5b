//! Program combinators.
//!
//! [`map_program`] moves a program's outgoing messages into another namespace,
//! [`batch_programs`] runs a fixed list of programs side by side as one. Both
//! return plain [`Program`]s, so the result can be mapped, batched again, or
//! handed to the runtime.

use std::rc::Rc;

use crate::effects::batch_effects;
use crate::program::{Done, Next, Program, Update, View};
use crate::signal::Signal;

/// Message addressed to one child of a batched program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tagged<T> {
    pub index: usize,
    pub data: T,
}

impl<T> Tagged<T> {
    pub fn new(index: usize, data: T) -> Self {
        Self { index, data }
    }
}

/// Deferred child view handed to the container view of a batch.
///
/// Nothing renders until the thunk is called, so the container decides which
/// children to realize and in what order.
pub type ViewThunk<V> = Box<dyn Fn() -> V>;

/// Translates everything a program emits through `f`.
///
/// The init effect and every update effect are wrapped with
/// [`map_effect`](crate::map_effect), and the view receives a signal that
/// applies `f` before forwarding. `update` keeps accepting the program's own
/// messages: routing outer messages back down is up to the caller, which is
/// what [`batch_programs`] does. `done` only sees the model and is kept as is.
pub fn map_program<M, In, A, B, V>(
    program: Program<M, In, A, V>,
    f: impl Fn(A) -> B + 'static,
) -> Program<M, In, B, V>
where
    M: 'static,
    In: 'static,
    A: 'static,
    B: 'static,
    V: 'static,
{
    let f: Rc<dyn Fn(A) -> B> = Rc::new(f);
    let Program {
        init,
        update: inner_update,
        view: inner_view,
        done,
    } = program;

    let init = init.map_msg(translate(f.clone()));

    let update: Update<M, In, B> = {
        let f = f.clone();
        Rc::new(move |msg: In, model: &M| inner_update(msg, model).map_msg(translate(f.clone())))
    };

    let view: View<M, B, V> = Rc::new(move |model: &M, signal: &Signal<B>| {
        inner_view(model, &signal.contramap(translate(f.clone())))
    });

    Program {
        init,
        update,
        view,
        done,
    }
}

fn translate<A: 'static, B: 'static>(f: Rc<dyn Fn(A) -> B>) -> impl Fn(A) -> B + 'static {
    move |msg| f(msg)
}

struct Child<M, In, Out, V> {
    update: Update<M, In, Tagged<Out>>,
    view: View<M, Tagged<Out>, V>,
    done: Option<Done<M>>,
}

/// Combines `programs` into one whose model is the list of child models.
///
/// Child `i` is wrapped once with `map_program(child, |data| Tagged { index: i, data })`,
/// so everything it emits arrives at the composite update tagged with its
/// position. The composite update routes `Tagged { index, data }` to child
/// `index` and replaces only that slot; all other slots keep pointing at the
/// same `Rc`. An index with no child is a no-op that returns the state as is.
///
/// The composite view hands `container_view` one [`ViewThunk`] per child, in
/// order. Composite `done` calls each child's `done`, when present, in order.
pub fn batch_programs<M, In, Out, V, W>(
    programs: Vec<Program<M, In, Out, V>>,
    container_view: impl Fn(Vec<ViewThunk<V>>) -> W + 'static,
) -> Program<Vec<Rc<M>>, Tagged<In>, Tagged<Out>, W>
where
    M: 'static,
    In: 'static,
    Out: 'static,
    V: 'static,
    W: 'static,
{
    let count = programs.len();
    let mut models = Vec::with_capacity(count);
    let mut effects = Vec::with_capacity(count);
    let mut children = Vec::with_capacity(count);

    for (index, program) in programs.into_iter().enumerate() {
        let Program {
            init,
            update,
            view,
            done,
        } = map_program(program, move |data| Tagged { index, data });
        models.push(Rc::new(init.model));
        effects.push(init.effect);
        children.push(Child { update, view, done });
    }
    log::trace!(
        "batched {count} programs ({} with init effects)",
        effects.iter().filter(|e| e.is_some()).count()
    );

    let children: Rc<[Child<M, In, Out, V>]> = children.into();

    let init = Next::with_effect(models, batch_effects(effects).discard());

    let update: Update<Vec<Rc<M>>, Tagged<In>, Tagged<Out>> = {
        let children = children.clone();
        Rc::new(move |msg: Tagged<In>, state: &Vec<Rc<M>>| {
            let Tagged { index, data } = msg;
            let (Some(child), Some(slot)) = (children.get(index), state.get(index)) else {
                log::trace!("batch: no child at index {index} of {}; ignored", children.len());
                return Next::new(state.clone());
            };
            let Next { model, effect } = (child.update)(data, &**slot);
            let mut state = state.clone();
            state[index] = Rc::new(model);
            Next { model: state, effect }
        })
    };

    let view: View<Vec<Rc<M>>, Tagged<Out>, W> = {
        let children = children.clone();
        Rc::new(move |state: &Vec<Rc<M>>, signal: &Signal<Tagged<Out>>| {
            let thunks = children
                .iter()
                .zip(state)
                .map(|(child, slot)| {
                    let view = child.view.clone();
                    let slot = slot.clone();
                    let signal = signal.clone();
                    Box::new(move || view(&*slot, &signal)) as ViewThunk<V>
                })
                .collect();
            container_view(thunks)
        })
    };

    let done: Done<Vec<Rc<M>>> = Rc::new(move |state: &Vec<Rc<M>>| {
        for (child, slot) in children.iter().zip(state) {
            if let Some(done) = &child.done {
                done(&**slot);
            }
        }
    });

    Program {
        init,
        update,
        view,
        done: Some(done),
    }
}
