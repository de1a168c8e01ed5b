use std::rc::Rc;

use crate::program::{Done, Next, Program, Update};
use crate::signal::Signal;

/// The message-handling half of a program, as produced by a logic factory.
pub struct Logic<M, Msg> {
    pub init: Next<M, Msg>,
    pub update: Update<M, Msg, Msg>,
    pub done: Option<Done<M>>,
}

impl<M: 'static, Msg: 'static> Logic<M, Msg> {
    pub fn new(init: Next<M, Msg>, update: impl Fn(Msg, &M) -> Next<M, Msg> + 'static) -> Self {
        Self {
            init,
            update: Rc::new(update),
            done: None,
        }
    }

    pub fn with_done(mut self, done: impl Fn(&M) + 'static) -> Self {
        self.done = Some(Rc::new(done));
        self
    }
}

/// Inputs to [`assemble_program`]: a data provider, a logic factory, and a
/// view function, each with its own optional options value.
pub struct Assembly<D, DO, L, LO, VF, VO> {
    pub data: D,
    pub data_options: Option<DO>,
    pub logic: L,
    pub logic_options: Option<LO>,
    pub view: VF,
    pub view_options: Option<VO>,
}

/// Wires a data provider, a logic factory and a view into one program.
///
/// `data(data_options)` is called once and its result goes, together with
/// `logic_options`, into `logic`, also called once. The returned program's
/// view calls `view(model, signal, view_options)` on every render.
pub fn assemble_program<M, Msg, V, Data, D, DO, L, LO, VF, VO>(
    assembly: Assembly<D, DO, L, LO, VF, VO>,
) -> Program<M, Msg, Msg, V>
where
    M: 'static,
    Msg: 'static,
    V: 'static,
    VO: 'static,
    D: FnOnce(Option<DO>) -> Data,
    L: FnOnce(Data, Option<LO>) -> Logic<M, Msg>,
    VF: Fn(&M, &Signal<Msg>, Option<&VO>) -> V + 'static,
{
    let Assembly {
        data,
        data_options,
        logic,
        logic_options,
        view,
        view_options,
    } = assembly;

    let Logic { init, update, done } = logic(data(data_options), logic_options);
    Program {
        init,
        update,
        view: Rc::new(move |model: &M, signal: &Signal<Msg>| {
            view(model, signal, view_options.as_ref())
        }),
        done,
    }
}
