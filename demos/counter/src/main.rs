use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ulmen_core::prelude::*;
use ulmen_devtools::Inspector;

#[derive(Clone, Copy, Debug)]
enum Msg {
    Increment,
    Decrement,
    /// Increment `n` times, delivered later through the mailbox.
    IncrementLater(u32),
}

/// Callbacks parked by effects until the host gets around to them, standing in
/// for I/O completions or timers.
type Mailbox = Rc<RefCell<VecDeque<Box<dyn FnOnce()>>>>;

fn counter(name: &'static str, mailbox: &Mailbox) -> Program<i32, Msg, Msg, String> {
    let mailbox = mailbox.clone();
    Program::new(
        Next::new(0),
        move |msg: Msg, count: &i32| match msg {
            Msg::Increment => Next::new(count + 1),
            Msg::Decrement => Next::new(count - 1),
            Msg::IncrementLater(n) => {
                let mailbox = mailbox.clone();
                Next::with_effect(
                    *count,
                    Effect::new(move |signal: &Signal<Msg>| {
                        let signal = signal.clone();
                        mailbox.borrow_mut().push_back(Box::new(move || {
                            for _ in 0..n {
                                signal.send(Msg::Increment);
                            }
                        }));
                    }),
                )
            }
        },
        move |count: &i32, _: &Signal<Msg>| format!("{name}: {count:>3}"),
    )
    .with_done(move |count: &i32| log::info!("{name} finished at {count}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mailbox: Mailbox = Rc::default();
    let program = batch_programs(
        vec![counter("left", &mailbox), counter("right", &mailbox)],
        |views| {
            let frame = views.iter().map(|v| v()).collect::<Vec<_>>().join("  |  ");
            println!("{frame}");
            frame
        },
    );

    let inspector = Rc::new(Inspector::new());
    let runtime = ulmen(program)
        .with_observer(inspector.clone())
        .with_observer(Rc::new(LogObserver::new("counter")));
    runtime.start()?;

    let signal = runtime.dispatcher();
    signal.send(Tagged::new(0, Msg::Increment));
    signal.send(Tagged::new(1, Msg::Decrement));
    signal.send(Tagged::new(1, Msg::IncrementLater(3)));
    signal.send(Tagged::new(0, Msg::Increment));

    loop {
        let job = mailbox.borrow_mut().pop_front();
        match job {
            Some(job) => job(),
            None => break,
        }
    }

    // this one never reaches a counter
    signal.send(Tagged::new(2, Msg::Increment));

    signal.send(Tagged::new(0, Msg::IncrementLater(1)));
    runtime.stop();
    // delivered after stop: dropped
    let late = mailbox.borrow_mut().pop_front();
    if let Some(job) = late {
        job();
    }

    println!("{}", inspector.hud());
    Ok(())
}
