use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ahash::AHashMap;
use colored::Colorize;
use crossbeam_channel::{select, Receiver};

use viveventd::app::{DispatchReport, EventKind, EventManager};
use viveventd::{print_debug, print_info, print_warning};
use vivevents_device::RecordingProvider;

/// Plays a recording through an [`EventManager`] and tallies what fired.
pub(crate) struct ReplayRunner {
    manager: EventManager,
    provider: RecordingProvider,
    tick: Duration,
    counts: Rc<RefCell<AHashMap<EventKind, usize>>>,
}

impl ReplayRunner {
    pub fn new(mut manager: EventManager, provider: RecordingProvider, tick: Duration) -> Self {
        let counts: Rc<RefCell<AHashMap<EventKind, usize>>> = Rc::default();
        for kind in EventKind::ALL {
            let counts = Rc::clone(&counts);
            manager.subscribe(kind, move |event| {
                print_debug!("{event} at {:?}", event.touch_point);
                *counts.borrow_mut().entry(event.kind).or_default() += 1;
                Ok(())
            });
        }
        Self {
            manager,
            provider,
            tick,
            counts,
        }
    }

    /// Replay every frame as fast as possible.
    pub fn run(&mut self) -> DispatchReport {
        let mut total = DispatchReport::default();
        while let Some(report) = self.manager.poll(&mut self.provider, self.tick) {
            total += report;
        }
        total
    }

    /// Replay at the recorded tick rate until done or until `stop` fires.
    pub fn run_paced(&mut self, stop: &Receiver<()>) -> DispatchReport {
        let mut total = DispatchReport::default();
        let ticker = crossbeam_channel::tick(self.tick);
        loop {
            select! {
                recv(stop) -> _ => {
                    print_warning!(
                        "replay interrupted with {} frames left",
                        self.provider.remaining()
                    );
                    break;
                }
                recv(ticker) -> _ => {
                    let Some(report) = self.manager.poll(&mut self.provider, self.tick) else {
                        break;
                    };
                    total += report;
                }
            }
        }
        total
    }

    pub fn print_summary(&self, total: &DispatchReport) {
        let counts = self.counts.borrow();
        print_info!(
            "replay finished - {} events, {} listener failures",
            total.fired,
            total.failed
        );
        for kind in EventKind::ALL {
            if let Some(count) = counts.get(&kind) {
                print_info!("  {:<22} {count}", kind.as_str());
            }
        }
    }
}
