use std::ops::ControlFlow;

use tracing::{debug, info};

/// Cooperative progress reporting for long point-by-point loops.
///
/// `step` is called once per processed point. Returning
/// `ControlFlow::Break(())` asks the loop to stop; the caller then keeps
/// whatever it has produced so far.
pub trait ProgressReporter {
    fn reset(&mut self) {}

    fn set_title(&mut self, _title: &str) {}

    fn set_detail(&mut self, _detail: &str) {}

    fn start(&mut self, _total_steps: usize) {}

    fn step(&mut self) -> ControlFlow<()>;

    fn stop(&mut self) {}
}

/// One reporting session over `count` points.
///
/// Creating the session resets and starts the reporter; dropping it calls
/// `stop`, including on early exit.
pub struct ProgressSession<'a> {
    reporter: Option<&'a mut dyn ProgressReporter>,
}

impl<'a> ProgressSession<'a> {
    pub fn begin(
        reporter: Option<&'a mut dyn ProgressReporter>,
        title: &str,
        count: usize,
    ) -> Self {
        let reporter = reporter.map(|r| {
            r.reset();
            r.set_title(title);
            r.set_detail(&format!("Number of points = {count}"));
            r.start(count);
            r
        });
        Self { reporter }
    }

    #[inline]
    pub fn step(&mut self) -> ControlFlow<()> {
        match self.reporter.as_deref_mut() {
            Some(r) => r.step(),
            None => ControlFlow::Continue(()),
        }
    }
}

impl Drop for ProgressSession<'_> {
    fn drop(&mut self) {
        if let Some(r) = self.reporter.as_deref_mut() {
            r.stop();
        }
    }
}

/// Reporter that logs through `tracing` every 10 % and never cancels.
#[derive(Debug, Default)]
pub struct TracingProgress {
    title: String,
    total: usize,
    done: usize,
    last_decile: usize,
}

impl TracingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps_done(&self) -> usize {
        self.done
    }
}

impl ProgressReporter for TracingProgress {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    fn set_detail(&mut self, detail: &str) {
        info!(title = %self.title, "{detail}");
    }

    fn start(&mut self, total_steps: usize) {
        self.total = total_steps;
    }

    fn step(&mut self) -> ControlFlow<()> {
        self.done += 1;
        if self.total > 0 {
            let decile = (self.done * 10 / self.total).min(10);
            if decile > self.last_decile {
                self.last_decile = decile;
                info!(title = %self.title, "{}%", decile * 10);
            }
        }
        ControlFlow::Continue(())
    }

    fn stop(&mut self) {
        debug!(title = %self.title, steps = self.done, "progress stopped");
    }
}
