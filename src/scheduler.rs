// ============================================================================
// Random Wallpaper - Refresh Scheduling
// ============================================================================
// Three triggers drive the same fetch-apply cycle:
//   * startup  - once, right away, when `refresh-on-startup` is set
//   * periodic - every `interval` minutes, forever (0 disables the timer)
//   * manual   - user commands read from the terminal
// Everything runs on the loop thread, one cycle at a time. Manual triggers
// never move the periodic deadline.
// ============================================================================

use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// User commands accepted while running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Info,
    Save,
    Quit,
}

impl Action {
    /// Parse one line of terminal input
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "r" | "refresh" => Some(Action::Refresh),
            "i" | "info" => Some(Action::Info),
            "s" | "save" => Some(Action::Save),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Startup,
    Periodic,
    Manual(Action),
}

#[derive(Debug)]
pub struct Scheduler {
    interval: Option<Duration>,
    next_due: Option<Instant>,
    startup_pending: bool,
}

impl Scheduler {
    pub fn new(interval_minutes: u64, refresh_on_startup: bool, now: Instant) -> Self {
        Self::with_interval(
            Duration::from_secs(interval_minutes.saturating_mul(60)),
            refresh_on_startup,
            now,
        )
    }

    /// A zero interval disables the periodic trigger, and so does one too
    /// long for the clock to represent.
    pub fn with_interval(interval: Duration, refresh_on_startup: bool, now: Instant) -> Self {
        let next_due = if interval.is_zero() {
            None
        } else {
            now.checked_add(interval)
        };
        Scheduler {
            interval: next_due.map(|_| interval),
            next_due,
            startup_pending: refresh_on_startup,
        }
    }

    pub fn take_startup(&mut self) -> Option<Trigger> {
        if std::mem::take(&mut self.startup_pending) {
            Some(Trigger::Startup)
        } else {
            None
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Fire the periodic trigger if it is due and re-arm it.
    ///
    /// The next deadline is counted from the previous one, not from `now`;
    /// ticks missed while a long cycle was running are skipped.
    pub fn poll(&mut self, now: Instant) -> Option<Trigger> {
        let (interval, due) = (self.interval?, self.next_due?);
        if now < due {
            return None;
        }
        let mut next = due.checked_add(interval);
        while let Some(due) = next.filter(|due| *due <= now) {
            next = due.checked_add(interval);
        }
        if next.is_none() {
            log::warn!("Refresh interval out of range, timer disabled");
            self.interval = None;
        }
        self.next_due = next;
        Some(Trigger::Periodic)
    }

    /// How long the loop may wait for input before the next tick
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }

    /// Human-readable cadence
    pub fn display(&self) -> String {
        match self.interval {
            None => "Timer disabled".to_string(),
            Some(i) if i.as_secs() == 60 => "Every minute".to_string(),
            Some(i) if i.as_secs() % 60 == 0 => format!("Every {} minutes", i.as_secs() / 60),
            Some(i) => format!("Every {} ms", i.as_millis()),
        }
    }
}

/// Drive `on_trigger` until `Quit` arrives, or input closes while the timer
/// is disabled. `Quit` is still handed to `on_trigger` before the loop ends.
/// `on_trigger` returning `Break` also stops the loop.
pub fn run_loop<F>(mut scheduler: Scheduler, actions: Receiver<Action>, mut on_trigger: F)
where
    F: FnMut(Trigger) -> ControlFlow<()>,
{
    if let Some(trigger) = scheduler.take_startup() {
        if on_trigger(trigger).is_break() {
            return;
        }
    }

    let mut input_open = true;
    loop {
        let now = Instant::now();
        if let Some(trigger) = scheduler.poll(now) {
            if on_trigger(trigger).is_break() {
                return;
            }
            if let Some(due) = scheduler.next_deadline() {
                log::debug!(
                    "Next refresh in {}s",
                    due.saturating_duration_since(Instant::now()).as_secs()
                );
            }
            continue;
        }

        let timeout = scheduler.timeout(now);
        let received = match (input_open, timeout) {
            (true, Some(timeout)) => actions.recv_timeout(timeout),
            (true, None) => actions.recv().map_err(|_| RecvTimeoutError::Disconnected),
            (false, Some(timeout)) => {
                std::thread::sleep(timeout);
                continue;
            }
            (false, None) => return,
        };

        match received {
            Ok(Action::Quit) => {
                let _ = on_trigger(Trigger::Manual(Action::Quit));
                return;
            }
            Ok(action) => {
                if on_trigger(Trigger::Manual(action)).is_break() {
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::debug!("Input closed, continuing on timer only");
                input_open = false;
            }
        }
    }
}
