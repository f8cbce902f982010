//! Active-file tracking state machine.
//!
//! The tracker never touches a clock or a store. Hosts feed it [`Message`]s
//! (focus changes, timer ticks, resets) and execute the [`Effect`]s it
//! returns.

/// Default session length before a break reminder: 25 minutes.
pub const DEFAULT_BREAK_THRESHOLD_SECONDS: u64 = 1500;

/// When to raise break reminders during a continuous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPolicy {
    /// Session seconds at which the reminder fires. Zero disables reminders.
    pub threshold_seconds: u64,

    /// Fire again at every multiple of the threshold instead of only once.
    pub repeat: bool,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            threshold_seconds: DEFAULT_BREAK_THRESHOLD_SECONDS,
            repeat: false,
        }
    }
}

impl BreakPolicy {
    fn is_due(&self, elapsed_seconds: u64, reminded: bool) -> bool {
        if self.threshold_seconds == 0 || elapsed_seconds == 0 {
            return false;
        }
        if self.repeat {
            elapsed_seconds % self.threshold_seconds == 0
        } else {
            !reminded && elapsed_seconds == self.threshold_seconds
        }
    }
}

/// A continuous viewing session of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Path of the file being timed.
    pub path: String,

    /// Stored total when the session started (or zero after a reset).
    pub baseline_seconds: u64,

    /// Seconds elapsed since the session started.
    pub elapsed_seconds: u64,

    /// Whether the break reminder already fired in this session.
    pub reminded: bool,
}

impl Session {
    fn new(path: String, baseline_seconds: u64) -> Self {
        Self {
            path,
            baseline_seconds,
            elapsed_seconds: 0,
            reminded: false,
        }
    }

    /// Cumulative total for the session's file.
    pub const fn total_seconds(&self) -> u64 {
        self.baseline_seconds.saturating_add(self.elapsed_seconds)
    }
}

/// Tracker state: either nothing is timed or exactly one file is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrackerState {
    #[default]
    Idle,
    Tracking(Session),
}

/// Inputs to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The editor's active file changed. `stored_seconds` is the store's
    /// current total for `path` and becomes the session baseline.
    FocusChanged {
        path: Option<String>,
        stored_seconds: u64,
    },

    /// One second elapsed on the tracking timer.
    Tick,

    /// The user reset a file's total to zero.
    Reset { path: String },
}

/// Instructions for the driver, executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start (or restart) the one-second timer.
    StartTimer,

    /// Stop the one-second timer.
    CancelTimer,

    /// Write `total_seconds` for `path` to the store.
    Persist { path: String, total_seconds: u64 },

    /// Dependent views should recompute.
    RefreshViews,

    /// The session crossed the break threshold.
    BreakReminder { path: String, elapsed_seconds: u64 },
}

impl TrackerState {
    /// Path of the file being timed, if any.
    pub fn active_path(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Tracking(session) => Some(&session.path),
        }
    }

    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Idle => None,
            Self::Tracking(session) => Some(session),
        }
    }

    /// Applies `message` and returns the next state with the effects to run.
    pub fn transition(self, message: Message, policy: &BreakPolicy) -> (Self, Vec<Effect>) {
        match message {
            Message::FocusChanged {
                path: Some(path),
                stored_seconds,
            } => self.focus(path, stored_seconds),
            Message::FocusChanged { path: None, .. } => self.blur(),
            Message::Tick => self.tick(policy),
            Message::Reset { path } => self.reset(path),
        }
    }

    fn focus(self, path: String, stored_seconds: u64) -> (Self, Vec<Effect>) {
        if self.active_path() == Some(path.as_str()) {
            return (self, Vec::new());
        }

        let mut effects = Vec::with_capacity(3);
        if matches!(self, Self::Tracking(_)) {
            effects.push(Effect::CancelTimer);
        }
        effects.push(Effect::StartTimer);
        effects.push(Effect::RefreshViews);

        (Self::Tracking(Session::new(path, stored_seconds)), effects)
    }

    fn blur(self) -> (Self, Vec<Effect>) {
        match self {
            Self::Idle => (Self::Idle, Vec::new()),
            Self::Tracking(_) => (Self::Idle, vec![Effect::CancelTimer, Effect::RefreshViews]),
        }
    }

    fn tick(self, policy: &BreakPolicy) -> (Self, Vec<Effect>) {
        let Self::Tracking(mut session) = self else {
            return (Self::Idle, Vec::new());
        };

        session.elapsed_seconds += 1;
        let mut effects = vec![
            Effect::Persist {
                path: session.path.clone(),
                total_seconds: session.total_seconds(),
            },
            Effect::RefreshViews,
        ];

        if policy.is_due(session.elapsed_seconds, session.reminded) {
            session.reminded = true;
            effects.push(Effect::BreakReminder {
                path: session.path.clone(),
                elapsed_seconds: session.elapsed_seconds,
            });
        }

        (Self::Tracking(session), effects)
    }

    fn reset(self, path: String) -> (Self, Vec<Effect>) {
        let state = match self {
            Self::Tracking(session) if session.path == path => {
                // Keep the timer running; the session restarts from zero.
                Self::Tracking(Session::new(session.path, 0))
            }
            other => other,
        };

        (
            state,
            vec![
                Effect::Persist {
                    path,
                    total_seconds: 0,
                },
                Effect::RefreshViews,
            ],
        )
    }
}

/// Owns the tracker state together with its break policy.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    state: TrackerState,
    policy: BreakPolicy,
}

impl Tracker {
    pub fn new(policy: BreakPolicy) -> Self {
        Self {
            state: TrackerState::Idle,
            policy,
        }
    }

    /// Applies `message` in place and returns the effects to execute.
    pub fn handle(&mut self, message: Message) -> Vec<Effect> {
        let (state, effects) = std::mem::take(&mut self.state).transition(message, &self.policy);
        self.state = state;
        effects
    }

    pub const fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn active_path(&self) -> Option<&str> {
        self.state.active_path()
    }

    pub const fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub const fn policy(&self) -> &BreakPolicy {
        &self.policy
    }
}
