//! Double-click launch selection.
//!
//! A single launch request starts the game's vendor launcher. When an
//! alternate launcher is configured, the request is held for a short
//! window: a second request for the same game inside the window launches
//! the alternate launcher instead.
//!
//! ```text
//! Idle --click(timeout = 0)--> Idle                      [Primary]
//! Idle --click--> AwaitingSecondClick
//! AwaitingSecondClick --same game, in time--> Idle       [Alternate]
//! AwaitingSecondClick --deadline passed--> Idle          [Primary]
//! ```

use std::time::{Duration, Instant};

use minegate_protocol::GameId;

/// A launch the plugin should perform now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchAction {
    /// Open the game's vendor launcher.
    Primary(GameId),
    /// Open the alternate launcher (MultiMC).
    Alternate(GameId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    AwaitingSecondClick { game: GameId, deadline: Instant },
}

#[derive(Debug)]
pub struct LaunchDebouncer {
    state: State,
}

impl LaunchDebouncer {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Returns `true` while a click waits for its second click or timeout.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::AwaitingSecondClick { .. })
    }

    /// Registers a launch request.
    ///
    /// `timeout` is the double-click window for this game; zero launches
    /// immediately. A click for another game while one is pending fires the
    /// pending launch first.
    pub fn click(&mut self, game: GameId, timeout: Duration, now: Instant) -> Vec<LaunchAction> {
        let mut actions = Vec::new();

        if let State::AwaitingSecondClick {
            game: pending,
            deadline,
        } = self.state
        {
            self.state = State::Idle;
            if pending == game && now < deadline {
                actions.push(LaunchAction::Alternate(game));
                return actions;
            }
            actions.push(LaunchAction::Primary(pending));
        }

        if timeout.is_zero() {
            actions.push(LaunchAction::Primary(game));
        } else {
            self.state = State::AwaitingSecondClick {
                game,
                deadline: now + timeout,
            };
        }
        actions
    }

    /// Fires the pending launch once its window has passed.
    pub fn poll(&mut self, now: Instant) -> Option<LaunchAction> {
        match self.state {
            State::AwaitingSecondClick { game, deadline } if now >= deadline => {
                self.state = State::Idle;
                Some(LaunchAction::Primary(game))
            }
            _ => None,
        }
    }
}

impl Default for LaunchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
