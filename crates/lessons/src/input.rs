/// The state of a key (e.g. pressed, released, repeated)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
    /// The number of 'repeat' cycles a key has been held for. The frequency
    /// of these cycles is operating system dependent.
    Repeated(u16),
}

impl ButtonState {
    /// True for the first press or the release, false for auto-repeat.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        !matches!(self, Self::Repeated(_))
    }
}

/// The keys the lessons react to. Everything else is `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Other(u16),
}

/// A key changing state, as delivered by whatever drives the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub state: ButtonState,
}

impl KeyEvent {
    #[must_use]
    pub const fn pressed(key: Key) -> Self {
        Self {
            key,
            state: ButtonState::Pressed,
        }
    }

    #[must_use]
    pub const fn released(key: Key) -> Self {
        Self {
            key,
            state: ButtonState::Released,
        }
    }

    #[must_use]
    pub const fn repeated(key: Key, count: u16) -> Self {
        Self {
            key,
            state: ButtonState::Repeated(count),
        }
    }
}
