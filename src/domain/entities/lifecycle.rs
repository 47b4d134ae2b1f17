use std::fmt;

/// Connectivity of the bot identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Offline,
    Online,
}

impl Connectivity {
    pub fn as_str(&self) -> &str {
        match self {
            Connectivity::Offline => "offline",
            Connectivity::Online => "online",
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presence shown next to the bot's name on the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    pub activity: String,
    pub banner: String,
}

impl Presence {
    pub fn new(activity: impl Into<String>, banner: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            banner: banner.into(),
        }
    }
}

/// What a lifecycle event did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    FirstConnect,
    Reconnected,
    Disconnected,
    Unchanged,
}

/// Online/offline status plus the presence last applied
#[derive(Debug, Clone, Default)]
pub struct LifecycleState {
    connectivity: Connectivity,
    presence: Option<Presence>,
    ready_count: u32,
}

impl LifecycleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn is_online(&self) -> bool {
        self.connectivity == Connectivity::Online
    }

    pub fn presence(&self) -> Option<&Presence> {
        self.presence.as_ref()
    }

    /// Number of `ready` events seen over the process lifetime
    pub fn ready_count(&self) -> u32 {
        self.ready_count
    }

    /// Platform reported the session ready. Presence is re-applied every time.
    pub fn on_ready(&mut self, presence: Presence) -> Transition {
        let transition = match self.connectivity {
            Connectivity::Offline => Transition::FirstConnect,
            Connectivity::Online => Transition::Reconnected,
        };
        self.connectivity = Connectivity::Online;
        self.presence = Some(presence);
        self.ready_count += 1;
        transition
    }

    pub fn on_disconnect(&mut self) -> Transition {
        match self.connectivity {
            Connectivity::Online => {
                self.connectivity = Connectivity::Offline;
                Transition::Disconnected
            }
            Connectivity::Offline => Transition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presence() -> Presence {
        Presence::new("online", "Music")
    }

    #[test]
    fn test_starts_offline() {
        let state = LifecycleState::new();
        assert_eq!(state.connectivity(), Connectivity::Offline);
        assert!(state.presence().is_none());
    }

    #[test]
    fn test_ready_then_ready_then_disconnect() {
        let mut state = LifecycleState::new();

        assert_eq!(state.on_ready(presence()), Transition::FirstConnect);
        assert!(state.is_online());
        assert_eq!(state.presence(), Some(&presence()));

        assert_eq!(state.on_ready(presence()), Transition::Reconnected);
        assert!(state.is_online());
        assert_eq!(state.ready_count(), 2);

        assert_eq!(state.on_disconnect(), Transition::Disconnected);
        assert_eq!(state.connectivity(), Connectivity::Offline);
    }

    #[test]
    fn test_disconnect_while_offline_is_noop() {
        let mut state = LifecycleState::new();
        assert_eq!(state.on_disconnect(), Transition::Unchanged);
        assert!(!state.is_online());
    }

    #[test]
    fn test_ready_after_disconnect_counts_as_connect() {
        let mut state = LifecycleState::new();
        state.on_ready(presence());
        state.on_disconnect();
        assert_eq!(state.on_ready(presence()), Transition::FirstConnect);
    }
}
