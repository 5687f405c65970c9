//! Configuration for a scene session.

/// Configuration for a scene session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// When a previously removed NPC rejoins the party during the same
    /// room visit, forget its introduction marker so the introduction
    /// plays again. Off by default: an introduction is shown at most once
    /// per room visit regardless of party churn.
    pub reintroduce_on_rejoin: bool,
}

impl SessionConfig {
    /// Set whether rejoining party members are reintroduced.
    pub fn with_reintroduce_on_rejoin(mut self, value: bool) -> Self {
        self.reintroduce_on_rejoin = value;
        self
    }
}
