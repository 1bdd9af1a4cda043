//! Facet notifications
//!
//! A small synchronous publish/subscribe registry. Callbacks are grouped by
//! facet and run in subscription order, on the caller's thread, before the
//! publishing call returns.

use std::fmt;

use super::adapter::GameSnapshot;

/// One category of engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    /// Players and their hands
    Player,
    /// The undealt deck
    Deck,
    /// Cards on the table (last played, war pile)
    Game,
    /// Game outcome and game-over flag
    Outcome,
    /// Winner of the last round
    LastRoundWinner,
}

impl Facet {
    /// Every facet, in publishing order
    pub const ALL: [Facet; 5] = [
        Facet::Player,
        Facet::Deck,
        Facet::Game,
        Facet::Outcome,
        Facet::LastRoundWinner,
    ];
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Player => "player",
            Facet::Deck => "deck",
            Facet::Game => "game",
            Facet::Outcome => "outcome",
            Facet::LastRoundWinner => "last-round-winner",
        };
        f.write_str(name)
    }
}

/// Token returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(Facet, &GameSnapshot)>;

struct Subscription {
    id: SubscriptionId,
    /// None = every facet
    facet: Option<Facet>,
    callback: Callback,
}

/// Callback registry
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one facet
    pub fn subscribe<F>(&mut self, facet: Facet, callback: F) -> SubscriptionId
    where
        F: FnMut(Facet, &GameSnapshot) + 'static,
    {
        self.insert(Some(facet), Box::new(callback))
    }

    /// Register a callback for every facet
    pub fn subscribe_all<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(Facet, &GameSnapshot) + 'static,
    {
        self.insert(None, Box::new(callback))
    }

    /// Remove a callback. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Invoke every callback registered for the facet
    pub fn publish(&mut self, facet: Facet, snapshot: &GameSnapshot) -> usize {
        let mut delivered = 0;
        for subscription in &mut self.subscriptions {
            if subscription.facet.is_none() || subscription.facet == Some(facet) {
                (subscription.callback)(facet, snapshot);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    fn insert(&mut self, facet: Option<Facet>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            facet,
            callback,
        });
        id
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.subscriptions.len())
            .finish()
    }
}
