use std::cell::Cell;
use std::rc::Rc;

/// Lifetime of one mounted view. Requests issued on its behalf hold a
/// `FetchTicket`; results are applied only while the ticket is current.
#[derive(Debug, Clone, Default)]
pub struct ViewLifetime {
    ended: Rc<Cell<bool>>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the view as unmounted. Every outstanding ticket goes stale.
    pub fn end(&self) {
        self.ended.set(true);
    }

    pub fn is_ended(&self) -> bool {
        self.ended.get()
    }

    /// A request channel for one resource of this view.
    pub fn channel(&self) -> FetchChannel {
        FetchChannel {
            lifetime: self.clone(),
            generation: Rc::new(Cell::new(0)),
        }
    }
}

impl PartialEq for ViewLifetime {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ended, &other.ended)
    }
}

/// Orders requests for a single resource: only the most recently issued
/// ticket may apply its result.
#[derive(Debug, Clone)]
pub struct FetchChannel {
    lifetime: ViewLifetime,
    generation: Rc<Cell<u64>>,
}

impl FetchChannel {
    pub fn ticket(&self) -> FetchTicket {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        FetchTicket {
            channel: self.clone(),
            generation,
        }
    }
}

impl PartialEq for FetchChannel {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.generation, &other.generation)
    }
}

#[derive(Debug, Clone)]
pub struct FetchTicket {
    channel: FetchChannel,
    generation: u64,
}

impl FetchTicket {
    pub fn is_current(&self) -> bool {
        !self.channel.lifetime.is_ended() && self.channel.generation.get() == self.generation
    }

    /// Run `apply` only if this ticket is still current. Returns whether it ran.
    pub fn apply<F: FnOnce()>(&self, apply: F) -> bool {
        if self.is_current() {
            apply();
            true
        } else {
            log::debug!("dropping stale response (generation {})", self.generation);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ticket_is_current() {
        let lifetime = ViewLifetime::new();
        let ticket = lifetime.channel().ticket();
        assert!(ticket.is_current());
    }

    #[test]
    fn ending_the_view_stales_all_channels() {
        let lifetime = ViewLifetime::new();
        let dashboard = lifetime.channel().ticket();
        let goals = lifetime.channel().ticket();

        lifetime.end();
        assert!(!dashboard.is_current());
        assert!(!goals.is_current());
    }

    #[test]
    fn newer_request_supersedes_older_one() {
        let channel = ViewLifetime::new().channel();
        let first = channel.ticket();
        let second = channel.ticket();

        let mut applied = Vec::new();
        // completions arrive out of order
        second.apply(|| applied.push("second"));
        first.apply(|| applied.push("first"));
        assert_eq!(applied, vec!["second"]);
    }

    #[test]
    fn channels_of_one_view_are_independent() {
        let lifetime = ViewLifetime::new();
        let overview = lifetime.channel();
        let categories = lifetime.channel();

        let overview_ticket = overview.ticket();
        categories.ticket();
        categories.ticket();
        assert!(overview_ticket.is_current());
    }

    #[test]
    fn clones_share_the_same_lifetime() {
        let lifetime = ViewLifetime::new();
        let copy = lifetime.clone();
        copy.end();
        assert!(lifetime.is_ended());
        assert_eq!(lifetime, copy);
        assert_ne!(lifetime, ViewLifetime::new());
    }
}
