//! Which view is mounted, and since when.
//!
//! Every mount and unmount bumps a generation counter. Async work records
//! the [`ViewTicket`] it started under and checks it before writing back;
//! a ticket from an older generation means the view it belongs to is gone.

use std::sync::Mutex;

use tracing::debug;

use crate::state::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    pub view: View,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Mounted {
    view: Option<View>,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct ViewLifecycle {
    mounted: Mutex<Mounted>,
}

impl ViewLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `view`, retiring whatever was mounted before.
    pub fn mount(&self, view: View) -> ViewTicket {
        let mut m = self.mounted.lock().unwrap();
        m.generation += 1;
        m.view = Some(view);
        debug!("mounted {:?} (generation {})", view, m.generation);
        ViewTicket {
            view,
            generation: m.generation,
        }
    }

    /// Unmount the current view, if any. Returns it.
    pub fn unmount(&self) -> Option<View> {
        let mut m = self.mounted.lock().unwrap();
        m.generation += 1;
        m.view.take()
    }

    pub fn current(&self) -> Option<ViewTicket> {
        let m = self.mounted.lock().unwrap();
        m.view.map(|view| ViewTicket {
            view,
            generation: m.generation,
        })
    }

    /// Ticket of the mounted view when it is `view`.
    pub fn ticket(&self, view: View) -> Option<ViewTicket> {
        self.current().filter(|t| t.view == view)
    }

    /// Whether work started under `ticket` may still write its result.
    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        self.current().as_ref() == Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remount_retires_old_tickets() {
        let lifecycle = ViewLifecycle::new();
        let first = lifecycle.mount(View::Catalog);
        assert!(lifecycle.is_current(&first));

        lifecycle.mount(View::Cart);
        let again = lifecycle.mount(View::Catalog);
        assert!(!lifecycle.is_current(&first));
        assert!(lifecycle.is_current(&again));
    }

    #[test]
    fn unmount_retires_everything() {
        let lifecycle = ViewLifecycle::new();
        let t = lifecycle.mount(View::Landing);
        assert_eq!(lifecycle.unmount(), Some(View::Landing));
        assert!(!lifecycle.is_current(&t));
        assert!(lifecycle.current().is_none());
        assert_eq!(lifecycle.unmount(), None);
    }

    #[test]
    fn ticket_only_for_mounted_view() {
        let lifecycle = ViewLifecycle::new();
        assert!(lifecycle.ticket(View::Checkout).is_none());
        let t = lifecycle.mount(View::Checkout);
        assert_eq!(lifecycle.ticket(View::Checkout), Some(t));
        assert!(lifecycle.ticket(View::Cart).is_none());
    }
}
