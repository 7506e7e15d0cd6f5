//! In-process publish/subscribe channel for viewer commands.
//!
//! The bus is cheap to clone and may be shared across threads; each
//! [`Subscription`] owns the receiving end of its own queue and is polled
//! from the frame loop, so commands are only ever applied on the thread
//! that renders.

use std::collections::BTreeMap;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::command::{CommandKind, ViewerCommand};

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    by_kind: BTreeMap<CommandKind, Vec<(u64, mpsc::Sender<ViewerCommand>)>>,
}

fn lock(inner: &Mutex<Subscribers>) -> MutexGuard<'_, Subscribers> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared command channel between a host and any number of viewers.
#[derive(Clone, Default)]
pub struct CommandBus {
    inner: Arc<Mutex<Subscribers>>,
}

impl CommandBus {
    /// Bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in one command kind.
    ///
    /// The registration lasts as long as the returned guard.
    #[must_use]
    pub fn subscribe(&self, kind: CommandKind) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let mut subs = lock(&self.inner);
        let id = subs.next_id;
        subs.next_id += 1;
        subs.by_kind.entry(kind).or_default().push((id, tx));
        Subscription {
            id,
            kind,
            rx,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `command` to every current subscriber of its kind.
    ///
    /// Returns how many subscribers received it; zero means the command
    /// was dropped. Each subscriber receives it at most once.
    pub fn dispatch(&self, command: ViewerCommand) -> usize {
        let kind = command.kind();
        let mut subs = lock(&self.inner);
        let Some(list) = subs.by_kind.get_mut(&kind) else {
            log::debug!("bus: no subscriber for '{kind}'");
            return 0;
        };
        list.retain(|(_, tx)| tx.send(command.clone()).is_ok());
        list.len()
    }

    /// Number of live subscriptions to `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: CommandKind) -> usize {
        lock(&self.inner).by_kind.get(&kind).map_or(0, Vec::len)
    }
}

/// Receiving end of one subscription. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    kind: CommandKind,
    rx: mpsc::Receiver<ViewerCommand>,
    bus: Weak<Mutex<Subscribers>>,
}

impl Subscription {
    /// Command kind this subscription receives.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Next queued command, without blocking.
    #[must_use]
    pub fn try_next(&self) -> Option<ViewerCommand> {
        self.rx.try_recv().ok()
    }

    /// All queued commands, oldest first.
    pub fn drain(&self) -> impl Iterator<Item = ViewerCommand> + '_ {
        self.rx.try_iter()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.bus.upgrade() else {
            return;
        };
        let mut subs = lock(&inner);
        if let Some(list) = subs.by_kind.get_mut(&self.kind) {
            list.retain(|(id, _)| *id != self.id);
            if list.is_empty() {
                let _ = subs.by_kind.remove(&self.kind);
            }
        }
        drop(subs);
        let dropped = self.rx.try_iter().count();
        if dropped > 0 {
            log::debug!("bus: {dropped} '{}' command(s) discarded on unsubscribe", self.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_to(region: &str) -> ViewerCommand {
        ViewerCommand::MoveCamera {
            region: region.to_owned(),
        }
    }

    #[test]
    fn routes_by_kind() {
        let bus = CommandBus::new();
        let moves = bus.subscribe(CommandKind::MoveCamera);
        let resizes = bus.subscribe(CommandKind::Resize);

        assert_eq!(bus.dispatch(move_to("front")), 1);
        assert_eq!(bus.dispatch(ViewerCommand::Resize), 1);

        assert_eq!(moves.try_next(), Some(move_to("front")));
        assert_eq!(moves.try_next(), None);
        assert_eq!(resizes.drain().collect::<Vec<_>>(), vec![ViewerCommand::Resize]);
    }

    #[test]
    fn every_subscriber_gets_one_copy() {
        let bus = CommandBus::new();
        let a = bus.subscribe(CommandKind::MoveCamera);
        let b = bus.subscribe(CommandKind::MoveCamera);
        assert_eq!(bus.dispatch(move_to("back")), 2);
        assert_eq!(a.drain().count(), 1);
        assert_eq!(b.drain().count(), 1);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let bus = CommandBus::new();
        let sub = bus.subscribe(CommandKind::ChangeColor);
        assert_eq!(bus.subscriber_count(CommandKind::ChangeColor), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(CommandKind::ChangeColor), 0);
        assert_eq!(
            bus.dispatch(ViewerCommand::ChangeColor {
                part: "A".to_owned(),
                color: "red".to_owned(),
            }),
            0
        );
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
        let bus = CommandBus::new();
        let sub = bus.subscribe(CommandKind::Resize);
        let _ = bus.dispatch(ViewerCommand::Resize);
        drop(bus);
        assert_eq!(sub.try_next(), Some(ViewerCommand::Resize));
        drop(sub);
    }

    #[test]
    fn dispatch_from_another_thread() {
        let bus = CommandBus::new();
        let sub = bus.subscribe(CommandKind::MoveCamera);
        let remote = bus.clone();
        std::thread::spawn(move || {
            let _ = remote.dispatch(move_to("top"));
        })
        .join()
        .unwrap();
        assert_eq!(sub.try_next(), Some(move_to("top")));
    }
}
