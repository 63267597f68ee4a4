//! FIFO queue of pending notifications.

use std::collections::VecDeque;

use vitrine_core::Notification;

use crate::flux::{Action, Store, StoreId};

/// Queue of notifications waiting to be shown.
///
/// Reading is destructive: [`NotificationQueueStore::pop`] returns the head
/// of the queue and removes it. A dismissal always reports a change so that
/// subscribers re-read, which pops the next queued entry (or nothing).
#[derive(Debug, Default)]
pub struct NotificationQueueStore {
    queue: VecDeque<Notification>,
}

impl NotificationQueueStore {
    /// Remove and return the oldest pending notification.
    pub fn pop(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    /// The oldest pending notification, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Store for NotificationQueueStore {
    const ID: StoreId = StoreId::NotificationQueue;

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::PushNotification(notification) => {
                self.queue.push_back(notification.clone());
                true
            }
            Action::PopNotification => true,
            _ => false,
        }
    }
}
