//! Notification records produced when alerts fire

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Alert,
    #[default]
    Info,
    Warning,
    Success,
}

/// A user-visible record created when an alert's condition becomes true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Inbox-assigned identifier, 0 until the notification is stored
    #[serde(default)]
    pub id: u32,
    pub alert_id: Option<u32>,
    pub scenario_id: Option<u32>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,

    /// The originating alert asked for email delivery; sending is the caller's job
    pub send_email: bool,
}

impl Notification {
    pub fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            alert_id: None,
            scenario_id: None,
            notification_type,
            title: title.into(),
            message: message.into(),
            is_read: false,
            created_at,
            send_email: false,
        }
    }
}

/// In-memory notification list for one user
#[derive(Debug, Clone, Default)]
pub struct NotificationInbox {
    notifications: Vec<Notification>,
    next_id: u32,
}

impl NotificationInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a notification, returning the id it was given
    pub fn push(&mut self, mut notification: Notification) -> u32 {
        self.next_id += 1;
        notification.id = self.next_id;
        self.notifications.push(notification);
        self.next_id
    }

    pub fn extend(&mut self, notifications: impl IntoIterator<Item = Notification>) {
        for notification in notifications {
            self.push(notification);
        }
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Mark one notification as read; returns false for an unknown id
    pub fn mark_read(&mut self, id: u32) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                true
            }
            None => false,
        }
    }

    /// Mark everything read, returning how many were unread
    pub fn mark_all_read(&mut self) -> usize {
        let mut marked = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            marked += 1;
        }
        marked
    }

    /// Newest first, in insertion order for equal timestamps
    pub fn newest_first(&self) -> Vec<&Notification> {
        let mut sorted: Vec<&Notification> = self.notifications.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }
}
