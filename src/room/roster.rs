use std::collections::HashMap;

use super::types::{ChatUser, UserLabel};

/// Tracks which users the chat service has reported as present.
///
/// Join and update notifications deliver full user records; leave
/// notifications deliver labels only. The server additionally reports an
/// aggregate user count that includes guests never surfaced in the roster,
/// so that count is kept separately from the record map.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    users: HashMap<UserLabel, ChatUser>,
    reported_count: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts newly joined users, replacing any stale record with the
    /// same label.
    pub fn apply_joined(&mut self, users: &[ChatUser]) {
        for user in users {
            self.users.insert(user.label, user.clone());
        }
    }

    /// Applies updated records. Unknown labels are inserted as well; an
    /// update racing ahead of its join must not be lost.
    pub fn apply_updated(&mut self, users: &[ChatUser]) {
        for user in users {
            self.users.insert(user.label, user.clone());
        }
    }

    /// Removes users by label. Labels with no matching record are ignored.
    pub fn apply_left(&mut self, labels: &[UserLabel]) {
        for label in labels {
            self.users.remove(label);
        }
    }

    pub fn set_reported_count(&mut self, count: u64) {
        self.reported_count = count;
    }

    /// Server-reported aggregate count, not the roster map size.
    pub fn reported_count(&self) -> u64 {
        self.reported_count
    }

    pub fn get(&self, label: UserLabel) -> Option<&ChatUser> {
        self.users.get(&label)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn users(&self) -> Vec<ChatUser> {
        self.users.values().cloned().collect()
    }
}
