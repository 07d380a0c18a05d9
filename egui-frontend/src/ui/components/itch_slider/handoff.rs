//! # Value Commit Hand-off
//!
//! Bounded channel from the gesture side of the slider to whoever owns the
//! form value. Gesture code never blocks on a slow owner: when the channel is
//! full the newest value is held back and delivered by the next flush, so the
//! owner always ends up with the last value the user chose.

use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

pub fn commit_channel(capacity: usize) -> (ValueCommitSender, ValueCommitReceiver) {
    let (sender, receiver) = mpsc::sync_channel(capacity.max(1));
    (
        ValueCommitSender { sender, pending: None },
        ValueCommitReceiver { receiver },
    )
}

pub struct ValueCommitSender {
    sender: SyncSender<u8>,
    pending: Option<u8>,
}

impl ValueCommitSender {
    /// Queue `value` without blocking. Returns false once the owner is gone.
    pub fn commit(&mut self, value: u8) -> bool {
        // Anything still held back is older than `value`
        self.pending = None;
        match self.sender.try_send(value) {
            Ok(()) => true,
            Err(TrySendError::Full(value)) => {
                debug!("Commit channel full, holding back {}", value);
                self.pending = Some(value);
                true
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("Commit receiver dropped, discarding {}", value);
                false
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Retry a held-back value without blocking
    pub fn try_flush(&mut self) -> bool {
        match self.pending.take() {
            Some(value) => self.commit(value),
            None => true,
        }
    }

    /// Deliver a held-back value, waiting for room. Only call this from a
    /// thread other than the one draining the receiver.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(value) => self.sender.send(value).is_ok(),
            None => true,
        }
    }
}

pub struct ValueCommitReceiver {
    receiver: Receiver<u8>,
}

impl ValueCommitReceiver {
    /// Drain everything queued and keep the newest value
    pub fn latest(&self) -> Option<u8> {
        self.receiver.try_iter().last()
    }

    /// Block until the next commit; None once every sender is gone
    pub fn recv(&self) -> Option<u8> {
        self.receiver.recv().ok()
    }
}
