//! Directional input capability consumed by the input watchers.

use std::collections::VecDeque;

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::game::Direction;

/// Something that can be polled for a serpent's current directional intent.
///
/// Polling must not block. Backend failures are reported as "no input".
pub trait DirectionSource: Send + 'static {
    fn poll_direction(&mut self) -> Option<Direction>;
}

/// Source fed by a front-end through a channel, e.g. the keyboard reader
pub struct ChannelSource {
    rx: mpsc::UnboundedReceiver<Direction>,
}

impl ChannelSource {
    pub fn new() -> (mpsc::UnboundedSender<Direction>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

impl DirectionSource for ChannelSource {
    fn poll_direction(&mut self) -> Option<Direction> {
        match self.rx.try_recv() {
            Ok(direction) => Some(direction),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// Pre-recorded inputs, one entry consumed per poll. Exhausted scripts yield nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<Option<Direction>>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Option<Direction>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DirectionSource for ScriptedSource {
    fn poll_direction(&mut self) -> Option<Direction> {
        self.script.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_source() {
        let (tx, mut source) = ChannelSource::new();
        assert_eq!(source.poll_direction(), None);

        tx.send(Direction::Up).unwrap();
        tx.send(Direction::Left).unwrap();
        assert_eq!(source.poll_direction(), Some(Direction::Up));
        assert_eq!(source.poll_direction(), Some(Direction::Left));

        drop(tx);
        assert_eq!(source.poll_direction(), None);
    }

    #[test]
    fn test_scripted_source() {
        let mut source = ScriptedSource::new([None, Some(Direction::Down), None]);
        assert_eq!(source.poll_direction(), None);
        assert_eq!(source.poll_direction(), Some(Direction::Down));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.poll_direction(), None);
        assert_eq!(source.poll_direction(), None);
    }
}
