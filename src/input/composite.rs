// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Aggregation of several input devices into one event stream.

use crate::input::{EventSource, RawInputEvent};

/// Presents an ordered list of child sources as a single [`EventSource`].
///
/// Each poll concatenates the children's events in registration order,
/// preserving per-child arrival order. No deduplication is performed: two
/// devices producing the same transition both get forwarded. Children may be
/// added or removed between poll cycles (device hot-plug) without affecting
/// events already drained.
pub(crate) struct CompositeEventSource {
    sources: Vec<Box<dyn EventSource>>,
}

impl CompositeEventSource {
    pub(crate) fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub(crate) fn add_source(&mut self, source: Box<dyn EventSource>) {
        self.sources.push(source);
    }

    pub(crate) fn remove_source(&mut self, index: usize) -> Option<Box<dyn EventSource>> {
        if index < self.sources.len() {
            Some(self.sources.remove(index))
        } else {
            None
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.sources.len()
    }
}

impl EventSource for CompositeEventSource {
    fn poll(&mut self) -> Vec<RawInputEvent> {
        let mut events = Vec::new();
        for source in &mut self.sources {
            events.extend(source.poll());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyCode;

    /// Yields one scripted batch per poll.
    struct ScriptedSource {
        batches: Vec<Vec<RawInputEvent>>,
    }

    impl ScriptedSource {
        fn new(batches: Vec<Vec<RawInputEvent>>) -> Self {
            Self { batches }
        }
    }

    impl EventSource for ScriptedSource {
        fn poll(&mut self) -> Vec<RawInputEvent> {
            if self.batches.is_empty() {
                Vec::new()
            } else {
                self.batches.remove(0)
            }
        }
    }

    fn key(c: char) -> RawInputEvent {
        RawInputEvent::KeyPress(KeyCode::Char(c))
    }

    #[test]
    fn empty_composite_polls_empty() {
        let mut composite = CompositeEventSource::new();
        assert!(composite.poll().is_empty());
    }

    #[test]
    fn preserves_registration_order_across_children() {
        let mut composite = CompositeEventSource::new();
        composite.add_source(Box::new(ScriptedSource::new(vec![vec![
            key('a'),
            key('b'),
        ]])));
        composite.add_source(Box::new(ScriptedSource::new(vec![vec![key('c')]])));

        assert_eq!(composite.poll(), vec![key('a'), key('b'), key('c')]);
        assert!(composite.poll().is_empty());
    }

    #[test]
    fn identical_events_from_two_devices_are_both_forwarded() {
        let mut composite = CompositeEventSource::new();
        composite.add_source(Box::new(ScriptedSource::new(vec![vec![key('a')]])));
        composite.add_source(Box::new(ScriptedSource::new(vec![vec![key('a')]])));

        assert_eq!(composite.poll(), vec![key('a'), key('a')]);
    }

    #[test]
    fn children_can_be_removed_between_polls() {
        let mut composite = CompositeEventSource::new();
        composite.add_source(Box::new(ScriptedSource::new(vec![
            vec![key('a')],
            vec![key('b')],
        ])));
        composite.add_source(Box::new(ScriptedSource::new(vec![
            vec![key('x')],
            vec![key('y')],
        ])));

        assert_eq!(composite.poll(), vec![key('a'), key('x')]);

        composite.remove_source(1);
        assert_eq!(composite.len(), 1);
        assert_eq!(composite.poll(), vec![key('b')]);
    }
}
