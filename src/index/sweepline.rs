use std::cmp::Ordering;

/// A closed interval `[min, max]` on the sweep axis carrying a payload.
#[derive(Debug, Clone)]
pub struct SweepLineInterval<T> {
    pub min: f64,
    pub max: f64,
    pub item: T,
}

impl<T> SweepLineInterval<T> {
    /// Creates an interval; the bounds are swapped if given out of order.
    #[must_use]
    pub fn new(a: f64, b: f64, item: T) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            item,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Insert,
    Delete,
}

#[derive(Debug, Clone, Copy)]
struct SweepLineEvent {
    x: f64,
    kind: EventKind,
    interval: usize,
    /// For insert events, the position of the matching delete event.
    delete_index: usize,
}

/// Sweep-line index over one-dimensional intervals.
///
/// Each interval contributes an insert event at its minimum and a delete
/// event at its maximum. Events sort by position with inserts ahead of
/// deletes, so intervals that merely touch are still reported as overlapping.
#[derive(Debug)]
pub struct SweepLineIndex<T> {
    intervals: Vec<SweepLineInterval<T>>,
    events: Vec<SweepLineEvent>,
    built: bool,
}

impl<T> Default for SweepLineIndex<T> {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
            events: Vec::new(),
            built: false,
        }
    }
}

impl<T> SweepLineIndex<T> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an interval. Invalidates any previously built event list.
    pub fn add(&mut self, interval: SweepLineInterval<T>) {
        self.intervals.push(interval);
        self.built = false;
    }

    /// Number of intervals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the index holds no intervals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    fn build(&mut self) {
        if self.built {
            return;
        }
        self.events.clear();
        for (i, interval) in self.intervals.iter().enumerate() {
            self.events.push(SweepLineEvent {
                x: interval.min,
                kind: EventKind::Insert,
                interval: i,
                delete_index: 0,
            });
            self.events.push(SweepLineEvent {
                x: interval.max,
                kind: EventKind::Delete,
                interval: i,
                delete_index: 0,
            });
        }
        self.events.sort_by(compare_events);

        // An interval's insert always sorts ahead of its delete.
        let mut insert_at = vec![0; self.intervals.len()];
        for i in 0..self.events.len() {
            let event = self.events[i];
            match event.kind {
                EventKind::Insert => insert_at[event.interval] = i,
                EventKind::Delete => self.events[insert_at[event.interval]].delete_index = i,
            }
        }
        self.built = true;
    }

    /// Invokes `action` once for every pair of overlapping intervals.
    ///
    /// Work is bounded by the number of overlapping pairs plus the number of
    /// events, not by the square of the interval count.
    pub fn compute_overlaps<F>(&mut self, mut action: F)
    where
        F: FnMut(&SweepLineInterval<T>, &SweepLineInterval<T>),
    {
        self.build();
        for (i, event) in self.events.iter().enumerate() {
            if event.kind != EventKind::Insert {
                continue;
            }
            for other in &self.events[i + 1..event.delete_index] {
                if other.kind == EventKind::Insert {
                    action(&self.intervals[event.interval], &self.intervals[other.interval]);
                }
            }
        }
    }
}

fn compare_events(a: &SweepLineEvent, b: &SweepLineEvent) -> Ordering {
    a.x.total_cmp(&b.x).then(a.kind.cmp(&b.kind))
}
