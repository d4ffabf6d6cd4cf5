use std::{cmp::Reverse, collections::BinaryHeap};

use bitvec::prelude::*;

use crate::shared::time::{self, Time};

/// How a node was reached: the node we came from, the edge we rode and when
/// we boarded it.
#[derive(Debug, Clone, Copy)]
pub struct Parent {
    pub from: u32,
    pub edge: u32,
    pub departure_time: Time,
}

/// Per search scratch tables, dropped when the search returns.
#[derive(Debug)]
pub struct State {
    /// Best known arrival at each node. Only ever lowered.
    pub arrival: Vec<Time>,
    pub parents: Vec<Option<Parent>>,
    /// Nodes whose arrival is final.
    pub settled: BitVec<usize, Lsb0>,
    /// Candidates keyed by arrival then node index, so equal arrivals settle
    /// in node order.
    queue: BinaryHeap<Reverse<(Time, u32)>>,
}

impl State {
    pub fn new(node_count: usize) -> Self {
        Self {
            arrival: vec![time::INFINITY; node_count],
            parents: vec![None; node_count],
            settled: bitvec!(usize, Lsb0; 0; node_count),
            queue: BinaryHeap::new(),
        }
    }

    pub fn seed(&mut self, node: u32, time: Time) {
        self.arrival[node as usize] = time;
        if time < time::INFINITY {
            self.queue.push(Reverse((time, node)));
        }
    }

    /// Pops the unsettled node with the smallest arrival, skipping stale
    /// queue entries.
    pub fn pop(&mut self) -> Option<(u32, Time)> {
        while let Some(Reverse((time, node))) = self.queue.pop() {
            if self.settled[node as usize] || time > self.arrival[node as usize] {
                continue;
            }
            return Some((node, time));
        }
        None
    }

    pub fn settle(&mut self, node: u32) {
        self.settled.set(node as usize, true);
    }

    pub fn is_settled(&self, node: u32) -> bool {
        self.settled[node as usize]
    }

    /// Records `candidate` if it strictly improves on the best arrival at `node`.
    pub fn relax(&mut self, node: u32, candidate: Time, parent: Parent) -> bool {
        if candidate < self.arrival[node as usize] {
            self.arrival[node as usize] = candidate;
            self.parents[node as usize] = Some(parent);
            self.queue.push(Reverse((candidate, node)));
            true
        } else {
            false
        }
    }
}

#[test]
fn equal_arrivals_pop_in_node_order() {
    let mut state = State::new(3);
    let parent = Parent {
        from: 0,
        edge: 0,
        departure_time: Time::ZERO,
    };
    state.seed(0, Time::ZERO);
    assert_eq!(state.pop(), Some((0, Time::ZERO)));
    state.settle(0);
    state.relax(2, 5.0.into(), parent);
    state.relax(1, 5.0.into(), parent);
    assert_eq!(state.pop().map(|(node, _)| node), Some(1));
    state.settle(1);
    assert_eq!(state.pop().map(|(node, _)| node), Some(2));
}

#[test]
fn relax_never_raises_arrival() {
    let mut state = State::new(2);
    let parent = Parent {
        from: 0,
        edge: 0,
        departure_time: Time::ZERO,
    };
    assert!(state.relax(1, 10.0.into(), parent));
    assert!(!state.relax(1, 12.0.into(), parent));
    assert!(!state.relax(1, 10.0.into(), parent));
    assert_eq!(state.arrival[1], Time::from_seconds(10.0));
}

#[test]
fn stale_entries_are_skipped() {
    let mut state = State::new(2);
    let parent = Parent {
        from: 0,
        edge: 0,
        departure_time: Time::ZERO,
    };
    state.relax(1, 10.0.into(), parent);
    state.relax(1, 4.0.into(), parent);
    assert_eq!(state.pop(), Some((1, Time::from_seconds(4.0))));
    state.settle(1);
    assert_eq!(state.pop(), None);
}
