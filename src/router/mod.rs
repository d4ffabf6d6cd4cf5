mod itinerary;
mod state;

pub use itinerary::*;
pub use state::*;

use crate::{
    graph::Graph,
    shared::time::{Duration, Time},
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Start node {0} does not match any entry")]
    UnknownStart(String),
    #[error("End node {0} does not match any entry")]
    UnknownEnd(String),
    #[error("Departure time is not a number")]
    InvalidDepartureTime,
}

/// Earliest arrival search over a time dependent graph.
///
/// Rides with a scheduled departure make the traveller wait for it, rides
/// without one and transfers can be taken immediately. Among nodes with equal
/// arrival times the one listed first in the graph is settled first, which
/// decides the path when several are optimal.
pub struct Router<'a> {
    graph: &'a Graph,
    from: &'a str,
    to: &'a str,
    departure: Time,
    strict: bool,
    ignore_schedules: bool,
}

impl<'a> Router<'a> {
    pub fn new(graph: &'a Graph, from: &'a str, to: &'a str) -> Self {
        Self {
            graph,
            from,
            to,
            departure: Time::ZERO,
            strict: false,
            ignore_schedules: false,
        }
    }

    pub fn departure_at(mut self, departure: Time) -> Self {
        self.departure = departure;
        self
    }

    /// Fail on unknown start or end nodes instead of reporting them as
    /// unreachable.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Treat every edge as usable on arrival, which turns the search into a
    /// plain shortest duration search.
    pub fn ignore_schedules(mut self, ignore_schedules: bool) -> Self {
        self.ignore_schedules = ignore_schedules;
        self
    }

    pub fn solve(self) -> Result<Itinerary, self::Error> {
        debug!("Searching earliest arrival from {} to {}", self.from, self.to);
        if self.departure.is_nan() {
            return Err(Error::InvalidDepartureTime);
        }

        let start = self.graph.node_index(self.from);
        let end = self.graph.node_index(self.to);
        if self.strict {
            if start.is_none() {
                return Err(Error::UnknownStart(self.from.to_string()));
            }
            if end.is_none() {
                return Err(Error::UnknownEnd(self.to.to_string()));
            }
        }

        if self.from == self.to {
            return Ok(Itinerary::trivial(self.from, self.departure));
        }
        let Some(start) = start else {
            return Ok(Itinerary::unreachable(self.from));
        };

        let mut state = State::new(self.graph.len());
        state.seed(start, self.departure);
        while let Some((current, arrival)) = state.pop() {
            if Some(current) == end {
                break;
            }
            state.settle(current);

            for link in self.graph.outgoing(current) {
                if state.is_settled(link.to) {
                    continue;
                }
                let edge = self.graph.edge(link.edge);
                let wait = if self.ignore_schedules {
                    Duration::ZERO
                } else {
                    edge.wait(arrival)
                };
                let departure_time = arrival + wait;
                let candidate = departure_time + edge.duration;
                state.relax(
                    link.to,
                    candidate,
                    Parent {
                        from: current,
                        edge: link.edge,
                        departure_time,
                    },
                );
            }
        }

        match end {
            Some(end) => Ok(Itinerary::backtrack(self.graph, &state, self.from, end)),
            None => Ok(Itinerary::unreachable(self.from)),
        }
    }
}

/// Earliest arrival at `end` when leaving `start` no earlier than `start_time`.
///
/// Unknown ids and unreachable destinations are reported through
/// [`Itinerary::total`] rather than as errors.
pub fn earliest_arrival(
    graph: &Graph,
    start: &str,
    end: &str,
    start_time: Time,
) -> Result<Itinerary, self::Error> {
    graph.router(start, end).departure_at(start_time).solve()
}
