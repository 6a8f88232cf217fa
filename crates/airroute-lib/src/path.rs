//! Hop-bounded shortest path search.
//!
//! Every partial route is a label carrying its cumulative distance and hop
//! count. Labels are expanded breadth-first from a FIFO queue, and each
//! airport keeps a Pareto frontier over `(hops, distance)`: a new label is
//! only admitted when no active label at the same airport is at least as
//! good in both dimensions, and admitting it retires every active label it
//! dominates. Retired labels are never expanded.
//!
//! Keeping labels with more distance but fewer hops matters because the hop
//! ceiling can make the shorter partial route a dead end.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::GraphStore;

/// Default ceiling on connecting flights per itinerary.
pub const MAX_HOPS: usize = 4;

/// One airport on an itinerary with the distance flown so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryStop {
    #[serde(rename = "iata")]
    pub code: String,
    pub name: String,
    /// Cumulative distance from the source in kilometres.
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

/// Ordered list of stops from source to destination.
///
/// Either empty (no qualifying route) or at least two stops long.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Itinerary {
    stops: Vec<ItineraryStop>,
}

impl Itinerary {
    pub fn stops(&self) -> &[ItineraryStop] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Number of flights in the itinerary.
    pub fn hop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    pub fn total_distance_km(&self) -> f64 {
        self.stops.last().map(|stop| stop.distance_km).unwrap_or(0.0)
    }

    pub fn codes(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| stop.code.as_str()).collect()
    }
}

type LabelId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Predecessor {
    Root,
    Link(LabelId),
}

#[derive(Debug, Clone, Copy)]
struct SearchLabel<'g> {
    airport: &'g str,
    distance: f64,
    hops: usize,
    predecessor: Predecessor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dominance {
    /// The candidate is at least as good as the existing label.
    Candidate,
    /// The existing label is at least as good as the candidate.
    Existing,
    Incomparable,
}

fn compare(existing: &SearchLabel<'_>, candidate: &SearchLabel<'_>) -> Dominance {
    if existing.hops >= candidate.hops && existing.distance >= candidate.distance {
        return Dominance::Candidate;
    }

    if existing.hops <= candidate.hops && existing.distance <= candidate.distance {
        return Dominance::Existing;
    }

    Dominance::Incomparable
}

/// Per-call search bookkeeping. Labels live in an arena and refer to their
/// predecessor by index.
#[derive(Debug, Default)]
struct SearchState<'g> {
    labels: Vec<SearchLabel<'g>>,
    active: Vec<bool>,
    frontiers: HashMap<&'g str, Vec<LabelId>>,
    queue: VecDeque<LabelId>,
    pruned: usize,
}

impl<'g> SearchState<'g> {
    fn seed(airport: &'g str) -> Self {
        let mut state = Self::default();
        state.admit(SearchLabel {
            airport,
            distance: 0.0,
            hops: 0,
            predecessor: Predecessor::Root,
        });
        state
    }

    /// Apply the admission rule. Returns the new label id when admitted.
    fn admit(&mut self, candidate: SearchLabel<'g>) -> Option<LabelId> {
        let frontier = self.frontiers.entry(candidate.airport).or_default();

        let mut index = 0;
        while index < frontier.len() {
            let existing = frontier[index];
            match compare(&self.labels[existing], &candidate) {
                Dominance::Candidate => {
                    frontier.remove(index);
                    self.active[existing] = false;
                    self.pruned += 1;
                }
                Dominance::Existing => return None,
                Dominance::Incomparable => index += 1,
            }
        }

        let id = self.labels.len();
        self.labels.push(candidate);
        self.active.push(true);
        frontier.push(id);
        self.queue.push_back(id);

        debug_assert!(is_pareto(&self.labels, frontier));
        Some(id)
    }

    /// Dequeue the next label that has not been retired.
    fn next(&mut self) -> Option<LabelId> {
        while let Some(id) = self.queue.pop_front() {
            if self.active[id] {
                return Some(id);
            }
        }
        None
    }

    fn path_codes(&self, id: LabelId) -> Vec<&'g str> {
        let mut codes = Vec::new();
        let mut current = id;
        loop {
            let label = &self.labels[current];
            codes.push(label.airport);
            match label.predecessor {
                Predecessor::Root => break,
                Predecessor::Link(previous) => current = previous,
            }
        }
        codes.reverse();
        codes
    }
}

/// No label in the frontier is at least as good as another in both hops and
/// distance.
fn is_pareto(labels: &[SearchLabel<'_>], frontier: &[LabelId]) -> bool {
    frontier.iter().enumerate().all(|(i, &a)| {
        frontier.iter().skip(i + 1).all(|&b| {
            let (a, b) = (&labels[a], &labels[b]);
            let a_covers_b = a.hops <= b.hops && a.distance <= b.distance;
            let b_covers_a = b.hops <= a.hops && b.distance <= a.distance;
            !a_covers_b && !b_covers_a
        })
    })
}

/// Least-distance search over a read-only [`GraphStore`].
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'g> {
    graph: &'g GraphStore,
    max_hops: usize,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g GraphStore) -> Self {
        Self {
            graph,
            max_hops: MAX_HOPS,
        }
    }

    /// Override the number of connecting flights allowed per itinerary.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Find the least-distance itinerary from `source` to `destination`
    /// using at most `max_hops` flights.
    ///
    /// Codes must already be normalised to the case used by the graph. An
    /// empty itinerary means no qualifying route exists; this includes
    /// `source == destination`.
    pub fn find_shortest_path(&self, source: &str, destination: &str) -> Result<Itinerary> {
        let Some(source_vertex) = self.graph.vertex(source) else {
            return Err(Error::airport_not_found(source));
        };
        if !self.graph.has_vertex(destination) {
            return Err(Error::airport_not_found(destination));
        }

        let mut state = SearchState::seed(source_vertex.airport.code.as_str());
        let mut completed = Vec::new();

        while let Some(id) = state.next() {
            let label = state.labels[id];

            if label.airport == destination {
                completed.push(id);
                continue;
            }

            if label.hops >= self.max_hops {
                continue;
            }

            for connection in self.graph.connections(label.airport) {
                state.admit(SearchLabel {
                    airport: connection.target.as_str(),
                    distance: label.distance + connection.distance_km,
                    hops: label.hops + 1,
                    predecessor: Predecessor::Link(id),
                });
            }
        }

        debug!(
            source,
            destination,
            labels = state.labels.len(),
            pruned = state.pruned,
            candidates = completed.len(),
            "route search finished"
        );

        Ok(select_best(&state, &completed)
            .map(|id| self.reconstruct(&state, id))
            .unwrap_or_default())
    }

    fn reconstruct(&self, state: &SearchState<'g>, id: LabelId) -> Itinerary {
        let mut stops = Vec::new();
        let mut current = id;
        loop {
            let label = &state.labels[current];
            let name = self
                .graph
                .airport(label.airport)
                .map(|airport| airport.name.clone())
                .unwrap_or_default();
            stops.push(ItineraryStop {
                code: label.airport.to_string(),
                name,
                distance_km: label.distance,
            });

            match label.predecessor {
                Predecessor::Root => break,
                Predecessor::Link(previous) => current = previous,
            }
        }
        stops.reverse();

        // The root label alone (source == destination) is not an itinerary.
        if stops.len() < 2 {
            return Itinerary::default();
        }

        Itinerary { stops }
    }
}

/// Pick the completed label with the least distance; ties go to fewer hops,
/// then to the lexicographically smallest sequence of airport codes.
fn select_best(state: &SearchState<'_>, completed: &[LabelId]) -> Option<LabelId> {
    completed.iter().copied().min_by(|&a, &b| {
        let (la, lb) = (&state.labels[a], &state.labels[b]);
        la.distance
            .total_cmp(&lb.distance)
            .then_with(|| la.hops.cmp(&lb.hops))
            .then_with(|| compare_paths(state, a, b))
    })
}

fn compare_paths(state: &SearchState<'_>, a: LabelId, b: LabelId) -> Ordering {
    state.path_codes(a).cmp(&state.path_codes(b))
}

/// Find the least-distance itinerary with the default hop ceiling.
pub fn find_shortest_path(
    graph: &GraphStore,
    source: &str,
    destination: &str,
) -> Result<Itinerary> {
    PathFinder::new(graph).find_shortest_path(source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(airport: &str, hops: usize, distance: f64) -> SearchLabel<'_> {
        SearchLabel {
            airport,
            distance,
            hops,
            predecessor: Predecessor::Root,
        }
    }

    fn frontier_of(state: &SearchState<'_>, airport: &str) -> Vec<(usize, f64)> {
        state
            .frontiers
            .get(airport)
            .map(|ids| {
                ids.iter()
                    .map(|&id| (state.labels[id].hops, state.labels[id].distance))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn dominance_follows_hops_and_distance() {
        let existing = label("X", 2, 10.0);
        assert_eq!(compare(&existing, &label("X", 2, 10.0)), Dominance::Candidate);
        assert_eq!(compare(&existing, &label("X", 2, 9.0)), Dominance::Candidate);
        assert_eq!(compare(&existing, &label("X", 1, 10.0)), Dominance::Candidate);
        assert_eq!(compare(&existing, &label("X", 2, 11.0)), Dominance::Existing);
        assert_eq!(compare(&existing, &label("X", 3, 10.0)), Dominance::Existing);
        assert_eq!(compare(&existing, &label("X", 3, 9.0)), Dominance::Incomparable);
        assert_eq!(compare(&existing, &label("X", 1, 11.0)), Dominance::Incomparable);
    }

    #[test]
    fn first_label_is_always_admitted() {
        let mut state = SearchState::seed("SRC");
        assert!(state.admit(label("X", 1, 50.0)).is_some());
        assert_eq!(frontier_of(&state, "X"), vec![(1, 50.0)]);
    }

    #[test]
    fn dominated_candidate_is_discarded() {
        let mut state = SearchState::seed("SRC");
        state.admit(label("X", 1, 50.0));
        assert!(state.admit(label("X", 2, 60.0)).is_none());
        assert!(state.admit(label("X", 1, 70.0)).is_none());
        assert_eq!(frontier_of(&state, "X"), vec![(1, 50.0)]);
    }

    #[test]
    fn dominating_candidate_retires_existing_labels() {
        let mut state = SearchState::seed("SRC");
        let first = state.admit(label("X", 2, 50.0)).unwrap();
        let second = state.admit(label("X", 3, 40.0)).unwrap();
        let winner = state.admit(label("X", 2, 30.0)).unwrap();

        assert_eq!(frontier_of(&state, "X"), vec![(2, 30.0)]);
        assert!(!state.active[first]);
        assert!(!state.active[second]);
        assert!(state.active[winner]);
        assert_eq!(state.pruned, 2);
    }

    #[test]
    fn retired_labels_are_never_dequeued() {
        let mut state = SearchState::seed("SRC");
        let root = state.next().unwrap();
        assert_eq!(root, 0);

        let retired = state.admit(label("X", 1, 50.0)).unwrap();
        let kept = state.admit(label("X", 1, 40.0)).unwrap();

        assert_eq!(state.next(), Some(kept));
        assert_eq!(state.next(), None);
        assert!(!state.active[retired]);
        assert!(!state.frontiers["X"].contains(&retired));
    }

    #[test]
    fn incomparable_labels_coexist_and_stay_pareto() {
        let mut state = SearchState::seed("SRC");
        state.admit(label("X", 1, 100.0));
        state.admit(label("X", 2, 60.0));
        state.admit(label("X", 3, 30.0));
        state.admit(label("X", 4, 35.0));
        state.admit(label("X", 2, 55.0));

        let frontier = &state.frontiers["X"];
        assert_eq!(frontier.len(), 3);
        assert!(is_pareto(&state.labels, frontier));
        assert_eq!(
            frontier_of(&state, "X"),
            vec![(1, 100.0), (3, 30.0), (2, 55.0)]
        );
    }

    #[test]
    fn tie_break_prefers_fewer_hops_then_codes() {
        let mut state = SearchState::default();
        let root = state.admit(label("AAA", 0, 0.0)).unwrap();
        let via_c = state.labels.len();
        state.labels.push(SearchLabel {
            airport: "CCC",
            distance: 5.0,
            hops: 1,
            predecessor: Predecessor::Link(root),
        });
        let via_b = state.labels.len();
        state.labels.push(SearchLabel {
            airport: "BBB",
            distance: 5.0,
            hops: 1,
            predecessor: Predecessor::Link(root),
        });
        let end_c = state.labels.len();
        state.labels.push(SearchLabel {
            airport: "DDD",
            distance: 10.0,
            hops: 2,
            predecessor: Predecessor::Link(via_c),
        });
        let end_b = state.labels.len();
        state.labels.push(SearchLabel {
            airport: "DDD",
            distance: 10.0,
            hops: 2,
            predecessor: Predecessor::Link(via_b),
        });
        let direct = state.labels.len();
        state.labels.push(SearchLabel {
            airport: "DDD",
            distance: 10.0,
            hops: 1,
            predecessor: Predecessor::Link(root),
        });

        assert_eq!(select_best(&state, &[end_c, end_b]), Some(end_b));
        assert_eq!(select_best(&state, &[end_c, end_b, direct]), Some(direct));
        assert_eq!(select_best(&state, &[]), None);
    }
}
