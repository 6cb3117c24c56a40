//! Post-solve reconciliation of routes with break nodes.
//!
//! This is a light structural pass: it splices break visits into routes
//! and drops routes that would only contain breaks. It does not check time
//! windows or capacities.

use log::{debug, warn};
use std::collections::HashSet;

use crate::solution::{Solution, Visits};

/// Outcome of [`repair_solution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakRepair {
    /// Routes that contain at least one non-break visit
    pub routes: Vec<Vec<usize>>,
    /// Whether every route of the solution received a break
    pub all_assigned: bool,
    /// Number of routes dropped for containing only breaks
    pub removed: usize,
}

/// Give every route its own break visit.
///
/// Routes are handled in order; each takes the first break index not yet
/// used and gets it inserted at position 1, right after the route's first
/// visit (position 0 for an empty route). When breaks run out the remaining
/// routes are returned unchanged and the flag is `false`. The output always
/// has one entry per input route.
pub fn repair_one_break_per_route<R: Visits>(
    routes: &[R],
    break_indices: &[usize],
) -> (Vec<Vec<usize>>, bool) {
    let mut used: HashSet<usize> = HashSet::with_capacity(break_indices.len());
    let mut final_routes = Vec::with_capacity(routes.len());
    let mut all_ok = true;

    for (route_idx, route) in routes.iter().enumerate() {
        let mut visits = route.visits().to_vec();

        let assigned = break_indices.iter().copied().find(|b| !used.contains(b));

        match assigned {
            Some(brk) => {
                used.insert(brk);
                let pos = if visits.is_empty() { 0 } else { 1 };
                visits.insert(pos, brk);
                debug!("route {}: inserted break {} at {}", route_idx, brk, pos);
            }
            None => {
                all_ok = false;
                warn!("route {}: no unused break left", route_idx);
            }
        }

        final_routes.push(visits);
    }

    (final_routes, all_ok)
}

/// Drop every route whose visits are all break nodes, returning the kept
/// routes and how many were dropped. An empty route counts as break-only.
pub fn remove_break_only_routes(
    routes: Vec<Vec<usize>>,
    break_indices: &[usize],
) -> (Vec<Vec<usize>>, usize) {
    let breaks: HashSet<usize> = break_indices.iter().copied().collect();
    let before = routes.len();

    let kept: Vec<Vec<usize>> = routes
        .into_iter()
        .filter(|route| route.iter().any(|visit| !breaks.contains(visit)))
        .collect();

    let removed = before - kept.len();
    if removed > 0 {
        debug!("removed {} break-only route(s)", removed);
    }

    (kept, removed)
}

/// Insert breaks into a solver solution and drop break-only routes.
pub fn repair_solution(solution: &Solution, break_indices: &[usize]) -> BreakRepair {
    let (routes, all_assigned) =
        repair_one_break_per_route(solution.routes.as_slice(), break_indices);
    let (routes, removed) = remove_break_only_routes(routes, break_indices);

    BreakRepair {
        routes,
        all_assigned,
        removed,
    }
}

/// A route visiting a break node that belongs to a different vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakViolation {
    pub route: usize,
    pub vehicle_type: usize,
    pub visit: usize,
}

/// Find visits to break nodes not owned by the route's vehicle type, where
/// vehicle type `v` owns `break_indices[v]`.
///
/// Meant for instances built by
/// [`add_one_break_per_vehicle`](crate::profiles::add_one_break_per_vehicle),
/// where vehicle types and vehicles coincide.
pub fn break_violations(solution: &Solution, break_indices: &[usize]) -> Vec<BreakViolation> {
    let break_set: HashSet<usize> = break_indices.iter().copied().collect();
    let breaks = &break_set;

    solution
        .routes
        .iter()
        .enumerate()
        .flat_map(|(route_idx, route)| {
            let own = break_indices.get(route.vehicle_type).copied();
            route
                .visits
                .iter()
                .copied()
                .filter(move |visit| breaks.contains(visit) && Some(*visit) != own)
                .map(move |visit| BreakViolation {
                    route: route_idx,
                    vehicle_type: route.vehicle_type,
                    visit,
                })
        })
        .collect()
}
