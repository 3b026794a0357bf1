use crate::error::RouteError;
use crate::geo::distance_meters;
use crate::models::{Coordinate, PathNode, Route, Waypoint};

/// Assumed walking speed, about 4.8 km/h.
pub const WALKING_SPEED_M_PER_MIN: f64 = 80.0;

const INSTRUCTIONS: [&str; 4] = [
    "Start here",
    "Follow the path",
    "Almost there",
    "You have arrived",
];

/// Closest path node to `point` by linear scan. The earliest node wins ties.
pub fn nearest_node(point: Coordinate, nodes: &[PathNode]) -> Option<&PathNode> {
    let mut best: Option<(&PathNode, f64)> = None;
    for node in nodes {
        let dist = distance_meters(point, node.coordinates);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((node, dist)),
        }
    }
    best.map(|(node, _)| node)
}

/// Builds the four-point route start → node nearest start → node nearest end → end.
///
/// Segment lengths are summed unrounded and the total is rounded once to whole
/// meters. Duration is derived from that rounded distance.
pub fn synthesize_route(
    start: Coordinate,
    end: Coordinate,
    nodes: &[PathNode],
) -> Result<Route, RouteError> {
    let near_start = nearest_node(start, nodes).ok_or(RouteError::NoReferenceWaypoints)?;
    let near_end = nearest_node(end, nodes).ok_or(RouteError::NoReferenceWaypoints)?;
    tracing::debug!(
        start_node = %near_start.id,
        end_node = %near_end.id,
        "synthesizing route"
    );

    let points = [start, near_start.coordinates, near_end.coordinates, end];
    let total = path_length_meters(&points);

    let waypoints = points
        .iter()
        .zip(INSTRUCTIONS)
        .map(|(point, instruction)| Waypoint {
            lat: point.lat,
            lng: point.lng,
            instruction: Some(instruction.to_string()),
        })
        .collect();

    let distance = total.round() as u64;
    Ok(Route {
        distance,
        duration: walking_minutes(distance),
        waypoints,
    })
}

/// Whole minutes needed to walk `meters` at [`WALKING_SPEED_M_PER_MIN`].
pub fn walking_minutes(meters: u64) -> u64 {
    (meters as f64 / WALKING_SPEED_M_PER_MIN).round() as u64
}

/// Sum of consecutive great-circle distances, unrounded.
pub fn path_length_meters(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| distance_meters(w[0], w[1])).sum()
}
