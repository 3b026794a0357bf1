use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CampusDataError, RouteError},
    geo::distance_meters,
    models::{
        ArAnchor, Coordinate, Location, LocationRoute, LocationType, NearbyLocation, PathNode,
    },
    routing::synthesize_route,
};

/// Radius used by nearby queries that do not name one.
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 500.0;

static BUILTIN: Lazy<CampusData> = Lazy::new(|| CampusData {
    locations: builtin_locations(),
    path_nodes: builtin_path_nodes(),
});

/// Immutable location and path-node tables, loaded once at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusData {
    pub locations: Vec<Location>,
    #[serde(default)]
    pub path_nodes: Vec<PathNode>,
}

#[derive(Debug, thiserror::Error)]
pub enum LocationRouteError {
    #[error("unknown location {0}")]
    UnknownLocation(String),
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl CampusData {
    /// Pace University Pleasantville campus.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CampusDataError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, CampusDataError> {
        let data: CampusData = serde_json::from_reader(reader)?;
        data.validate()?;
        if data.path_nodes.is_empty() {
            tracing::warn!("campus data has no path nodes; route requests will fail");
        }
        Ok(data)
    }

    /// Checks id uniqueness and that every connection names a known node.
    pub fn validate(&self) -> Result<(), CampusDataError> {
        let mut location_ids = HashSet::new();
        for location in &self.locations {
            if !location_ids.insert(location.id.as_str()) {
                return Err(CampusDataError::DuplicateLocation(location.id.clone()));
            }
        }

        let mut node_ids = HashSet::new();
        for node in &self.path_nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(CampusDataError::DuplicatePathNode(node.id.clone()));
            }
        }

        for node in &self.path_nodes {
            if let Some(target) = node
                .connections
                .iter()
                .find(|target| !node_ids.contains(target.as_str()))
            {
                return Err(CampusDataError::UnknownConnection {
                    node: node.id.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    /// Filters by exact type name and by case-insensitive substring of the
    /// name or description. Empty filters are ignored.
    pub fn search(&self, query: Option<&str>, kind: Option<&str>) -> Vec<&Location> {
        let kind = kind.filter(|k| !k.is_empty());
        let needle = query.filter(|q| !q.is_empty()).map(str::to_lowercase);

        self.locations
            .iter()
            .filter(|loc| kind.map_or(true, |k| loc.kind.as_str() == k))
            .filter(|loc| {
                let Some(needle) = needle.as_deref() else {
                    return true;
                };
                loc.name.to_lowercase().contains(needle)
                    || loc
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle))
            })
            .collect()
    }

    /// Locations within `radius_m` of `point`, closest first.
    pub fn nearby(&self, point: Coordinate, radius_m: f64) -> Vec<NearbyLocation> {
        let mut nearby: Vec<NearbyLocation> = self
            .locations
            .iter()
            .map(|loc| NearbyLocation {
                distance: distance_meters(point, loc.coordinates),
                location: loc.clone(),
            })
            .filter(|n| n.distance <= radius_m)
            .collect();
        nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        nearby
    }

    pub fn route_between(
        &self,
        start_id: &str,
        end_id: &str,
    ) -> Result<LocationRoute, LocationRouteError> {
        let start = self
            .location(start_id)
            .ok_or_else(|| LocationRouteError::UnknownLocation(start_id.to_string()))?;
        let end = self
            .location(end_id)
            .ok_or_else(|| LocationRouteError::UnknownLocation(end_id.to_string()))?;

        let route = synthesize_route(start.coordinates, end.coordinates, &self.path_nodes)?;
        Ok(LocationRoute {
            route,
            start: start.clone(),
            end: end.clone(),
        })
    }
}

fn building(id: &str, name: &str, lat: f64, lng: f64, anchor: [f64; 3]) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        kind: LocationType::Building,
        coordinates: Coordinate::new(lat, lng),
        description: None,
        ar_anchor: Some(ArAnchor {
            x: anchor[0],
            y: anchor[1],
            z: anchor[2],
        }),
    }
}

fn builtin_locations() -> Vec<Location> {
    vec![
        building(
            "goldstein-recreation-center",
            "Ann & Alfred Goldstein Health, Fitness & Recreation Center",
            41.126231,
            -73.8076645,
            [0.0, 0.0, 0.0],
        ),
        building("welcome-center", "Welcome Center", 41.126231, -73.8076645, [5.0, 0.0, 5.0]),
        building("willcox-hall", "Willcox Hall", 41.126231, -73.8076645, [-5.0, 0.0, 10.0]),
        building(
            "goldstein-academic-center",
            "Goldstein Academic Center",
            41.1265495,
            -73.8076576,
            [10.0, 0.0, 15.0],
        ),
        building("north-hall", "North Hall", 41.1270351, -73.8073665, [15.0, 0.0, 20.0]),
        building("miller-hall", "Miller Hall", 41.1271709, -73.8086627, [20.0, 0.0, 25.0]),
        building("lienhard-hall", "Lienhard Hall", 41.1271709, -73.8086627, [22.0, 0.0, 27.0]),
        building("library", "Library", 41.1276482, -73.808836, [25.0, 0.0, 30.0]),
        building(
            "kessel-student-center",
            "Kessel Student Center",
            41.1278519,
            -73.8089191,
            [30.0, 0.0, 30.0],
        ),
        building("choate-house", "Choate House", 41.1292563, -73.8095707, [35.0, 0.0, 35.0]),
        building("elm-hall", "Elm Hall", 41.1290584, -73.8083777, [40.0, 0.0, 40.0]),
        building("martin-hall", "Martin Hall", 41.1291606, -73.8080692, [45.0, 0.0, 45.0]),
        building("alumni-hall", "Alumni Hall", 41.1293248, -73.8084271, [50.0, 0.0, 50.0]),
        building(
            "university-health-care",
            "University Health Care",
            41.1293248,
            -73.8084271,
            [52.0, 0.0, 52.0],
        ),
        building(
            "goldstein-rec-center-top",
            "Ann & Alfred Goldstein Health, Fitness & Recreation Center (Upper)",
            41.1293558,
            -73.8093772,
            [55.0, 0.0, 55.0],
        ),
        building("pace-pool", "Pace Pool", 41.1293558, -73.8093772, [57.0, 0.0, 57.0]),
        building(
            "admissions-office",
            "Office of Undergraduate Admission",
            41.1303482,
            -73.8099331,
            [60.0, 0.0, 60.0],
        ),
        building(
            "finnerty-field",
            "Peter X. Finnerty Field",
            41.1292164,
            -73.8115401,
            [65.0, 0.0, 65.0],
        ),
        building("pace-stadium", "Pace Stadium", 41.1292164, -73.8115401, [67.0, 0.0, 67.0]),
        building(
            "softball-field",
            "Pace Softball Field",
            41.1259319,
            -73.8091405,
            [70.0, 0.0, 70.0],
        ),
        building(
            "school-of-education",
            "School of Education",
            41.1266574,
            -73.8067458,
            [75.0, 0.0, 75.0],
        ),
        building("townhouses", "Townhouses", 41.1317346, -73.8090174, [80.0, 0.0, 80.0]),
    ]
}

fn path_node(id: &str, lat: f64, lng: f64, connections: &[&str]) -> PathNode {
    PathNode {
        id: id.to_string(),
        coordinates: Coordinate::new(lat, lng),
        connections: connections.iter().map(|c| c.to_string()).collect(),
    }
}

fn builtin_path_nodes() -> Vec<PathNode> {
    vec![
        path_node(
            "node-main-entrance",
            41.126231,
            -73.8076645,
            &["node-goldstein-academic", "node-school-education"],
        ),
        path_node(
            "node-goldstein-academic",
            41.1265495,
            -73.8076576,
            &["node-main-entrance", "node-kessel", "node-library"],
        ),
        path_node(
            "node-library",
            41.1276482,
            -73.808836,
            &["node-goldstein-academic", "node-kessel", "node-res-halls"],
        ),
        path_node(
            "node-kessel",
            41.1278519,
            -73.8089191,
            &["node-library", "node-res-halls"],
        ),
        path_node(
            "node-res-halls",
            41.1291606,
            -73.8080692,
            &["node-kessel", "node-townhouses", "node-fields"],
        ),
        path_node("node-townhouses", 41.1317346, -73.8090174, &["node-res-halls"]),
        path_node("node-fields", 41.1292164, -73.8115401, &["node-res-halls"]),
        path_node(
            "node-school-education",
            41.1266574,
            -73.8067458,
            &["node-main-entrance"],
        ),
    ]
}
