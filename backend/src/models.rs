pub use shared::{
    ApiResponse, ArAnchor, Coordinate, Health, Location, LocationRoute, LocationRouteRequest,
    LocationType, NavigateRequest, Navigation, NearbyLocation, NearbyRequest, PathNode, Route,
    RouteRequest, Waypoint,
};
