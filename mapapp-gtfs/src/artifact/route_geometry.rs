use std::collections::{BTreeMap, HashMap, HashSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{ShapeRow, TripRow};

/// the paths a route is drawn with and the stops it serves.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RouteGeometry {
    /// one polyline of [lat, lon] points per distinct shape_id on the route
    pub shapes: Vec<Vec<[f64; 2]>>,
    /// stop_ids in the order first seen in stop_times.txt
    pub stops: Vec<String>,
}

#[derive(Debug, Default)]
struct RouteStops {
    order: Vec<String>,
    seen: HashSet<String>,
}

/// assembles [`RouteGeometry`] for every route referenced by a trip.
///
/// shape paths are joined through trips: a route lists each shape_id its
/// trips use once, in first-seen trip order, and only points of referenced
/// shapes are kept. served stops are joined through the trip index during
/// the stop_times scan.
#[derive(Debug, Default)]
pub struct RouteGeometryBuilder {
    route_shapes: BTreeMap<String, Vec<String>>,
    shape_points: HashMap<String, Vec<(u32, [f64; 2])>>,
    route_stops: HashMap<String, RouteStops>,
}

impl RouteGeometryBuilder {
    pub fn new<'a>(trips: impl IntoIterator<Item = &'a TripRow>) -> RouteGeometryBuilder {
        let mut route_shapes: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut shape_points = HashMap::new();
        for trip in trips {
            let shape_ids = route_shapes.entry(trip.route_id.clone()).or_default();
            if let Some(shape_id) = &trip.shape_id {
                if !shape_ids.contains(shape_id) {
                    shape_ids.push(shape_id.clone());
                }
                shape_points.entry(shape_id.clone()).or_insert_with(Vec::new);
            }
        }
        RouteGeometryBuilder {
            route_shapes,
            shape_points,
            route_stops: HashMap::new(),
        }
    }

    /// true if at least one trip references this shape.
    pub fn wants_shape(&self, shape_id: &str) -> bool {
        self.shape_points.contains_key(shape_id)
    }

    /// keeps a shapes.txt point if its shape is referenced by a trip.
    pub fn observe_shape_point(&mut self, row: &ShapeRow) {
        if let Some(points) = self.shape_points.get_mut(&row.shape_id) {
            points.push((row.shape_pt_sequence, [row.shape_pt_lat, row.shape_pt_lon]));
        }
    }

    /// records that a trip of `route_id` serves `stop_id`.
    pub fn observe_stop(&mut self, route_id: &str, stop_id: &str) {
        if !self.route_stops.contains_key(route_id) {
            self.route_stops
                .insert(route_id.to_string(), RouteStops::default());
        }
        let Some(stops) = self.route_stops.get_mut(route_id) else {
            return;
        };
        if !stops.seen.contains(stop_id) {
            stops.seen.insert(stop_id.to_string());
            stops.order.push(stop_id.to_string());
        }
    }

    /// geometry keyed by route_id. points are ordered by shape_pt_sequence;
    /// a shape without points adds no path.
    pub fn build(self) -> BTreeMap<String, RouteGeometry> {
        let RouteGeometryBuilder {
            route_shapes,
            shape_points,
            mut route_stops,
        } = self;
        let paths: HashMap<String, Vec<[f64; 2]>> = shape_points
            .into_iter()
            .filter(|(_, points)| !points.is_empty())
            .map(|(shape_id, points)| {
                let path = points
                    .into_iter()
                    .sorted_by_key(|(sequence, _)| *sequence)
                    .map(|(_, point)| point)
                    .collect_vec();
                (shape_id, path)
            })
            .collect();

        route_shapes
            .into_iter()
            .map(|(route_id, shape_ids)| {
                let shapes = shape_ids
                    .iter()
                    .filter_map(|shape_id| paths.get(shape_id).cloned())
                    .collect_vec();
                let stops = route_stops
                    .remove(&route_id)
                    .map(|s| s.order)
                    .unwrap_or_default();
                (route_id, RouteGeometry { shapes, stops })
            })
            .collect()
    }
}
