//! Lanes: fixed polylines from the playfield edge to the core.

use glam::Vec2;

use obsidian_core::constants::{CORE_X, CORE_Y};

/// A polyline walked from its first to its last waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<Vec2>,
    length: f32,
}

impl Route {
    /// Build a route. An empty list yields a zero-length route at the origin.
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        let waypoints = if waypoints.is_empty() {
            vec![Vec2::ZERO]
        } else {
            waypoints
        };
        let length = waypoints.windows(2).map(|w| w[0].distance(w[1])).sum();
        Self { waypoints, length }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    pub fn end(&self) -> Vec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Point `distance` along the route, clamped to its ends.
    pub fn point_at(&self, distance: f32) -> Vec2 {
        if distance <= 0.0 {
            return self.start();
        }

        let mut left = distance;
        for segment in self.waypoints.windows(2) {
            let len = segment[0].distance(segment[1]);
            if left <= len {
                if len <= f32::EPSILON {
                    return segment[1];
                }
                return segment[0].lerp(segment[1], left / len);
            }
            left -= len;
        }
        self.end()
    }

    /// Distance left after covering `travelled`.
    pub fn remaining(&self, travelled: f32) -> f32 {
        (self.length - travelled).max(0.0)
    }
}

/// The four lanes of the default map. All end at the core center.
pub fn default_lanes() -> Vec<Route> {
    let core = Vec2::new(CORE_X, CORE_Y);
    vec![
        // West
        Route::new(vec![
            Vec2::new(0.0, 300.0),
            Vec2::new(450.0, 300.0),
            Vec2::new(450.0, 600.0),
            core,
        ]),
        // East
        Route::new(vec![
            Vec2::new(1800.0, 900.0),
            Vec2::new(1350.0, 900.0),
            Vec2::new(1350.0, 600.0),
            core,
        ]),
        // North
        Route::new(vec![
            Vec2::new(1200.0, 0.0),
            Vec2::new(1200.0, 250.0),
            Vec2::new(900.0, 250.0),
            core,
        ]),
        // South
        Route::new(vec![
            Vec2::new(600.0, 1200.0),
            Vec2::new(600.0, 950.0),
            Vec2::new(900.0, 950.0),
            core,
        ]),
    ]
}
