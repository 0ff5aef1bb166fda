//! Core data types for the Steiner tree viewer.
//!
//! This module defines the points, edges and solutions exchanged between the
//! canvas, the application state and the external solver service.

use serde::{Deserialize, Serialize};

/// A location in the drawing surface's logical coordinate space.
///
/// Terminal points placed by the user always carry whole-number coordinates,
/// while Steiner points returned by the solver may be fractional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate (grows to the right)
    pub x: f64,
    /// Vertical coordinate (grows downward)
    pub y: f64,
}

impl Point {
    /// Creates a new point at the given logical coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between `self` and `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// An undirected connection between two points of a solution.
///
/// The length is never stored; it is derived from the endpoints on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint
    pub start: Point,
    /// Second endpoint
    pub end: Point,
}

impl Edge {
    /// Creates a new edge between two points.
    ///
    /// # Arguments
    ///
    /// * `start` - The first endpoint
    /// * `end` - The second endpoint
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean length of the edge.
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A Steiner tree returned by the solver for one exact set of terminals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution {
    /// Edges of the tree, in the order the solver returned them
    pub edges: Vec<Edge>,
    /// Extra junction points introduced by the solver (labelled `S1`, `S2`, ...)
    pub steiner_points: Vec<Point>,
    /// Total tree length as reported by the solver; trusted as-is
    pub total_length: f64,
}

impl Solution {
    /// Sum of the derived edge lengths.
    ///
    /// Only used for display next to the solver-reported total; the reported
    /// value is never replaced by this one.
    pub fn summed_edge_length(&self) -> f64 {
        self.edges.iter().map(Edge::length).sum()
    }
}

/// Response body of the solver's `POST /solve` endpoint.
///
/// The echoed `terminal_points` are accepted for completeness but ignored by
/// the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    /// Edges forming the tree
    pub edges: Vec<Edge>,
    /// Total length of all edges
    pub total_length: f64,
    /// Steiner points added by the solver
    #[serde(default)]
    pub steiner_points: Vec<Point>,
    /// Echo of the submitted terminals
    #[serde(default)]
    pub terminal_points: Vec<Point>,
}

impl From<SolveResponse> for Solution {
    fn from(response: SolveResponse) -> Self {
        Self {
            edges: response.edges,
            steiner_points: response.steiner_points,
            total_length: response.total_length,
        }
    }
}
