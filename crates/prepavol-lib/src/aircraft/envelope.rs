//! Centre-of-gravity envelope polygon.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::constants::ENVELOPE_EDGE_TOLERANCE;

/// One envelope vertex: centre of gravity (m) and weight (kg).
pub type EnvelopePoint = (f64, f64);

/// Closed, simple polygon of allowable `(cg, weight)` combinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EnvelopePoint>", into = "Vec<EnvelopePoint>")]
pub struct Envelope {
    vertices: Vec<EnvelopePoint>,
}

impl Envelope {
    /// Build an envelope from its vertices in drawing order.
    ///
    /// A trailing vertex equal to the first one is dropped, as are consecutive
    /// repeats.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEnvelope`] when fewer than three distinct
    /// vertices remain, a coordinate is not finite, the polygon has no area,
    /// or two of its edges cross.
    pub fn new(vertices: Vec<EnvelopePoint>) -> Result<Self> {
        if let Some((cg, weight)) = vertices
            .iter()
            .find(|(cg, weight)| !cg.is_finite() || !weight.is_finite())
        {
            return Err(Error::InvalidEnvelope {
                message: format!("vertex ({cg}, {weight}) is not finite"),
            });
        }

        let mut cleaned: Vec<EnvelopePoint> = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            if cleaned.last() != Some(&vertex) {
                cleaned.push(vertex);
            }
        }
        while cleaned.len() > 1 && cleaned.first() == cleaned.last() {
            cleaned.pop();
        }

        if cleaned.len() < 3 {
            return Err(Error::InvalidEnvelope {
                message: format!(
                    "at least 3 distinct vertices are required, got {}",
                    cleaned.len()
                ),
            });
        }

        let envelope = Self { vertices: cleaned };
        if envelope.signed_area().abs() <= f64::EPSILON * envelope.scale().powi(2) {
            return Err(Error::InvalidEnvelope {
                message: "polygon has zero area".to_string(),
            });
        }
        if let Some((a, b)) = envelope.crossing_edges() {
            return Err(Error::InvalidEnvelope {
                message: format!("edges {a} and {b} intersect"),
            });
        }

        Ok(envelope)
    }

    /// Vertices in drawing order, without the closing vertex.
    pub fn vertices(&self) -> &[EnvelopePoint] {
        &self.vertices
    }

    /// Vertices with the first one repeated at the end, ready to be drawn as a closed line.
    pub fn closed_outline(&self) -> Vec<EnvelopePoint> {
        let mut outline = self.vertices.clone();
        outline.extend(self.vertices.first().copied());
        outline
    }

    /// Whether `(cg, weight)` lies inside the envelope or on its boundary.
    pub fn contains(&self, cg: f64, weight: f64) -> bool {
        if !cg.is_finite() || !weight.is_finite() {
            return false;
        }
        let tolerance = ENVELOPE_EDGE_TOLERANCE * self.scale();
        if self
            .edges()
            .any(|(a, b)| distance_to_segment((cg, weight), a, b) <= tolerance)
        {
            return true;
        }

        // Even-odd ray casting towards +cg.
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.1 > weight) != (b.1 > weight) {
                let crossing = a.0 + (weight - a.1) * (b.0 - a.0) / (b.1 - a.1);
                if cg < crossing {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Area enclosed by the envelope, in m·kg.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    fn edges(&self) -> impl Iterator<Item = (EnvelopePoint, EnvelopePoint)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
            .sum::<f64>()
            / 2.0
    }

    /// Largest bounding-box side, used to scale tolerances.
    fn scale(&self) -> f64 {
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in &self.vertices {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        (max_x - min_x).max(max_y - min_y).max(1.0)
    }

    fn crossing_edges(&self) -> Option<(usize, usize)> {
        let n = self.vertices.len();
        let edges: Vec<_> = self.edges().collect();
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                let (p1, p2) = edges[i];
                let (q1, q2) = edges[j];
                if segments_intersect(p1, p2, q1, q2) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

impl TryFrom<Vec<EnvelopePoint>> for Envelope {
    type Error = Error;

    fn try_from(vertices: Vec<EnvelopePoint>) -> Result<Self> {
        Self::new(vertices)
    }
}

impl From<Envelope> for Vec<EnvelopePoint> {
    fn from(envelope: Envelope) -> Self {
        envelope.vertices
    }
}

fn cross(o: EnvelopePoint, a: EnvelopePoint, b: EnvelopePoint) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn on_segment(p: EnvelopePoint, a: EnvelopePoint, b: EnvelopePoint) -> bool {
    p.0 >= a.0.min(b.0) && p.0 <= a.0.max(b.0) && p.1 >= a.1.min(b.1) && p.1 <= a.1.max(b.1)
}

fn segments_intersect(
    p1: EnvelopePoint,
    p2: EnvelopePoint,
    q1: EnvelopePoint,
    q2: EnvelopePoint,
) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(p1, q1, q2))
        || (d2 == 0.0 && on_segment(p2, q1, q2))
        || (d3 == 0.0 && on_segment(q1, p1, p2))
        || (d4 == 0.0 && on_segment(q2, p1, p2))
}

fn distance_to_segment(p: EnvelopePoint, a: EnvelopePoint, b: EnvelopePoint) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    (p.0 - cx).hypot(p.1 - cy)
}
