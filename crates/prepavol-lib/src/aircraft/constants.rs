//! Station names and limits shared by the aircraft and loading modules.

/// Baggage zones every profile exposes, in display order.
///
/// Zones missing from a catalog record are created with a zero limit.
pub const STANDARD_BAGGAGE_ZONES: [&str; 2] = ["baggage", "baggage2"];

/// Fuel tanks every profile exposes, in display order.
///
/// Tanks missing from a catalog record are created with zero capacity and can
/// never hold fuel.
pub const STANDARD_TANKS: [&str; 4] = ["main", "left_wing", "right_wing", "aux"];

/// Relative tolerance used when deciding that a point lies on an envelope edge.
pub const ENVELOPE_EDGE_TOLERANCE: f64 = 1e-9;
