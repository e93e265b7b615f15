//! Weight and balance of one loading.
//!
//! - [`state`] - [`LoadState`], the mutable loading and its derived figures
//! - [`plan`] - [`LoadingPlan`], a serializable loading description
//! - [`report`] - Evaluation results and business-rule [`Violation`]s
//!
//! Limits are never enforced by returning errors. A loading outside the
//! limits still produces a full [`WeightBalanceReport`] whose `reasons`
//! explain what is wrong; only structurally invalid requests fail.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use prepavol_lib::aircraft::FleetCatalog;
//! use prepavol_lib::loading::LoadState;
//! use prepavol_lib::reference::FuelTable;
//!
//! let fuels = FuelTable::from_path(Path::new("fuels.json")).unwrap();
//! let fleet = FleetCatalog::from_path(Path::new("fleet.json"), &fuels).unwrap();
//! let mut state = LoadState::new(fleet.require("F-HAAC").unwrap());
//! state.set_pax(0, 80.0).unwrap();
//! state.set_pax(1, 80.0).unwrap();
//! state.set_fuel_gauge("main", 4.0).unwrap();
//!
//! let report = state.validate();
//! assert!(report.is_ready_to_fly);
//! ```

pub mod plan;
pub mod report;
pub mod state;

pub use plan::{FuelQuantity, LoadingPlan};
pub use report::{
    AdjustmentKind, BalanceTrace, FuelAdjustment, StationKind, StationLoad, TankLevel, Violation,
    WeightBalanceReport,
};
pub use state::{
    endurance_from, LoadState, DAY_RESERVE_HOURS, ENDURANCE_STEP_MINUTES, NIGHT_RESERVE_HOURS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::dr400_120;

    #[test]
    fn front_seats_and_full_tank_are_within_limits() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        state.set_pax(0, 80.0).unwrap();
        state.set_pax(1, 80.0).unwrap();
        state.set_fuel_gauge("main", 4.0).unwrap();

        let report = state.validate();
        assert!((report.all_up_weight - 825.2).abs() < 1e-9);
        assert!((report.center_of_gravity - 0.4355).abs() < 1e-3);
        assert!(report.is_ready_to_fly);
        assert!(report.reasons.is_empty());
    }

    #[test]
    fn mtow_reason_follows_the_current_loading() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        state.set_fuel_gauge("main", 4.0).unwrap();
        for seat in 0..4 {
            state.set_pax(seat, 100.0).unwrap();
        }

        let report = state.validate();
        assert!((report.all_up_weight - 1065.2).abs() < 1e-9);
        assert!(!report.is_ready_to_fly);
        let mtow_count = |reasons: &[Violation]| {
            reasons
                .iter()
                .filter(|r| matches!(r, Violation::MtowExceeded { .. }))
                .count()
        };
        assert_eq!(mtow_count(&report.reasons), 1);
        // Re-evaluating does not duplicate the reason.
        assert_eq!(mtow_count(&state.validate().reasons), 1);

        for seat in 0..4 {
            state.set_pax(seat, 0.0).unwrap();
        }
        state.set_pax(0, 80.0).unwrap();
        assert_eq!(mtow_count(&state.reasons()), 0);
        assert!(state.is_ready_to_fly());
    }

    #[test]
    fn rear_heavy_loading_is_out_of_balance_only() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        state.set_pax(2, 110.0).unwrap();
        state.set_pax(3, 110.0).unwrap();
        state.set_baggage("baggage", 40.0).unwrap();

        let report = state.validate();
        assert!((report.all_up_weight - 846.0).abs() < 1e-9);
        assert!(report.center_of_gravity > 0.564);
        assert_eq!(report.reason_messages(), vec!["Balance out of cg envelope"]);
    }

    #[test]
    fn reasons_are_reported_in_fixed_order() {
        let profile = dr400_120();
        let mut state = LoadState::new(&profile);
        for seat in 0..4 {
            state.set_pax(seat, 110.0).unwrap();
        }
        state.set_baggage("baggage", 70.0).unwrap();
        state.set_baggage("baggage2", 5.0).unwrap();

        assert_eq!(
            state.validate().reason_messages(),
            vec![
                "All-up weight above MTOW",
                "Balance out of cg envelope",
                "Baggage weight over max weight",
                "Zone 2 baggage weight over max weight",
            ]
        );
    }
}
