mod common;

use std::fs;

use prepavol_lib::altitude::FieldConditions;
use prepavol_lib::error::Error;
use prepavol_lib::paths::ReferencePaths;
use prepavol_lib::reference::ReferenceData;

#[test]
fn explicit_directory_loads_every_reference_file() {
    let data = common::reference_data();

    assert_eq!(data.fleet.len(), 3);
    assert_eq!(data.fuels.names(), vec!["100LL", "JET-A1", "MOGAS", "UL91"]);
    assert_eq!(data.airfields.codes().len(), 5);
    assert_eq!(data.handbooks.dir(), data.paths.performance.as_path());
}

#[test]
fn airfield_positions_are_decimal_degrees() {
    let data = common::reference_data();
    let lfmt = data.airfields.require("lfmt").expect("LFMT present");

    assert_eq!(lfmt.name, "MONTPELLIER MEDITERRANEE");
    assert_eq!(lfmt.elevation_ft, 17.0);
    let position = lfmt.position.expect("LFMT has a position");
    assert!((position.latitude - 43.58278).abs() < 1e-9);
    assert!((position.longitude - 3.96306).abs() < 1e-9);

    let conditions = FieldConditions::at_airfield(lfmt, 15.0, 1013.0);
    assert_eq!(conditions.pressure_altitude(), 17.0);
}

#[test]
fn unknown_airfield_suggests_codes() {
    let data = common::reference_data();
    let err = data.airfields.require("LFMQ").expect_err("unknown code");
    match err {
        Error::UnknownAirfield { suggestions, .. } => assert!(!suggestions.is_empty()),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn airfield_file_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["fleet.json", "fuels.json"] {
        fs::copy(common::fixtures_dir().join(name), dir.path().join(name)).unwrap();
    }

    let data = ReferenceData::resolve_and_load(Some(dir.path())).expect("loads without airfields");
    assert!(data.airfields.is_empty());
    assert_eq!(data.fleet.len(), 3);
}

#[test]
fn explicit_directory_without_fleet_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReferencePaths::resolve(Some(dir.path())).expect_err("no fleet.json");
    match err {
        Error::ReferenceDataMissing { searched } => {
            assert_eq!(searched, vec![dir.path().to_path_buf()])
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
