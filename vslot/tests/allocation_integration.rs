//! End-to-end allocation runs, from records through the engine to output.

mod common;

use common::PoolFixture;
use vslot::{records, DeviceId, Request, RequestProcessor, Reservation, VlanId};

fn reservation(request: u32, device: u32, primary: bool, vlan: u16) -> Reservation {
    Reservation::new(
        request,
        DeviceId::from(device),
        primary,
        VlanId::try_from(vlan).unwrap(),
    )
}

/// Device 1's primary is superseded by its backup, device 2 keeps a
/// singular primary; one redundant then one singular request drains both.
#[test]
fn test_redundant_then_singular_scenario() {
    let fixture = PoolFixture::new()
        .primary(1, 1)
        .backup(1, 1)
        .primary(2, 1);
    let mut pools = fixture.build();

    let mut processor = RequestProcessor::new(&mut pools);

    let redundant = processor.process_request(&Request::new(0, true)).unwrap();
    assert_eq!(
        redundant,
        vec![reservation(0, 1, false, 1), reservation(0, 1, true, 1)]
    );

    let singular = processor.process_request(&Request::new(1, false)).unwrap();
    assert_eq!(singular, vec![reservation(1, 2, true, 1)]);

    // Nothing remains of either kind.
    let err = processor
        .process_request(&Request::new(2, false))
        .unwrap_err();
    assert!(err.is_exhausted());
    let err = processor
        .process_request(&Request::new(2, true))
        .unwrap_err();
    assert!(err.is_exhausted());
}

/// Full CSV pipeline: ingest both record files, allocate, serialize, and
/// compare against the expected output both as text and as typed values.
#[test]
fn test_csv_end_to_end() {
    let fixture = PoolFixture::new()
        .primary(1, 1)
        .backup(1, 1)
        .primary(2, 1)
        .primary(2, 3);
    let requests_csv = "request_id,redundant\n0,1\n1,0\n2,0\n";

    let assignments = records::read_assignments(fixture.to_csv().as_bytes()).unwrap();
    let mut registry = vslot::DeviceRegistry::new();
    for assignment in assignments {
        registry.register(assignment);
    }
    let mut pools = registry.finalize();

    let requests = records::read_requests(requests_csv.as_bytes()).unwrap();
    let reservations = RequestProcessor::new(&mut pools).run(&requests).unwrap();

    let mut out = Vec::new();
    records::write_reservations(&mut out, &reservations).unwrap();
    let text = String::from_utf8(out.clone()).unwrap();
    assert_eq!(
        text,
        "request_id,device_id,primary_port,vlan_id\n\
         0,1,0,1\n\
         0,1,1,1\n\
         1,2,1,1\n\
         2,2,1,3\n"
    );

    let expected = records::read_reservations(out.as_slice()).unwrap();
    assert_eq!(reservations, expected);
}

/// Reservations keep request order even when requests bounce between
/// kinds and devices.
#[test]
fn test_request_order_preserved_across_kinds() {
    let fixture = PoolFixture::new()
        .primary(1, 10)
        .primary(1, 20)
        .backup(1, 20)
        .primary(3, 5)
        .primary(3, 30)
        .backup(3, 30);
    let mut pools = fixture.build();

    let requests = [
        Request::new(0, false),
        Request::new(1, true),
        Request::new(2, false),
        Request::new(3, true),
    ];
    let reservations = RequestProcessor::new(&mut pools).run(&requests).unwrap();

    assert_eq!(
        reservations,
        vec![
            // Lowest singular is vlan 5 on device 3.
            reservation(0, 3, true, 5),
            // Lowest redundant is vlan 20 on device 1, backup first.
            reservation(1, 1, false, 20),
            reservation(1, 1, true, 20),
            // Next singular is vlan 10 on device 1.
            reservation(2, 1, true, 10),
            // Remaining redundant pair is vlan 30 on device 3.
            reservation(3, 3, false, 30),
            reservation(3, 3, true, 30),
        ]
    );

    let ids: Vec<u32> = reservations.iter().map(Reservation::request_id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

/// An exhausted batch reports the failing request, not a short output.
#[test]
fn test_exhaustion_reports_request_and_kind() {
    let fixture = PoolFixture::new().primary(1, 1);
    let mut pools = fixture.build();

    let requests = [Request::new(0, false), Request::new(7, true)];
    let err = RequestProcessor::new(&mut pools)
        .run(&requests)
        .unwrap_err();

    let display = format!("{err}");
    assert!(display.contains("request 7"));
    assert!(display.contains("redundant"));
}

/// Unmatched backups never reach the output, whichever side arrived late.
#[test]
fn test_unmatched_backups_never_emitted() {
    let fixture = PoolFixture::new()
        // Backup with no primary at all.
        .backup(1, 10)
        // Primary arriving after its backup: dropped, backup unmatched.
        .backup(2, 20)
        .primary(2, 20)
        // A real pair for contrast.
        .primary(3, 30)
        .backup(3, 30);
    let mut pools = fixture.build();

    let mut processor = RequestProcessor::new(&mut pools);
    let pair = processor.process_request(&Request::new(0, true)).unwrap();
    assert_eq!(
        pair,
        vec![reservation(0, 3, false, 30), reservation(0, 3, true, 30)]
    );

    assert!(processor
        .process_request(&Request::new(1, true))
        .unwrap_err()
        .is_exhausted());
    assert!(processor
        .process_request(&Request::new(2, false))
        .unwrap_err()
        .is_exhausted());
}
