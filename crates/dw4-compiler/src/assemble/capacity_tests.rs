use crate::assemble::{CapacityError, assemble, logical_steps};
use crate::profile::DeviceProfile;
use crate::test_utils::{aspirate, program, rows, soak};
use crate::Error;

fn soaks(n: usize) -> Vec<dw4_core::Step> {
    (0..n).map(|_| soak(1)).collect()
}

fn capacity_error(err: Error) -> CapacityError {
    match err {
        Error::CapacityExceeded(e) => e,
        other => panic!("expected capacity error, got {other}"),
    }
}

#[test]
fn forty_nine_steps_fit() {
    let p = program(soaks(49));
    let profile = DeviceProfile::default();
    assert_eq!(logical_steps(&p, &profile).unwrap(), 49);
    let record = assemble(&p, 1, &profile).unwrap();
    assert_eq!(record.used_slots().len(), 49);
}

#[test]
fn fifty_steps_do_not() {
    let p = program(soaks(50));
    let err = assemble(&p, 1, &DeviceProfile::default()).unwrap_err();
    assert_eq!(
        capacity_error(err),
        CapacityError::Steps { step: 50, used: 50, limit: 49 }
    );
}

#[test]
fn row_select_needs_headroom() {
    let mut steps = soaks(46);
    steps.push(rows("AB"));
    let p = program(steps);
    assert_eq!(logical_steps(&p, &DeviceProfile::default()).unwrap(), 48);

    let mut steps = soaks(47);
    steps.push(rows("AB"));
    let p = program(steps);
    let err = assemble(&p, 1, &DeviceProfile::default()).unwrap_err();
    assert_eq!(
        capacity_error(err),
        CapacityError::Steps { step: 48, used: 49, limit: 48 }
    );
}

#[test]
fn row_select_early_then_fill() {
    let mut steps = vec![rows("AB")];
    steps.extend(soaks(47));
    let p = program(steps);
    assert_eq!(logical_steps(&p, &DeviceProfile::default()).unwrap(), 49);
}

#[test]
fn loops_are_charged() {
    let mut p = program(soaks(48));
    p.add_loop_at(1, 2, 2).unwrap();
    assert_eq!(logical_steps(&p, &DeviceProfile::default()).unwrap(), 49);
    assert!(assemble(&p, 1, &DeviceProfile::default()).is_ok());

    let mut p = program(soaks(49));
    p.add_loop_at(1, 2, 2).unwrap();
    let err = logical_steps(&p, &DeviceProfile::default()).unwrap_err();
    assert_eq!(
        capacity_error(err),
        CapacityError::Steps { step: 49, used: 50, limit: 49 }
    );
}

#[test]
fn offset_changes_take_a_slot() {
    let mut steps = soaks(47);
    steps.push(aspirate(-10));
    assert_eq!(logical_steps(&program(steps), &DeviceProfile::default()).unwrap(), 49);

    let mut steps = soaks(48);
    steps.push(aspirate(-10));
    let err = logical_steps(&program(steps), &DeviceProfile::default()).unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded(CapacityError::Steps { step: 49, .. })));

    let mut steps = soaks(48);
    steps.push(aspirate(0));
    assert_eq!(logical_steps(&program(steps), &DeviceProfile::default()).unwrap(), 49);
}
