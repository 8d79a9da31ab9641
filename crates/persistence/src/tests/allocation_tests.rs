// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leaves::{AllocationGrant, Debit, UpsertOutcome};
use leaves_domain::AllocationKey;

use super::{setup_fixture, upsert};
use crate::PersistenceError;

#[test]
fn test_upsert_creates_then_updates() {
    let mut fixture = setup_fixture();
    let key = AllocationKey::new(fixture.employee_id, fixture.sick.leave_type_id, 2027);

    let first = upsert(&mut fixture.persistence, AllocationGrant { key, total_days: 7 });
    let second = upsert(&mut fixture.persistence, AllocationGrant { key, total_days: 7 });

    assert_eq!(first, UpsertOutcome::Created);
    assert_eq!(second, UpsertOutcome::Updated);

    let rows = fixture
        .persistence
        .list_allocations_with_types(fixture.employee_id, 2027)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0.total_allocated, 7);
    assert_eq!(rows[0].0.remaining, 7);
    assert_eq!(rows[0].1.name, "Sick");
}

#[test]
fn test_upsert_resets_remaining_after_debit() {
    let mut fixture = setup_fixture();
    let key = AllocationKey::new(fixture.employee_id, fixture.sick.leave_type_id, 2026);

    fixture
        .persistence
        .transaction(|tx| tx.debit_allocation(Debit { key, days: 3 }))
        .unwrap();
    let debited = fixture
        .persistence
        .transaction(|tx| tx.find_allocation(key))
        .unwrap()
        .unwrap();
    assert_eq!(debited.remaining, 4);

    upsert(&mut fixture.persistence, AllocationGrant { key, total_days: 7 });

    let reset = fixture
        .persistence
        .transaction(|tx| tx.find_allocation(key))
        .unwrap()
        .unwrap();
    assert_eq!(reset.total_allocated, 7);
    assert_eq!(reset.remaining, 7);
    assert_eq!(reset.allocation_id, debited.allocation_id);
}

#[test]
fn test_debit_is_guarded_by_remaining() {
    let mut fixture = setup_fixture();
    let key = AllocationKey::new(fixture.employee_id, fixture.sick.leave_type_id, 2026);

    let result = fixture
        .persistence
        .transaction(|tx| tx.debit_allocation(Debit { key, days: 8 }));

    assert!(matches!(
        result,
        Err(PersistenceError::ConditionalUpdateFailed(_))
    ));
    let unchanged = fixture
        .persistence
        .transaction(|tx| tx.find_allocation(key))
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.remaining, 7);
}

#[test]
fn test_debit_of_exact_remaining_reaches_zero() {
    let mut fixture = setup_fixture();
    let key = AllocationKey::new(fixture.employee_id, fixture.sick.leave_type_id, 2026);

    fixture
        .persistence
        .transaction(|tx| tx.debit_allocation(Debit { key, days: 7 }))
        .unwrap();

    let allocation = fixture
        .persistence
        .transaction(|tx| tx.find_allocation(key))
        .unwrap()
        .unwrap();
    assert_eq!(allocation.remaining, 0);
    assert!(allocation.validate().is_ok());
}

#[test]
fn test_debit_of_missing_allocation_fails() {
    let mut fixture = setup_fixture();
    let key = AllocationKey::new(fixture.employee_id, fixture.sick.leave_type_id, 2030);

    let result = fixture
        .persistence
        .transaction(|tx| tx.debit_allocation(Debit { key, days: 1 }));

    assert!(matches!(
        result,
        Err(PersistenceError::ConditionalUpdateFailed(_))
    ));
}

#[test]
fn test_allocation_for_unknown_employee_violates_foreign_key() {
    let mut fixture = setup_fixture();
    let key = AllocationKey::new(9_999, fixture.sick.leave_type_id, 2026);

    let result = fixture
        .persistence
        .transaction(|tx| tx.upsert_allocation(AllocationGrant { key, total_days: 7 }));

    assert!(result.is_err());
}
