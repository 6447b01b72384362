use std::{cell::RefCell, rc::Rc};

use crate::{
    IdDomain, IdRange, Query, SparseIdsList,
    error::ErrorKind,
};

const MAX: u64 = 1_000_000;

fn new_list() -> SparseIdsList {
    SparseIdsList::with_domain(IdDomain::new(MAX))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Recorded {
    ids: Vec<u64>,
    range: IdRange,
    count: Option<usize>,
}

fn record(list: &mut SparseIdsList) -> Rc<RefCell<Vec<Recorded>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    list.subscribe(move |update| {
        sink.borrow_mut().push(Recorded {
            ids: update.ids.to_vec(),
            range: update.range,
            count: update.count,
        });
    });
    log
}

#[test]
fn test_new_list_is_empty() {
    let list = new_list();
    assert!(list.slices().is_empty());
    assert_eq!(list.count(), None);
    assert_eq!(list.domain().max(), MAX);
}

#[test]
fn test_add_slice_with_count() {
    let mut list = new_list();
    list.add_slice([5, 7, 9], IdRange::new(0, 10), Some(3));
    list.verify();

    assert_eq!(list.slices().len(), 1);
    assert_eq!(list.slices()[0].ids(), &[5, 7, 9]);
    assert_eq!(list.slices()[0].range(), IdRange::new(0, 10));
    assert_eq!(list.count(), Some(3));
    assert!(list.contains(7));
    assert!(!list.contains(8));
    assert!(list.is_loaded(8));
    assert!(!list.is_loaded(11));
}

#[test]
fn test_add_new_folds_into_tail_and_increments() {
    let mut list = new_list();
    list.add_slice([5, 7, 9], IdRange::new(0, 10), Some(3));
    list.add_new(11);
    list.verify();

    // [0, 10] and [11, MAX] do not touch, so a separate slice is created.
    assert_eq!(list.slices().len(), 2);
    assert_eq!(list.count(), Some(4));

    list.add_existing(10, IdRange::new(9, 11));
    list.verify();
    assert_eq!(list.slices().len(), 1);
    assert_eq!(list.slices()[0].ids(), &[5, 7, 9, 10, 11]);
    // Merging [0, MAX] resets the count to the loaded set size.
    assert_eq!(list.slices()[0].range(), IdRange::new(0, MAX));
    assert_eq!(list.count(), Some(5));
}

#[test]
fn test_add_new_into_touching_tail() {
    let mut list = new_list();
    list.add_slice([5, 7, 9], IdRange::new(0, 10), Some(3));
    list.add_new(10);
    assert_eq!(list.slices().len(), 1);
    assert_eq!(list.slices()[0].range(), IdRange::new(0, MAX));
    assert_eq!(list.count(), Some(4));
}

#[test]
fn test_add_new_with_unknown_count() {
    let mut list = new_list();
    list.add_slice([100, 110], IdRange::new(90, 120), None);
    list.add_new(130);
    assert_eq!(list.count(), None);

    // A repeated arrival adds nothing and leaves the count alone.
    list.add_slice([], IdRange::new(200, 300), Some(10));
    list.add_new(130);
    assert_eq!(list.count(), Some(10));
    list.add_new(140);
    assert_eq!(list.count(), Some(11));
}

#[test]
fn test_add_existing_never_changes_count() {
    let mut list = new_list();
    list.add_slice([50], IdRange::new(40, 60), Some(20));
    list.add_existing(70, IdRange::new(65, 75));
    list.add_existing(62, IdRange::new(60, 65));
    list.verify();
    assert_eq!(list.count(), Some(20));
    assert_eq!(list.slices().len(), 1);
    assert_eq!(list.slices()[0].ids(), &[50, 62, 70]);
}

#[test]
fn test_explicit_count_overrides() {
    let mut list = new_list();
    list.add_slice([1, 2], IdRange::new(1, 2), Some(50));
    list.add_slice([3], IdRange::new(2, 3), Some(40));
    assert_eq!(list.count(), Some(40));
    list.add_slice([4], IdRange::new(3, 4), None);
    assert_eq!(list.count(), Some(40));
}

#[test]
fn test_full_domain_slice_defines_count() {
    let mut list = new_list();
    list.add_slice([10, 20], IdRange::new(0, 25), Some(100));
    list.add_slice([30], IdRange::new(25, MAX), None);
    assert_eq!(list.slices().len(), 1);
    assert_eq!(list.count(), Some(3));
}

#[test]
fn test_add_slice_twice_is_idempotent() {
    let mut list = new_list();
    list.add_slice([3, 1, 2], IdRange::new(1, 5), Some(3));
    let ids = list.slices()[0].ids().to_vec();
    list.add_slice([1, 2, 3], IdRange::new(1, 5), None);
    list.add_new(7);
    list.add_new(7);
    assert_eq!(list.count(), Some(4));
    assert_eq!(list.slices()[0].ids(), ids.as_slice());
}

#[test]
fn test_remove_one() {
    let mut list = new_list();
    list.add_slice([5, 7, 9], IdRange::new(0, 10), Some(30));

    list.remove_one(7);
    assert_eq!(list.slices()[0].ids(), &[5, 9]);
    assert_eq!(list.count(), Some(29));

    // Not loaded anywhere: the set is untouched, the count still drops.
    list.remove_one(500);
    assert_eq!(list.slices()[0].ids(), &[5, 9]);
    assert_eq!(list.count(), Some(28));

    // Inside a loaded range but not in the set.
    list.remove_one(6);
    assert_eq!(list.slices()[0].ids(), &[5, 9]);
    assert_eq!(list.count(), Some(27));
}

#[test]
fn test_remove_one_with_unknown_count() {
    let mut list = new_list();
    list.add_slice([5, 7, 9], IdRange::new(0, 10), None);
    list.remove_one(9);
    assert_eq!(list.count(), None);
    assert_eq!(list.slices()[0].ids(), &[5, 7]);
}

#[test]
fn test_remove_all() {
    let mut list = new_list();
    list.add_slice([5, 7, 9], IdRange::new(0, 10), Some(3));
    list.add_slice([50], IdRange::new(40, 60), None);
    list.remove_all();
    list.verify();

    assert_eq!(list.slices().len(), 1);
    assert!(list.slices()[0].is_empty());
    assert_eq!(list.slices()[0].range(), IdRange::new(0, MAX));
    assert_eq!(list.count(), Some(0));

    list.add_new(60);
    assert_eq!(list.slices().len(), 1);
    assert_eq!(list.count(), Some(1));
    assert_eq!(list.query(&Query::around(60, 5, 5)).ids, vec![60]);
}

#[test]
fn test_notifications() {
    let mut list = new_list();
    let log = record(&mut list);

    list.add_slice([5, 7], IdRange::new(0, 10), Some(2));
    list.add_slice([5, 7], IdRange::new(0, 10), None);
    list.add_existing(20, IdRange::new(15, 25));
    list.add_slice([], IdRange::new(10, 15), None);

    let log = log.borrow();
    assert_eq!(
        *log,
        vec![
            Recorded {
                ids: vec![5, 7],
                range: IdRange::new(0, 10),
                count: Some(2),
            },
            Recorded {
                ids: vec![5, 7],
                range: IdRange::new(0, 10),
                count: Some(2),
            },
            Recorded {
                ids: vec![20],
                range: IdRange::new(15, 25),
                count: Some(2),
            },
            Recorded {
                ids: vec![5, 7, 20],
                range: IdRange::new(0, 25),
                count: Some(2),
            },
        ]
    );
}

#[test]
fn test_notification_for_empty_range() {
    let mut list = new_list();
    let log = record(&mut list);
    list.add_slice([], IdRange::new(8, 8), Some(4));
    assert!(list.slices().is_empty());
    assert_eq!(
        *log.borrow(),
        vec![Recorded {
            ids: vec![],
            range: IdRange::new(8, 8),
            count: Some(4),
        }]
    );
}

#[test]
fn test_removals_do_not_notify() {
    let mut list = new_list();
    list.add_slice([5, 7], IdRange::new(0, 10), Some(2));
    let log = record(&mut list);
    list.remove_one(5);
    list.remove_all();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_observers_run_in_order_and_unsubscribe() {
    let mut list = new_list();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let calls = calls.clone();
        list.subscribe(move |_| calls.borrow_mut().push("first"))
    };
    {
        let calls = calls.clone();
        list.subscribe(move |_| calls.borrow_mut().push("second"));
    }

    list.add_new(1);
    assert_eq!(*calls.borrow(), vec!["first", "second"]);

    assert!(list.unsubscribe(first));
    assert!(!list.unsubscribe(first));
    list.add_new(2);
    assert_eq!(*calls.borrow(), vec!["first", "second", "second"]);
}

#[test]
#[should_panic(expected = "non-empty batch")]
fn test_ids_in_empty_range_panic() {
    let mut list = new_list();
    list.add_slice([4], IdRange::new(4, 4), None);
}

#[test]
fn test_try_add_slice_validates() {
    let mut list = new_list();

    let err = list
        .try_add_slice([5, 12], IdRange::new(0, 10), None)
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::IdOutOfRange { id: 12, .. }
    ));

    let err = list
        .try_add_slice([], IdRange::new(0, MAX + 1), None)
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::RangeOutOfDomain { .. }));

    let err = list
        .try_add_slice([3], IdRange { from: 3, till: 3 }, None)
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));

    let err = list
        .try_add_slice([], IdRange { from: 9, till: 3 }, None)
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));

    assert!(list.slices().is_empty());

    list.try_add_slice([7, 5], IdRange::new(0, 10), Some(2))
        .unwrap();
    assert_eq!(list.slices()[0].ids(), &[5, 7]);
}

#[test]
fn test_try_add_new_and_existing() {
    let mut list = new_list();
    assert!(list.try_add_new(MAX).is_err());
    list.try_add_new(MAX - 1).unwrap();

    let err = list.try_add_existing(3, IdRange::new(4, 8)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "id 3 lies outside of the no-skip range [4, 8]"
    );
    list.try_add_existing(5, IdRange::new(4, 8)).unwrap();
    assert_eq!(list.slices().len(), 2);
}
