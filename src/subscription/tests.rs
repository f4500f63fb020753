use super::*;
use assert_call::{call, CallRecorder};
use std::{
    cell::Cell,
    panic::{catch_unwind, AssertUnwindSafe},
};

fn on_unsubscribe(rc: Rc<Cell<i32>>) {
    call!("{}", rc.get());
}

fn s(name: &'static str) -> Subscription {
    Subscription::from_fn(move || call!("{}", name))
}

#[test]
fn from_fn_calls_on_drop() {
    let mut cr = CallRecorder::new();
    {
        let _s = Subscription::from_fn(|| call!("drop"));
    }
    cr.verify("drop");
}

#[test]
fn unsubscribe_is_idempotent() {
    let mut cr = CallRecorder::new();
    let mut s = s("a");
    s.unsubscribe();
    cr.verify("a");
    s.unsubscribe();
    s.unsubscribe();
    assert!(s.is_empty());
    drop(s);
    cr.verify(());
}

#[test]
fn empty_never_calls() {
    let mut cr = CallRecorder::new();
    let mut e = Subscription::EMPTY;
    for _ in 0..3 {
        e.unsubscribe();
    }
    assert!(e.is_empty());
    drop(e);
    drop(Subscription::empty());
    drop(Subscription::default());
    cr.verify(());
}

#[test]
fn from_weak_fn_calls_when_alive() {
    let mut cr = CallRecorder::new();
    let rc = Rc::new(Cell::new(9));
    let weak = Rc::downgrade(&rc);
    {
        let _s = Subscription::from_weak_fn(weak, on_unsubscribe);
    }
    cr.verify("9");
}

#[test]
fn from_weak_fn_noop_when_dead() {
    let mut cr = CallRecorder::new();
    let rc = Rc::new(Cell::new(1));
    let weak = Rc::downgrade(&rc);
    drop(rc);
    {
        let _s = Subscription::from_weak_fn(weak, on_unsubscribe);
    }
    cr.verify(());
}

#[test]
fn combine_in_order() {
    let mut cr = CallRecorder::new();
    let mut c = Subscription::combine([s("1"), s("2"), s("3")]);
    cr.verify(());
    c.unsubscribe();
    cr.verify(["1", "2", "3"]);
    c.unsubscribe();
    cr.verify(());
}

#[test]
fn combine_nothing() {
    let mut cr = CallRecorder::new();
    let mut c = Subscription::combine(Vec::<Subscription>::new());
    assert!(c.is_empty());
    c.unsubscribe();
    cr.verify(());
}

#[test]
fn combine_nested() {
    let mut cr = CallRecorder::new();
    let inner = Subscription::combine([s("b"), s("c")]);
    drop(Subscription::combine([s("a"), inner, s("d")]));
    cr.verify(["a", "b", "c", "d"]);
}

#[test]
fn and_releases_receiver_first() {
    let mut cr = CallRecorder::new();
    let mut c = s("receiver").and(s("other"));
    c.unsubscribe();
    cr.verify(["receiver", "other"]);
    c.unsubscribe();
    cr.verify(());
}

#[test]
fn try_combine_absent_list() {
    let mut cr = CallRecorder::new();
    assert_eq!(
        Subscription::try_combine(None).unwrap_err(),
        CompositionError::AbsentList
    );
    cr.verify(());
}

#[test]
fn try_combine_absent_element_releases_nothing() {
    let mut cr = CallRecorder::new();
    let mut items = vec![Some(s("1")), None, Some(s("3"))];
    assert_eq!(
        Subscription::try_combine(Some(&mut items)).unwrap_err(),
        CompositionError::AbsentElement(1)
    );
    cr.verify(());
    assert_eq!(items.len(), 3);
    for item in items.into_iter().flatten() {
        item.detach();
    }
    cr.verify(());
}

#[test]
fn try_combine_takes_all() {
    let mut cr = CallRecorder::new();
    let mut items = vec![Some(s("1")), Some(s("2"))];
    let mut c = Subscription::try_combine(Some(&mut items)).unwrap();
    assert!(items.is_empty());
    cr.verify(());
    c.unsubscribe();
    cr.verify(["1", "2"]);
}

#[test]
fn try_and_absent_keeps_receiver() {
    let mut cr = CallRecorder::new();
    let mut r = s("receiver");
    assert_eq!(r.try_and(None), Err(CompositionError::AbsentOperand));
    cr.verify(());
    r.try_and(Some(s("other"))).unwrap();
    cr.verify(());
    r.unsubscribe();
    cr.verify(["receiver", "other"]);
}

#[test]
fn detach_releases_nothing() {
    let mut cr = CallRecorder::new();
    s("a").detach();
    Subscription::combine([s("b"), s("c")]).detach();
    cr.verify(());
}

#[test]
fn combine_continues_past_panic() {
    let mut cr = CallRecorder::new();
    let c = Subscription::combine([
        s("1"),
        Subscription::from_fn(|| panic!("failed")),
        s("3"),
    ]);
    let r = catch_unwind(AssertUnwindSafe(move || drop(c)));
    assert!(r.is_err());
    cr.verify(["1", "3"]);
}

#[test]
fn debug_format() {
    assert_eq!(format!("{:?}", Subscription::empty()), "Subscription::Empty");
    let c = Subscription::combine([s("a"), s("b")]);
    assert_eq!(format!("{c:?}"), "Subscription::Combined(2)");
    c.detach();
}
