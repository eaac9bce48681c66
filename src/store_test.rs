use super::*;

// =============================================================
// Reads and writes
// =============================================================

#[test]
fn get_returns_current_value() {
    let subject = Subject::new(7);
    assert_eq!(subject.get(), 7);
    subject.set(9);
    assert_eq!(subject.get(), 9);
}

#[test]
fn update_mutates_in_place() {
    let subject = Subject::new(vec!["a".to_owned()]);
    subject.update(|v| v.push("b".to_owned()));
    assert_eq!(subject.get(), vec!["a".to_owned(), "b".to_owned()]);
}

#[test]
fn clones_share_the_same_value() {
    let subject = Subject::new(1);
    let handle = subject.clone();
    handle.set(2);
    assert_eq!(subject.get(), 2);
}

// =============================================================
// Listener notification
// =============================================================

#[test]
fn subscribers_see_every_publish() {
    let subject = Subject::new(0);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let seen_clone = Rc::clone(&seen);
    let _sub = subject.subscribe(move |v| seen_clone.borrow_mut().push(*v));

    subject.set(1);
    subject.update(|v| *v += 1);

    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn listeners_run_in_registration_order() {
    let subject = Subject::new(());
    let order = Rc::new(RefCell::new(Vec::new()));

    let o1 = Rc::clone(&order);
    let _a = subject.subscribe(move |()| o1.borrow_mut().push("first"));
    let o2 = Rc::clone(&order);
    let _b = subject.subscribe(move |()| o2.borrow_mut().push("second"));

    subject.set(());
    assert_eq!(*order.borrow(), vec!["first", "second"]);
}

#[test]
fn listener_can_read_the_subject_reentrantly() {
    let subject = Subject::new(5);
    let observed = Rc::new(RefCell::new(0));

    let handle = subject.clone();
    let observed_clone = Rc::clone(&observed);
    let _sub = subject.subscribe(move |_| {
        *observed_clone.borrow_mut() = handle.get();
    });

    subject.set(11);
    assert_eq!(*observed.borrow(), 11);
}

// =============================================================
// Unsubscription
// =============================================================

#[test]
fn unsubscribe_stops_notifications() {
    let subject = Subject::new(0);
    let count = Rc::new(RefCell::new(0));

    let count_clone = Rc::clone(&count);
    let sub = subject.subscribe(move |_| *count_clone.borrow_mut() += 1);

    subject.set(1);
    sub.unsubscribe();
    subject.set(2);

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn dropping_the_subscription_stops_notifications() {
    let subject = Subject::new(0);
    let count = Rc::new(RefCell::new(0));

    let count_clone = Rc::clone(&count);
    {
        let _sub = subject.subscribe(move |_| *count_clone.borrow_mut() += 1);
        subject.set(1);
    }
    subject.set(2);

    assert_eq!(*count.borrow(), 1);
}
