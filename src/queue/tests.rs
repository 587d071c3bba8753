use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::DEFAULT_QUESTION;

fn recording_queue() -> (RequestQueue, Rc<RefCell<Vec<usize>>>) {
    let mut queue = RequestQueue::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    queue.subscribe(move |len| sink.borrow_mut().push(len));
    (queue, seen)
}

const S1: SessionId = SessionId(1);
const S2: SessionId = SessionId(2);
const S3: SessionId = SessionId(3);

#[test]
fn test_fifo_order() {
    let mut queue = RequestQueue::new();
    queue.enqueue(S1, Some("a".into()));
    queue.enqueue(S2, Some("b".into()));

    assert_eq!(queue.dequeue().map(|r| r.session), Some(S1));
    assert_eq!(queue.dequeue().map(|r| r.session), Some(S2));
    assert!(queue.is_empty());
}

#[test]
fn test_enqueue_same_session_is_deduplicated() {
    let (mut queue, seen) = recording_queue();

    assert!(queue.enqueue(S1, Some("first".into())));
    assert!(!queue.enqueue(S1, Some("second".into())));

    assert_eq!(queue.len(), 1);
    assert_eq!(queue.peek().map(|r| r.question.as_str()), Some("first"));
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn test_enqueue_after_dequeue_is_allowed_again() {
    let mut queue = RequestQueue::new();
    queue.enqueue(S1, None);
    queue.dequeue();
    assert!(queue.enqueue(S1, None));
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_missing_question_uses_default() {
    let mut queue = RequestQueue::new();
    queue.enqueue(S1, None);
    queue.enqueue(S2, Some("   ".into()));

    let questions: Vec<_> = queue.iter().map(|r| r.question.clone()).collect();
    assert_eq!(questions, vec![DEFAULT_QUESTION, DEFAULT_QUESTION]);
}

#[test]
fn test_peek_dequeue_scenario() {
    let (mut queue, seen) = recording_queue();

    queue.enqueue(S1, Some("q1".into()));
    queue.enqueue(S2, Some("q2".into()));

    let head = queue.peek().cloned().unwrap();
    assert_eq!(head.session, S1);
    assert_eq!(head.question, "q1");
    assert_eq!(queue.len(), 2);

    let first = queue.dequeue().unwrap();
    assert_eq!((first.session, first.question.as_str()), (S1, "q1"));
    assert_eq!(queue.len(), 1);

    let second = queue.dequeue().unwrap();
    assert_eq!((second.session, second.question.as_str()), (S2, "q2"));
    assert_eq!(queue.len(), 0);

    // Dequeue on an empty queue still reports the (unchanged) length
    assert!(queue.dequeue().is_none());
    assert_eq!(*seen.borrow(), vec![1, 2, 1, 0, 0]);
}

#[test]
fn test_remove_present_and_absent() {
    let (mut queue, seen) = recording_queue();
    queue.enqueue(S1, None);
    queue.enqueue(S2, None);
    seen.borrow_mut().clear();

    assert!(!queue.remove(S3));
    assert!(seen.borrow().is_empty());

    assert!(queue.remove(S1));
    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(queue.peek().map(|r| r.session), Some(S2));
}

#[test]
fn test_clear_notifies_only_when_non_empty() {
    let (mut queue, seen) = recording_queue();

    queue.clear();
    assert!(seen.borrow().is_empty());

    queue.enqueue(S1, None);
    queue.enqueue(S2, None);
    queue.clear();
    assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    assert!(queue.is_empty());
}

#[test]
fn test_length_matches_live_entries_over_mixed_operations() {
    let (mut queue, seen) = recording_queue();

    queue.enqueue(S1, None);
    queue.enqueue(S2, None);
    queue.enqueue(S1, None);
    queue.enqueue(S3, None);
    queue.remove(S2);
    queue.dequeue();
    queue.enqueue(S2, None);

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.is_empty(), queue.len() == 0);
    assert_eq!(
        queue.iter().map(|r| r.session).collect::<Vec<_>>(),
        vec![S3, S2]
    );
    // One notification per length change, in order
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 2, 1, 2]);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut queue = RequestQueue::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = queue.subscribe(move |len| sink.borrow_mut().push(len));

    queue.enqueue(S1, None);
    assert!(queue.unsubscribe(id));
    assert!(!queue.unsubscribe(id));
    queue.enqueue(S2, None);

    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn test_debug_report_lists_requests_in_order() {
    let mut queue = RequestQueue::new();
    queue.enqueue(S1, Some("Pick a color".into()));
    queue.enqueue(S2, Some("Continue? (y/n)".into()));

    let report = queue.debug_report(|id| format!("term{}", id.0));
    assert!(report.contains("Total: 2"));
    let first = report.find("1. term1 - \"Pick a color\"").unwrap();
    let second = report.find("2. term2 - \"Continue? (y/n)\"").unwrap();
    assert!(first < second);
}

#[test]
fn test_dispose_clears_without_notifying() {
    let (mut queue, seen) = recording_queue();
    queue.enqueue(S1, None);
    queue.dispose();
    queue.enqueue(S2, None);

    assert_eq!(queue.len(), 1);
    assert_eq!(*seen.borrow(), vec![1]);
}
