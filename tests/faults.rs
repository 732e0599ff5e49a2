//! Faults raised by a target during a run are swallowed, reported and survived.

mod helpers;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use neon_flicker::{FaultKind, FlickerState, MemoryTarget, NeonFlicker, Page, SequenceFault};

use helpers::{count_state, fast_config, from_first_run, run_starts, wait_ms};

#[tokio::test(start_paused = true)]
async fn test_render_error_is_swallowed_and_rescheduled() {
    let target = MemoryTarget::new();
    target.fail_on(FlickerState::Weak);

    let seen = Arc::new(Mutex::new(Vec::<FaultKind>::new()));
    let sink = Arc::clone(&seen);
    let sign = NeonFlicker::builder(fast_config())
        .page(&Page::new())
        .on_fault(move |fault: &SequenceFault| {
            sink.lock().unwrap().push(fault.kind());
        })
        .attach(Some(target.clone()));

    sign.trigger_sequence();
    wait_ms(300).await;

    // Dim (35) -> Off (45) -> Weak fails at 80ms
    assert_eq!(*seen.lock().unwrap(), vec![FaultKind::TargetRender]);
    assert_eq!(target.active_state(), FlickerState::Neutral);
    assert!(!sign.is_animating());
    assert!(sign.has_pending_timer());

    // The next run happens one interval later and completes
    wait_ms(2000).await;
    let run = from_first_run(target.state_timeline());
    assert_eq!(run_starts(&run).len(), 2);
    assert_eq!(count_state(&run, FlickerState::Surge3), 1);

    let stats = sign.fault_stats().unwrap();
    assert_eq!(stats.get(FaultKind::TargetRender), 1);
    assert_eq!(stats.total(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_panicking_target_is_caught() {
    let target = MemoryTarget::new();
    target.panic_on(FlickerState::Surge3);

    let faults = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&faults);
    let sign = NeonFlicker::builder(fast_config())
        .on_fault(move |fault: &SequenceFault| {
            assert!(matches!(fault, SequenceFault::Panicked(msg) if msg.contains("electric-surge-3")));
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .attach(Some(target.clone()));

    sign.trigger_sequence();
    wait_ms(600).await;

    assert_eq!(faults.load(Ordering::SeqCst), 1);
    assert_eq!(target.active_state(), FlickerState::Neutral);
    assert_eq!(sign.fault_stats().unwrap().get(FaultKind::Panicked), 1);

    // Still usable after the panic
    wait_ms(3000).await;
    assert!(count_state(&target.state_timeline(), FlickerState::Surge3) >= 1);
    sign.stop();
    assert!(!sign.is_started());
}

#[tokio::test(start_paused = true)]
async fn test_detached_target_keeps_rescheduling_silently() {
    let target = MemoryTarget::new();
    let sign = NeonFlicker::new(Some(target.clone()), fast_config(), &Page::new());

    target.detach();
    sign.trigger_sequence();
    wait_ms(10_000).await;

    let stats = sign.fault_stats().unwrap();
    assert!(stats.get(FaultKind::TargetDetached) >= 5);
    assert!(sign.has_pending_timer());

    // Public operations still succeed from the caller's point of view
    sign.stop();
    sign.destroy();
    assert!(sign.is_destroyed());
}

#[tokio::test(start_paused = true)]
async fn test_faults_without_hook_are_only_counted() {
    let target = MemoryTarget::new();
    target.fail_on(FlickerState::Dim);
    let sign = NeonFlicker::new(Some(target.clone()), fast_config(), &Page::new());

    sign.trigger_sequence();
    wait_ms(100).await;
    assert_eq!(sign.fault_stats().unwrap().total(), 1);
    assert!(!sign.is_animating());
}

#[tokio::test(start_paused = true)]
async fn test_panicking_fault_hook_does_not_stop_the_schedule() {
    let target = MemoryTarget::new();
    target.fail_on(FlickerState::Weak);
    let sign = NeonFlicker::builder(fast_config())
        .on_fault(|fault: &SequenceFault| panic!("hook gave up on {}", fault))
        .attach(Some(target.clone()));

    sign.trigger_sequence();
    wait_ms(300).await;

    assert_eq!(sign.fault_stats().unwrap().get(FaultKind::TargetRender), 1);
    assert_eq!(target.active_state(), FlickerState::Neutral);
    assert!(!sign.is_animating());
    assert!(sign.has_pending_timer());

    // Next run one interval later completes normally
    wait_ms(2000).await;
    assert_eq!(count_state(&target.state_timeline(), FlickerState::Surge3), 1);
    assert!(sign.has_pending_timer());
}
