use coindash::market::{MarketState, Phase};
use coindash::models::{AlertCondition, Asset};

fn asset(id: &str, name: &str, symbol: &str, price: f64) -> Asset {
    Asset {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        current_price: price,
        high_24h: Some(price * 1.1),
        low_24h: Some(price * 0.9),
        price_change_percentage_24h: Some(1.5),
        image: format!("https://img.example/{id}.png"),
    }
}

#[test]
fn starts_in_loading_with_empty_snapshot() {
    let state = MarketState::new();
    assert_eq!(*state.phase(), Phase::Loading);
    assert!(state.snapshot().is_empty());
    assert!(state.alerts().is_empty());
    assert!(state.notification().is_none());
}

#[test]
fn apply_snapshot_replaces_wholesale() {
    let mut state = MarketState::new();

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]);
    assert_eq!(state.snapshot().len(), 1);
    assert_eq!(*state.phase(), Phase::Ready);

    // A later poll replaces the whole sequence, no merging.
    let seq = state.next_seq();
    state.apply_snapshot(
        seq,
        vec![
            asset("ethereum", "Ethereum", "eth", 3000.0),
            asset("solana", "Solana", "sol", 150.0),
        ],
    );
    assert_eq!(state.snapshot().len(), 2);
    assert!(state.find_asset("bitcoin").is_none());
    assert_eq!(state.find_asset("ethereum").unwrap().current_price, 3000.0);
}

#[test]
fn stale_snapshot_is_discarded() {
    let mut state = MarketState::new();

    let slow = state.next_seq();
    let fast = state.next_seq();

    assert!(state.apply_snapshot(fast, vec![asset("bitcoin", "Bitcoin", "btc", 60000.0)]));

    // The earlier-issued fetch arrives late and must lose.
    assert!(!state.apply_snapshot(slow, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]));
    assert_eq!(state.find_asset("bitcoin").unwrap().current_price, 60000.0);
}

#[test]
fn stale_error_is_discarded() {
    let mut state = MarketState::new();

    let slow = state.next_seq();
    let fast = state.next_seq();

    assert!(state.apply_snapshot(fast, vec![asset("bitcoin", "Bitcoin", "btc", 60000.0)]));
    assert!(!state.apply_fetch_error(slow, "timeout".to_string()));
    assert_eq!(*state.phase(), Phase::Ready);
}

#[test]
fn fetch_error_keeps_previous_snapshot_in_memory() {
    let mut state = MarketState::new();

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]);

    let seq = state.next_seq();
    assert!(state.apply_fetch_error(seq, "CoinGecko markets failed: 500".to_string()));

    match state.phase() {
        Phase::Error(msg) => assert!(!msg.is_empty()),
        other => panic!("expected error phase, got {other:?}"),
    }
    // Not rendered while the error is active, but still held.
    assert_eq!(state.snapshot().len(), 1);
}

#[test]
fn error_is_cleared_by_next_successful_poll() {
    let mut state = MarketState::new();

    let seq = state.next_seq();
    state.apply_fetch_error(seq, "boom".to_string());

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]);
    assert_eq!(*state.phase(), Phase::Ready);
}

#[test]
fn above_alert_fires_on_strictly_greater_price() {
    let mut state = MarketState::new();

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]);

    state.add_alert(
        "bitcoin".to_string(),
        AlertCondition::Above,
        40000.0,
        "user@example.com".to_string(),
    );

    // Already satisfied, so it fires on the pass run by add_alert.
    assert!(state.alerts().is_empty());
    assert_eq!(
        state.notification(),
        Some("Alert: Bitcoin is above 40000!")
    );
}

#[test]
fn above_alert_does_not_fire_at_exactly_the_target() {
    let mut state = MarketState::new();

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 40000.0)]);

    state.add_alert(
        "bitcoin".to_string(),
        AlertCondition::Above,
        40000.0,
        "user@example.com".to_string(),
    );

    assert_eq!(state.alerts().len(), 1);
    // Only the creation notice, no trigger.
    assert_eq!(state.notification(), Some("Alert created successfully!"));
}

#[test]
fn below_alert_fires_on_strictly_lower_price() {
    let mut state = MarketState::new();

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("ethereum", "Ethereum", "eth", 3000.0)]);

    state.add_alert(
        "ethereum".to_string(),
        AlertCondition::Below,
        2500.0,
        "user@example.com".to_string(),
    );
    assert_eq!(state.alerts().len(), 1);

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("ethereum", "Ethereum", "eth", 2400.0)]);

    assert!(state.alerts().is_empty());
    assert_eq!(
        state.notification(),
        Some("Alert: Ethereum is below 2500!")
    );
}

#[test]
fn below_alert_persists_while_price_stays_above() {
    let mut state = MarketState::new();

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]);

    let id = state.add_alert(
        "bitcoin".to_string(),
        AlertCondition::Below,
        40000.0,
        "user@example.com".to_string(),
    );

    for _ in 0..5 {
        let seq = state.next_seq();
        state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]);
    }
    assert_eq!(state.alerts().len(), 1);

    // Manual removal: rule goes, snapshot stays, no notification raised.
    state.dismiss_notification();
    assert!(state.remove_alert(id));
    assert!(state.alerts().is_empty());
    assert_eq!(state.snapshot().len(), 1);
    assert!(state.notification().is_none());
}

#[test]
fn rule_for_absent_asset_is_inert() {
    let mut state = MarketState::new();

    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]);

    state.add_alert(
        "dogecoin".to_string(),
        AlertCondition::Above,
        0.01,
        "user@example.com".to_string(),
    );
    state.dismiss_notification();

    for _ in 0..10 {
        let seq = state.next_seq();
        state.apply_snapshot(seq, vec![asset("bitcoin", "Bitcoin", "btc", 50000.0)]);
    }
    assert_eq!(state.alerts().len(), 1);
    assert!(state.notification().is_none());

    // Once the id shows up, the rule becomes live and fires.
    let seq = state.next_seq();
    state.apply_snapshot(seq, vec![asset("dogecoin", "Dogecoin", "doge", 0.5)]);
    assert!(state.alerts().is_empty());
    assert_eq!(
        state.notification(),
        Some("Alert: Dogecoin is above 0.01!")
    );
}

#[test]
fn manual_removal_targets_exactly_one_rule() {
    let mut state = MarketState::new();

    let a = state.add_alert(
        "bitcoin".to_string(),
        AlertCondition::Above,
        100000.0,
        "a@example.com".to_string(),
    );
    let b = state.add_alert(
        "ethereum".to_string(),
        AlertCondition::Below,
        1000.0,
        "b@example.com".to_string(),
    );
    assert_ne!(a, b);

    assert!(state.remove_alert(a));
    assert_eq!(state.alerts().len(), 1);
    assert_eq!(state.alerts()[0].id, b);

    // Unknown id is a no-op.
    assert!(!state.remove_alert(a));
    assert_eq!(state.alerts().len(), 1);
}

#[test]
fn last_evaluated_match_owns_the_notification_slot() {
    let mut state = MarketState::new();

    state.add_alert(
        "bitcoin".to_string(),
        AlertCondition::Above,
        40000.0,
        "a@example.com".to_string(),
    );
    state.add_alert(
        "ethereum".to_string(),
        AlertCondition::Above,
        2000.0,
        "b@example.com".to_string(),
    );

    let seq = state.next_seq();
    state.apply_snapshot(
        seq,
        vec![
            asset("bitcoin", "Bitcoin", "btc", 50000.0),
            asset("ethereum", "Ethereum", "eth", 3000.0),
        ],
    );

    // Both fire in one pass; the later rule's message wins the single slot.
    assert!(state.alerts().is_empty());
    assert_eq!(
        state.notification(),
        Some("Alert: Ethereum is above 2000!")
    );
}

#[test]
fn add_alert_raises_created_notification() {
    let mut state = MarketState::new();

    state.add_alert(
        "bitcoin".to_string(),
        AlertCondition::Above,
        100000.0,
        "user@example.com".to_string(),
    );

    assert_eq!(state.notification(), Some("Alert created successfully!"));
    assert_eq!(state.alerts().len(), 1);

    state.dismiss_notification();
    assert!(state.notification().is_none());
}
