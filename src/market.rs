use crate::models::{AlertCondition, AlertRule, Asset};

/// View-level lifecycle of the market snapshot.
///
/// `Ready` is re-entered on every successful poll. `Error` is sticky until
/// the next poll attempt resolves; the previous snapshot stays in memory
/// while it is active (it just isn't rendered).
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Ready,
    Error(String),
}

/// Owned application state: latest snapshot, pending alert rules and the
/// single notification slot. All mutation goes through the named entry
/// points below; alert evaluation is invoked explicitly by the entry points
/// that can change its outcome (`apply_snapshot`, `add_alert`), never as an
/// implicit effect.
#[derive(Debug)]
pub struct MarketState {
    snapshot: Vec<Asset>,
    phase: Phase,

    // Stale-response guard: fetches are tagged with a monotonically
    // increasing sequence number at issue time, and an outcome is discarded
    // unless its number is greater than the last applied one. Last fetch
    // wins by issue order, not by arrival order.
    next_seq: u64,
    last_applied_seq: u64,

    alerts: Vec<AlertRule>,

    // At most one live notification; a new one overwrites the previous.
    notification: Option<String>,
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketState {
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            phase: Phase::Loading,
            next_seq: 0,
            last_applied_seq: 0,
            alerts: Vec::new(),
            notification: None,
        }
    }

    /// Allocate the sequence number for an outbound fetch.
    pub fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Replace the snapshot with a successful fetch result.
    ///
    /// Returns false (and mutates nothing) if a later fetch was already
    /// applied. Otherwise replaces the whole asset sequence, clears any
    /// error, and re-runs alert evaluation against the new prices.
    pub fn apply_snapshot(&mut self, seq: u64, assets: Vec<Asset>) -> bool {
        if seq <= self.last_applied_seq {
            return false;
        }
        self.last_applied_seq = seq;
        self.snapshot = assets;
        self.phase = Phase::Ready;
        self.evaluate_alerts();
        true
    }

    /// Record a failed fetch. The previous snapshot is kept in memory
    /// untouched; only the phase changes.
    pub fn apply_fetch_error(&mut self, seq: u64, message: String) -> bool {
        if seq <= self.last_applied_seq {
            return false;
        }
        self.last_applied_seq = seq;
        self.phase = Phase::Error(message);
        true
    }

    /// Append a pending rule, raise the "created" notification and run one
    /// evaluation pass (a rule already satisfied by the current snapshot
    /// fires immediately, overwriting the created message).
    ///
    /// Returns the id assigned to the new rule.
    pub fn add_alert(
        &mut self,
        crypto_id: String,
        condition: AlertCondition,
        target_price: f64,
        email: String,
    ) -> i64 {
        let now = chrono::Utc::now();

        let mut id = now.timestamp_millis();
        if let Some(max) = self.alerts.iter().map(|a| a.id).max() {
            if id <= max {
                id = max + 1;
            }
        }

        self.alerts.push(AlertRule {
            id,
            crypto_id,
            condition,
            target_price,
            email,
            created_at: now.timestamp(),
        });

        self.notification = Some("Alert created successfully!".to_string());
        self.evaluate_alerts();

        id
    }

    /// Delete exactly the rule with the given id. Unknown ids are a no-op.
    /// Raises no notification.
    pub fn remove_alert(&mut self, id: i64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        self.alerts.len() != before
    }

    /// One evaluation pass over the pending rules, in insertion order.
    ///
    /// A rule whose asset is absent from the snapshot is skipped (kept).
    /// A satisfied rule (strict compare) raises a notification naming the
    /// asset and the condition, and is removed. When several rules match in
    /// the same pass, the last-evaluated message is the one left visible.
    fn evaluate_alerts(&mut self) {
        let pending = std::mem::take(&mut self.alerts);
        let mut kept = Vec::with_capacity(pending.len());

        for rule in pending {
            let Some(asset) = self.snapshot.iter().find(|a| a.id == rule.crypto_id) else {
                kept.push(rule);
                continue;
            };

            let hit = match rule.condition {
                AlertCondition::Above => asset.current_price > rule.target_price,
                AlertCondition::Below => asset.current_price < rule.target_price,
            };

            if hit {
                self.notification = Some(format!(
                    "Alert: {} is {} {}!",
                    asset.name, rule.condition, rule.target_price
                ));
            } else {
                kept.push(rule);
            }
        }

        self.alerts = kept;
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn snapshot(&self) -> &[Asset] {
        &self.snapshot
    }

    pub fn find_asset(&self, id: &str) -> Option<&Asset> {
        self.snapshot.iter().find(|a| a.id == id)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn alerts(&self) -> &[AlertRule] {
        &self.alerts
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }
}
