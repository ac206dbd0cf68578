//! Result Sink (spec §3 `OuijaResult`, §6 CSV row format): the typed
//! outcome of one seed's evaluation, and the lock-free queue the driver's
//! worker threads publish survivors onto.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::seed::Seed;

/// The consumer half of the result channel, handed back to the CLI for
/// draining into the CSV sink.
pub type ResultReceiver = Receiver<OuijaResult>;

/// One accepted seed's scoring detail (spec §3 `OuijaResult`).
///
/// `score_breakdown` holds one slot per Should clause, in declared order,
/// capped at `query::config::MAX_SHOULD_CLAUSES` by `OuijaConfig::validate`
/// — this type itself doesn't re-enforce the cap, it just carries whatever
/// the evaluator produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuijaResult {
    pub seed: Seed,
    pub total_score: i64,
    pub score_breakdown: Vec<i64>,
    pub natural_negatives: Option<u32>,
    pub desired_negatives: Option<u32>,
    /// Always true for a result the evaluator actually emits; see
    /// `evaluator::evaluate`, which returns `None` rather than an
    /// unsuccessful `OuijaResult` for a rejected seed. Kept on the struct
    /// because the data model names it as part of the result shape.
    pub success: bool,
}

impl OuijaResult {
    /// Formats one CSV row per spec §6:
    /// `<seed>,<totalScore>[,<naturalNegatives>?][,<desiredNegatives>?],<score_0>,<score_1>,…`
    pub fn to_csv_row(&self) -> String {
        let mut fields = vec![self.seed.to_string(), self.total_score.to_string()];
        if let Some(n) = self.natural_negatives {
            fields.push(n.to_string());
        }
        if let Some(n) = self.desired_negatives {
            fields.push(n.to_string());
        }
        fields.extend(self.score_breakdown.iter().map(|s| s.to_string()));
        fields.join(",")
    }
}

/// The producer handle worker threads hold; cloneable so every thread in
/// the driver's partition can publish without contending on a single
/// owned sender (spec §5: "multi-producer single-consumer lock-free
/// FIFO"). Owns the run's score cutoff (spec §2 "Result Sink... applies
/// the score cutoff"), a `SearchParams`-level knob distinct from the
/// query's own `MinimumScore` — a seed the evaluator already emitted can
/// still be held back here if the run was asked for a higher bar.
#[derive(Clone)]
pub struct ResultSink {
    tx: Sender<OuijaResult>,
    cutoff: i64,
}

impl ResultSink {
    /// Publishes a survivor if its total score clears the run's cutoff,
    /// returning whether it did. Never blocks meaningfully (spec §5); a
    /// full channel only happens if the consumer has stopped draining, at
    /// which point surfacing the send error would just add noise to the
    /// hot path, so a failed send is silently dropped (but still counts as
    /// published, since the cutoff — not the channel — is what the caller
    /// cares about).
    pub fn enqueue(&self, result: OuijaResult) -> bool {
        if result.total_score >= self.cutoff {
            let _ = self.tx.send(result);
            true
        } else {
            false
        }
    }
}

/// Builds the sink/receiver pair the driver wires between its worker
/// threads and the CSV consumer, with the run's score cutoff baked in.
pub fn channel(cutoff: i64) -> (ResultSink, Receiver<OuijaResult>) {
    let (tx, rx) = unbounded();
    (ResultSink { tx, cutoff }, rx)
}
