//! Wire frames for the streaming session and boundary validation.
//!
//! Frames are JSON text messages. Each carries a `type` tag; `final`
//! frames add a `status` discriminating the detector outcome:
//!
//! ```text
//! progress: { "type":"progress", "generation":N, "state":[[...]] }
//! final:    { "type":"final", "status":"stable"|"oscillating"|"timeout",
//!             "generation":N, ["period":P,] "state":[[...]] }
//! error:    { "type":"error", "error":"<message>" }
//! ```

use serde::{Deserialize, Serialize};

use lifeway_engine::Outcome;
use lifeway_types::Grid;

/// Upper bound accepted for `maxAttempts` at the HTTP and `WebSocket`
/// boundaries.
pub const MAX_ATTEMPTS_LIMIT: u64 = 100_000;

/// Whether a requested attempt budget is within the accepted bounds.
pub const fn max_attempts_in_bounds(n: u64) -> bool {
    n >= 1 && n <= MAX_ATTEMPTS_LIMIT
}

/// A message written to (or, for errors, about) a streaming session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SessionFrame {
    /// One computed generation, emitted in strict order.
    Progress {
        /// The generation number, starting at 0 for the seed.
        generation: u64,
        /// Dense rendering of the state at that generation.
        state: Grid,
    },

    /// The terminal detector result; strictly the last frame.
    Final {
        /// How the run ended.
        status: FinalStatus,
        /// Generation of the carried state.
        generation: u64,
        /// Oscillation period; present only when `status` is
        /// `oscillating`.
        #[serde(skip_serializing_if = "Option::is_none")]
        period: Option<u64>,
        /// Dense rendering of the terminal state.
        state: Grid,
    },

    /// A failure surfaced to the client before the channel closes.
    Error {
        /// Human-readable message.
        error: String,
    },
}

/// Discriminant of a `final` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalStatus {
    /// The board reached a fixed point.
    Stable,
    /// The board revisited a recent state.
    Oscillating,
    /// The attempt budget ran out.
    Timeout,
}

impl From<Outcome> for SessionFrame {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Stable { generation, state } => Self::Final {
                status: FinalStatus::Stable,
                generation,
                period: None,
                state,
            },
            Outcome::Oscillating {
                generation,
                period,
                state,
            } => Self::Final {
                status: FinalStatus::Oscillating,
                generation,
                period: Some(period),
                state,
            },
            Outcome::Timeout { generation, state } => Self::Final {
                status: FinalStatus::Timeout,
                generation,
                period: None,
                state,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn to_value(frame: &SessionFrame) -> Value {
        serde_json::to_value(frame).expect("frame serializes")
    }

    #[test]
    fn progress_frame_wire_shape() {
        let frame = SessionFrame::Progress {
            generation: 3,
            state: vec![vec![0, 1], vec![1, 0]],
        };
        assert_eq!(
            to_value(&frame),
            json!({"type": "progress", "generation": 3, "state": [[0, 1], [1, 0]]})
        );
    }

    #[test]
    fn stable_final_frame_omits_period() {
        let frame = SessionFrame::from(Outcome::Stable {
            generation: 0,
            state: vec![vec![1]],
        });
        assert_eq!(
            to_value(&frame),
            json!({"type": "final", "status": "stable", "generation": 0, "state": [[1]]})
        );
    }

    #[test]
    fn oscillating_final_frame_carries_period() {
        let frame = SessionFrame::from(Outcome::Oscillating {
            generation: 2,
            period: 2,
            state: vec![vec![0]],
        });
        assert_eq!(
            to_value(&frame),
            json!({
                "type": "final",
                "status": "oscillating",
                "generation": 2,
                "period": 2,
                "state": [[0]]
            })
        );
    }

    #[test]
    fn timeout_final_frame_wire_shape() {
        let frame = SessionFrame::from(Outcome::Timeout {
            generation: 5,
            state: vec![vec![0]],
        });
        assert_eq!(
            to_value(&frame),
            json!({"type": "final", "status": "timeout", "generation": 5, "state": [[0]]})
        );
    }

    #[test]
    fn error_frame_wire_shape() {
        let frame = SessionFrame::Error {
            error: "Board not found".to_owned(),
        };
        assert_eq!(
            to_value(&frame),
            json!({"type": "error", "error": "Board not found"})
        );
    }

    #[test]
    fn attempt_bounds() {
        assert!(!max_attempts_in_bounds(0));
        assert!(max_attempts_in_bounds(1));
        assert!(max_attempts_in_bounds(MAX_ATTEMPTS_LIMIT));
        assert!(!max_attempts_in_bounds(MAX_ATTEMPTS_LIMIT + 1));
    }
}
