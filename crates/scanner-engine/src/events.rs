//! Run lifecycle events.

use serde::Serialize;
use uuid::Uuid;

/// Stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    FetchingUniverse,
    Scoring,
    Publishing,
}

/// Broadcast to every subscriber while a run makes progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    Phase {
        run_id: Uuid,
        phase: RunPhase,
    },
    /// Emitted after each batch
    Progress {
        run_id: Uuid,
        completed: usize,
        total: usize,
        percent: u8,
    },
    Published {
        run_id: Uuid,
        instruments: usize,
    },
    Cancelled {
        run_id: Uuid,
    },
}

impl RunEvent {
    pub fn run_id(&self) -> Uuid {
        match self {
            RunEvent::Phase { run_id, .. }
            | RunEvent::Progress { run_id, .. }
            | RunEvent::Published { run_id, .. }
            | RunEvent::Cancelled { run_id } => *run_id,
        }
    }
}

/// `ceil(completed * 100 / total)`, capped at 100. An empty run is complete.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (completed * 100).div_ceil(total);
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_rounds_up() {
        assert_eq!(progress_percent(10, 23), 44);
        assert_eq!(progress_percent(20, 23), 87);
        assert_eq!(progress_percent(23, 23), 100);
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(progress_percent(0, 10), 0);
        assert_eq!(progress_percent(30, 23), 100);
        assert_eq!(progress_percent(0, 0), 100);
    }

    #[test]
    fn test_event_serialization() {
        let event = RunEvent::Phase {
            run_id: Uuid::nil(),
            phase: RunPhase::FetchingUniverse,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "phase");
        assert_eq!(json["phase"], "fetching_universe");
    }
}
