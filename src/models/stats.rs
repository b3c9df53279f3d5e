use serde::Serialize;

/// Per-user aggregate counters shown on the statistics page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total_events: i64,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub study_hours: f64,
}
