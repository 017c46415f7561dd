use vocab_core::model::{ProgressOverview, SessionStats};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStatsVm {
    pub correct_label: String,
    pub incorrect_label: String,
}

#[must_use]
pub fn map_session_stats(stats: SessionStats) -> SessionStatsVm {
    SessionStatsVm {
        correct_label: format!("✅ {}", stats.correct()),
        incorrect_label: format!("❌ {}", stats.incorrect()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverviewVm {
    pub total_label: String,
    pub learned_label: String,
    pub accuracy_label: String,
}

#[must_use]
pub fn map_overview(overview: &ProgressOverview) -> OverviewVm {
    OverviewVm {
        total_label: format!("Total words: {}", overview.total),
        learned_label: format!("Learned: {}", overview.learned),
        accuracy_label: format!("Accuracy: {}%", overview.accuracy),
    }
}
