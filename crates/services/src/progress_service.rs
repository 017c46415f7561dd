use std::sync::Arc;

use storage::repository::ActivityRepository;
use vocab_core::calendar::{CalendarGrid, DEFAULT_WINDOW_DAYS, build_grid};
use vocab_core::model::ProgressOverview;

use crate::Clock;
use crate::error::ProgressServiceError;

/// Longitudinal progress for the progress page.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    activity: Arc<dyn ActivityRepository>,
    window_days: u32,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, activity: Arc<dyn ActivityRepository>) -> Self {
        Self {
            clock,
            activity,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    #[must_use]
    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }

    #[must_use]
    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Fetch the activity series and project it onto a calendar ending today.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the series cannot be fetched or the
    /// window cannot be represented.
    pub async fn activity_grid(&self) -> Result<CalendarGrid, ProgressServiceError> {
        let samples = self.activity.activity(self.window_days).await?;
        log::debug!("building calendar from {} samples", samples.len());
        Ok(build_grid(&samples, self.window_days, self.clock.today())?)
    }

    /// Aggregate statistics, passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the statistics cannot be fetched.
    pub async fn overview(&self) -> Result<ProgressOverview, ProgressServiceError> {
        Ok(self.activity.overview().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use storage::StorageError;
    use vocab_core::model::ActivitySample;
    use vocab_core::time::fixed_clock;

    #[derive(Default)]
    struct FakeActivity {
        requested: Mutex<Vec<u32>>,
        unauthorized: bool,
    }

    #[async_trait]
    impl ActivityRepository for FakeActivity {
        async fn activity(&self, window_days: u32) -> Result<Vec<ActivitySample>, StorageError> {
            self.requested.lock().unwrap().push(window_days);
            if self.unauthorized {
                return Err(StorageError::Unauthorized);
            }
            let today = fixed_clock().today();
            Ok(vec![
                ActivitySample::new(today, 21),
                ActivitySample::new(today.pred_opt().unwrap(), 3),
            ])
        }

        async fn overview(&self) -> Result<ProgressOverview, StorageError> {
            Ok(ProgressOverview {
                total: 120,
                learned: 37,
                accuracy: 81.25,
            })
        }
    }

    #[tokio::test]
    async fn grid_ends_today_and_uses_window() {
        let repo = Arc::new(FakeActivity::default());
        let service = ProgressService::new(fixed_clock(), repo.clone()).with_window_days(14);
        let grid = service.activity_grid().await.unwrap();

        assert_eq!(*repo.requested.lock().unwrap(), vec![14]);
        assert_eq!(grid.end(), fixed_clock().today());
        assert_eq!(grid.cells().count(), 14);
        assert_eq!(grid.total_count(), 24);
    }

    #[tokio::test]
    async fn overview_is_passed_through() {
        let service = ProgressService::new(fixed_clock(), Arc::new(FakeActivity::default()));
        let overview = service.overview().await.unwrap();
        assert_eq!(overview.total, 120);
        assert_eq!(overview.learned, 37);
        assert!((overview.accuracy - 81.25).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn unauthorized_is_recognisable() {
        let repo = Arc::new(FakeActivity {
            unauthorized: true,
            ..FakeActivity::default()
        });
        let err = ProgressService::new(fixed_clock(), repo)
            .activity_grid()
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }
}
