//! SweepOverdueCheckinsHandler - Closes sessions left open past the threshold.
//!
//! Reads the gym settings (a missing row means the configured defaults), and
//! when auto-checkout is enabled closes every open session checked in before
//! `now - auto_checkout_minutes` with one batch update.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::attendance::{AttendanceError, CheckoutSource, GymSettings};
use crate::domain::foundation::Timestamp;
use crate::ports::{AttendanceRepository, Notification, Notifier, SettingsRepository};

#[derive(Debug, Clone, Copy)]
pub struct SweepOverdueCheckinsCommand {
    pub now: Timestamp,
    /// The caller is showing today's attendance and wants a refresh signal.
    pub viewing_today: bool,
}

impl SweepOverdueCheckinsCommand {
    pub fn now(viewing_today: bool) -> Self {
        Self {
            now: Timestamp::now(),
            viewing_today,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepResult {
    /// Sessions closed by this sweep.
    pub closed: u64,
    /// Threshold used, `None` when auto-checkout is disabled.
    pub threshold_minutes: Option<u32>,
    /// Today's view should be reloaded.
    pub refresh: bool,
}

impl SweepResult {
    fn disabled() -> Self {
        Self {
            closed: 0,
            threshold_minutes: None,
            refresh: false,
        }
    }
}

pub struct SweepOverdueCheckinsHandler {
    settings: Arc<dyn SettingsRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    notifier: Arc<dyn Notifier>,
    defaults: GymSettings,
}

impl SweepOverdueCheckinsHandler {
    pub fn new(
        settings: Arc<dyn SettingsRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            attendance,
            notifier,
            defaults: GymSettings::default(),
        }
    }

    /// Settings assumed when the settings row is missing.
    pub fn with_defaults(mut self, defaults: GymSettings) -> Self {
        self.defaults = defaults;
        self
    }

    pub async fn handle(&self, cmd: SweepOverdueCheckinsCommand) -> Result<SweepResult, AttendanceError> {
        let settings = self.settings.get().await?.unwrap_or(self.defaults);

        let Some(cutoff) = settings.cutoff(cmd.now) else {
            tracing::debug!("auto-checkout disabled, sweep skipped");
            return Ok(SweepResult::disabled());
        };

        let closed = self.attendance.close_open_before(cutoff, cmd.now).await?;
        let refresh = closed > 0 && cmd.viewing_today;

        if closed > 0 {
            tracing::info!(
                closed,
                threshold_minutes = settings.auto_checkout_minutes,
                source = CheckoutSource::AutoSweep.as_str(),
                "overdue sessions checked out"
            );
        }
        if refresh {
            self.notifier.notify(Notification::info(
                "Automatic check-out",
                format!(
                    "{} member(s) checked out automatically after {} minutes",
                    closed, settings.auto_checkout_minutes
                ),
            ));
        }

        Ok(SweepResult {
            closed,
            threshold_minutes: Some(settings.auto_checkout_minutes),
            refresh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGymStore;
    use crate::adapters::notify::RecordingNotifier;
    use crate::domain::attendance::Attendance;
    use crate::domain::foundation::MemberId;

    struct Fixture {
        store: Arc<InMemoryGymStore>,
        notifier: Arc<RecordingNotifier>,
        handler: SweepOverdueCheckinsHandler,
        now: Timestamp,
    }

    async fn fixture(settings: Option<GymSettings>, minutes_ago: &[i64]) -> Fixture {
        let store = Arc::new(InMemoryGymStore::new());
        if let Some(settings) = settings {
            store.save(&settings).await.unwrap();
        }
        let now = Timestamp::now();
        for m in minutes_ago {
            store
                .seed_attendance(Attendance::check_in(MemberId::new(), now.minus_minutes(*m)))
                .await;
        }
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = SweepOverdueCheckinsHandler::new(store.clone(), store.clone(), notifier.clone());
        Fixture { store, notifier, handler, now }
    }

    #[tokio::test]
    async fn closes_session_past_threshold_at_now() {
        let f = fixture(Some(GymSettings::new(240, true)), &[300]).await;

        let result = f
            .handler
            .handle(SweepOverdueCheckinsCommand { now: f.now, viewing_today: true })
            .await
            .unwrap();

        assert_eq!(result.closed, 1);
        assert!(result.refresh);
        assert_eq!(f.store.attendance_rows().await[0].check_out_time, Some(f.now));
        let note = f.notifier.last().unwrap();
        assert!(note.message.contains('1') && note.message.contains("240"));
    }

    #[tokio::test]
    async fn disabled_sweep_leaves_rows_untouched() {
        let f = fixture(Some(GymSettings::new(240, false)), &[300]).await;

        let result = f
            .handler
            .handle(SweepOverdueCheckinsCommand { now: f.now, viewing_today: true })
            .await
            .unwrap();

        assert_eq!(result, SweepResult::disabled());
        assert!(f.store.attendance_rows().await[0].is_open());
        assert_eq!(f.notifier.count(), 0);
    }

    #[tokio::test]
    async fn missing_settings_use_defaults() {
        let f = fixture(None, &[239, 241]).await;

        let result = f
            .handler
            .handle(SweepOverdueCheckinsCommand { now: f.now, viewing_today: false })
            .await
            .unwrap();

        assert_eq!(result.closed, 1);
        assert_eq!(result.threshold_minutes, Some(240));
    }

    #[tokio::test]
    async fn zero_matches_is_silent() {
        let f = fixture(None, &[10]).await;

        let result = f
            .handler
            .handle(SweepOverdueCheckinsCommand { now: f.now, viewing_today: true })
            .await
            .unwrap();

        assert_eq!(result.closed, 0);
        assert!(!result.refresh);
        assert_eq!(f.notifier.count(), 0);
    }

    #[tokio::test]
    async fn not_viewing_today_closes_without_notification() {
        let f = fixture(None, &[500]).await;

        let result = f
            .handler
            .handle(SweepOverdueCheckinsCommand { now: f.now, viewing_today: false })
            .await
            .unwrap();

        assert_eq!(result.closed, 1);
        assert_eq!(f.notifier.count(), 0);
    }
}
