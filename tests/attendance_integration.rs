//! Integration tests for the attendance workflow against the in-memory store.
//!
//! Covers the badge check-in/check-out round, the one-open-session rule and
//! the auto check-out sweep run through the scheduler.

use std::sync::Arc;
use std::time::Duration;

use gym_manager::adapters::{InMemoryGymStore, RecordingNotifier};
use gym_manager::application::{
    AutoCheckoutScheduler, CheckInCommand, CheckInHandler, CheckOutCommand, CheckOutHandler,
    EditAttendanceCommand, EditAttendanceHandler, OptimisticList, SweepOverdueCheckinsHandler,
    TodayAttendanceHandler,
};
use gym_manager::domain::attendance::{Attendance, AttendanceError, GymSettings, QrPayload};
use gym_manager::domain::foundation::{MemberId, Timestamp};
use gym_manager::domain::membership::Member;
use gym_manager::ports::{NotificationLevel, SettingsRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Gym {
    store: Arc<InMemoryGymStore>,
    notifier: Arc<RecordingNotifier>,
}

impl Gym {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryGymStore::new()),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    fn check_in(&self) -> CheckInHandler {
        CheckInHandler::new(self.store.clone(), self.store.clone(), self.notifier.clone())
    }

    fn check_out(&self) -> CheckOutHandler {
        CheckOutHandler::new(self.store.clone(), self.notifier.clone())
    }

    fn scheduler(&self) -> AutoCheckoutScheduler {
        let sweep = SweepOverdueCheckinsHandler::new(
            self.store.clone(),
            self.store.clone(),
            self.notifier.clone(),
        );
        AutoCheckoutScheduler::new(Arc::new(sweep))
    }

    async fn stale_session(&self, minutes_ago: i64) -> Attendance {
        let session = Attendance::check_in(MemberId::new(), Timestamp::now().minus_minutes(minutes_ago));
        self.store.seed_attendance(session.clone()).await;
        session
    }
}

// =============================================================================
// Badge Round Trip
// =============================================================================

#[tokio::test]
async fn badge_check_in_and_check_out_round_trip() {
    let gym = Gym::new();
    let member = Member::new("Ana", "Silva", "monthly");
    gym.store.seed_member(member.clone()).await;
    let badge = QrPayload::for_member(&member).to_json();

    let session = gym
        .check_in()
        .handle(CheckInCommand::from_qr(&badge, Timestamp::now()).unwrap())
        .await
        .unwrap();
    assert!(session.is_open());

    let second = gym
        .check_in()
        .handle(CheckInCommand::now(member.id))
        .await;
    assert!(matches!(
        second,
        Err(AttendanceError::AlreadyCheckedIn { attendance_id, .. }) if attendance_id == session.id
    ));

    let closed = gym
        .check_out()
        .handle(CheckOutCommand::badge(badge.clone()))
        .await
        .unwrap();
    assert_eq!(closed.id, session.id);
    assert!(!closed.is_open());

    let again = gym.check_out().handle(CheckOutCommand::badge(badge)).await;
    assert!(matches!(again, Err(AttendanceError::NoOpenSession(id)) if id == member.id));
}

#[tokio::test]
async fn today_view_counts_open_and_closed_sessions() {
    let gym = Gym::new();
    let member = Member::new("Rui", "Costa", "annual");
    gym.store.seed_member(member.clone()).await;

    let session = gym
        .check_in()
        .handle(CheckInCommand::now(member.id))
        .await
        .unwrap();
    gym.check_out()
        .handle(CheckOutCommand::manual(session.id))
        .await
        .unwrap();
    gym.check_in()
        .handle(CheckInCommand::now(member.id))
        .await
        .unwrap();

    let today = TodayAttendanceHandler::new(gym.store.clone())
        .handle(Timestamp::now())
        .await
        .unwrap();

    assert_eq!(today.sessions.len(), 2);
    assert_eq!(today.summary.open_sessions, 1);
    assert_eq!(today.summary.closed_sessions, 1);
}

#[tokio::test]
async fn reopening_an_earlier_visit_is_refused_while_member_is_inside() {
    let gym = Gym::new();
    let member = Member::new("Eva", "Lopes", "monthly");
    gym.store.seed_member(member.clone()).await;

    let first = gym
        .check_in()
        .handle(CheckInCommand::now(member.id))
        .await
        .unwrap();
    gym.check_out()
        .handle(CheckOutCommand::manual(first.id))
        .await
        .unwrap();
    let current = gym
        .check_in()
        .handle(CheckInCommand::now(member.id))
        .await
        .unwrap();

    let today = TodayAttendanceHandler::new(gym.store.clone())
        .handle(Timestamp::now())
        .await
        .unwrap();
    let mut table = OptimisticList::new(today.sessions.clone());
    let edit = EditAttendanceCommand {
        id: first.id,
        check_in_time: Timestamp::now().minus_minutes(120),
    };

    let edit_handler = EditAttendanceHandler::new(gym.store.clone(), gym.notifier.clone());
    let commit = edit_handler.handle(edit.clone());
    let result = table.run(&edit, commit, |_| {}).await;

    assert!(matches!(
        result,
        Err(AttendanceError::AlreadyCheckedIn { attendance_id, .. }) if attendance_id == current.id
    ));
    assert_eq!(table.items(), today.sessions.as_slice());
    let open: Vec<_> = gym
        .store
        .attendance_rows()
        .await
        .into_iter()
        .filter(|a| a.is_open())
        .collect();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, current.id);
}

// =============================================================================
// Auto Check-out
// =============================================================================

#[tokio::test]
async fn sweep_closes_session_older_than_threshold() {
    let gym = Gym::new();
    gym.store.save(&GymSettings::new(240, true)).await.unwrap();
    let stale = gym.stale_session(300).await;
    let recent = gym.stale_session(30).await;

    let before = Timestamp::now();
    let result = gym.scheduler().tick_once().await.unwrap();

    assert_eq!(result.closed, 1);
    let rows = gym.store.attendance_rows().await;
    let stale_row = rows.iter().find(|a| a.id == stale.id).unwrap();
    let closed_at = stale_row.check_out_time.unwrap();
    assert!(!closed_at.is_before(&before));
    assert!(rows.iter().find(|a| a.id == recent.id).unwrap().is_open());
    assert_eq!(gym.notifier.of_level(NotificationLevel::Info).len(), 1);
}

#[tokio::test]
async fn disabled_auto_checkout_leaves_sessions_open() {
    let gym = Gym::new();
    gym.store.save(&GymSettings::new(240, false)).await.unwrap();
    gym.stale_session(300).await;

    let result = gym.scheduler().tick_once().await.unwrap();

    assert_eq!(result.closed, 0);
    assert_eq!(result.threshold_minutes, None);
    assert!(gym.store.attendance_rows().await[0].is_open());
    assert_eq!(gym.notifier.count(), 0);
}

#[tokio::test]
async fn spawned_scheduler_sweeps_eagerly_and_stops_on_shutdown() {
    let gym = Gym::new();
    gym.stale_session(500).await;

    let task = gym
        .scheduler()
        .with_interval(Duration::from_millis(20))
        .spawn();
    tokio::time::sleep(Duration::from_millis(60)).await;
    task.shutdown().await;

    assert!(!gym.store.attendance_rows().await[0].is_open());

    // Nothing sweeps after shutdown.
    gym.stale_session(500).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    let open = gym
        .store
        .attendance_rows()
        .await
        .into_iter()
        .filter(Attendance::is_open)
        .count();
    assert_eq!(open, 1);
}
