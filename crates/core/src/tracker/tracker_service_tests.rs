#[cfg(test)]
mod tests {
    use crate::entries::Entry;
    use crate::errors::{DatabaseError, Error, Result};
    use crate::events::{MockDomainEventSink, NoOpDomainEventSink};
    use crate::targets::{Currency, Target};
    use crate::tracker::{
        ConfirmChoice, Field, RunState, SnapshotRepositoryTrait, StartOutcome, TrackerService,
        TrackerServiceTrait, TrackerSettings, TrackerSnapshot,
    };
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::sleep;

    // --- Mock repository ---
    #[derive(Default)]
    struct MockSnapshotRepository {
        stored: Mutex<TrackerSnapshot>,
        saves: Mutex<usize>,
        fail_writes: bool,
    }

    impl MockSnapshotRepository {
        fn with(snapshot: TrackerSnapshot) -> Self {
            Self {
                stored: Mutex::new(snapshot),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Default::default()
            }
        }

        fn stored(&self) -> TrackerSnapshot {
            self.stored.lock().unwrap().clone()
        }

        fn save_count(&self) -> usize {
            *self.saves.lock().unwrap()
        }
    }

    #[async_trait]
    impl SnapshotRepositoryTrait for MockSnapshotRepository {
        fn load_snapshot(&self) -> Result<TrackerSnapshot> {
            Ok(self.stored())
        }

        async fn save_snapshot(&self, snapshot: TrackerSnapshot) -> Result<()> {
            if self.fail_writes {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "disk full".to_string(),
                )));
            }
            *self.stored.lock().unwrap() = snapshot;
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn service() -> TrackerService {
        TrackerService::new(
            TrackerSettings::default(),
            Arc::new(NoOpDomainEventSink),
            None,
        )
        .unwrap()
    }

    fn alice() -> Entry {
        Entry {
            id: "alice-20".to_string(),
            name: "Alice".to_string(),
            hourly_wage: dec!(20),
            elapsed_seconds: 1800,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_session_ticks_each_second() {
        let svc = service();
        svc.start().await;
        assert!(svc.is_ticking().await);

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(svc.view().await.session.elapsed_seconds, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_pause_cycles_do_not_stack_timers() {
        let svc = service();
        for _ in 0..3 {
            svc.start().await;
            svc.pause().await;
        }
        svc.start().await;
        // a redundant start must not add a second timer either
        svc.start().await;

        sleep(Duration::from_millis(5500)).await;
        assert_eq!(svc.view().await.session.elapsed_seconds, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_wage_keeps_timer_alive() {
        let svc = service();
        svc.update_field(Field::HourlyWage, "50000000000000000000000000000")
            .await
            .unwrap();
        svc.update_field(Field::OriginalValue, "79228162514264337593543950335")
            .await
            .unwrap();
        svc.start().await;

        sleep(Duration::from_millis(3500)).await;
        let view = svc.view().await;
        assert_eq!(view.session.elapsed_seconds, 3);
        assert_eq!(view.run_state, RunState::Running);
        assert!(svc.is_ticking().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_and_stop_halt_ticking() {
        let svc = service();
        svc.start().await;
        sleep(Duration::from_millis(2500)).await;
        let view = svc.pause().await;
        assert_eq!(view.run_state, RunState::Paused);
        assert!(!svc.is_ticking().await);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(svc.view().await.session.elapsed_seconds, 2);

        svc.start().await;
        sleep(Duration::from_millis(1500)).await;
        svc.stop().await;
        sleep(Duration::from_secs(10)).await;
        assert_eq!(svc.view().await.session.elapsed_seconds, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_disarms() {
        let svc = service();
        svc.start().await;
        svc.shutdown().await;
        assert!(!svc.is_ticking().await);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(svc.view().await.session.elapsed_seconds, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_tick_interval() {
        let settings = TrackerSettings::with_tick_interval(Duration::from_millis(100)).unwrap();
        let svc = TrackerService::new(settings, Arc::new(NoOpDomainEventSink), None).unwrap();
        svc.start().await;

        sleep(Duration::from_millis(1050)).await;
        assert_eq!(svc.view().await.session.elapsed_seconds, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_from_saved_arms_timer() {
        let repo = Arc::new(MockSnapshotRepository::with(TrackerSnapshot {
            saved_entries: vec![alice()],
            target: Target::none(),
        }));
        let svc = TrackerService::new(
            TrackerSettings::default(),
            Arc::new(NoOpDomainEventSink),
            Some(repo.clone()),
        )
        .unwrap();

        let outcome = svc.start_from_saved("alice-20").await.unwrap();
        assert!(matches!(outcome, StartOutcome::Started { .. }));
        assert!(svc.is_ticking().await);

        sleep(Duration::from_millis(2500)).await;
        let view = svc.view().await;
        assert_eq!(view.session.name, "Alice");
        assert_eq!(view.session.elapsed_seconds, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_while_running_keeps_single_timer() {
        let repo = Arc::new(MockSnapshotRepository::with(TrackerSnapshot {
            saved_entries: vec![alice()],
            target: Target::none(),
        }));
        let svc = TrackerService::new(
            TrackerSettings::default(),
            Arc::new(NoOpDomainEventSink),
            Some(repo.clone()),
        )
        .unwrap();

        svc.update_field(Field::Name, "Bob").await.unwrap();
        svc.start().await;
        sleep(Duration::from_millis(1500)).await;

        assert_eq!(
            svc.start_from_saved("alice-20").await.unwrap(),
            StartOutcome::NeedsConfirmation
        );
        svc.confirm(ConfirmChoice::SaveThenStart).await.unwrap();
        assert_eq!(repo.stored().saved_entries.len(), 2);

        sleep(Duration::from_secs(3)).await;
        let view = svc.view().await;
        assert_eq!(view.session.name, "Alice");
        assert_eq!(view.session.elapsed_seconds, 3);
    }

    #[tokio::test]
    async fn test_restores_and_persists_snapshot() {
        let repo = Arc::new(MockSnapshotRepository::with(TrackerSnapshot {
            saved_entries: vec![alice()],
            target: Target::new(dec!(70), Currency::Usd),
        }));
        let svc = TrackerService::new(
            TrackerSettings::default(),
            Arc::new(NoOpDomainEventSink),
            Some(repo.clone()),
        )
        .unwrap();

        let view = svc.view().await;
        assert_eq!(view.saved_entries.len(), 1);
        assert_eq!(view.target.comparison_value, dec!(100));

        svc.skip_target().await.unwrap();
        assert_eq!(repo.stored().target, Target::none());

        let mut edited = alice();
        edited.name = "Alicia".to_string();
        svc.update_entry(edited).await.unwrap();
        assert_eq!(repo.stored().saved_entries[0].name, "Alicia");
        assert_eq!(repo.save_count(), 2);
    }

    #[tokio::test]
    async fn test_save_persists_entries() {
        let repo = Arc::new(MockSnapshotRepository::default());
        let sink = MockDomainEventSink::new();
        let svc = TrackerService::new(
            TrackerSettings::default(),
            Arc::new(sink.clone()),
            Some(repo.clone()),
        )
        .unwrap();

        svc.update_field(Field::Name, "Alice").await.unwrap();
        svc.edit_entry("nope").await.unwrap_err();

        // nothing tracked: the prompt closes without writing
        svc.start().await;
        svc.stop().await;
        svc.save().await.unwrap();
        assert_eq!(repo.save_count(), 1);
        assert!(repo.stored().saved_entries.is_empty());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_memory_state() {
        let repo = Arc::new(MockSnapshotRepository::failing());
        let svc = TrackerService::new(
            TrackerSettings::default(),
            Arc::new(NoOpDomainEventSink),
            Some(repo),
        )
        .unwrap();

        svc.update_field(Field::OriginalValue, "40").await.unwrap();
        let err = svc.set_target().await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));

        let view = svc.view().await;
        assert_eq!(view.target.original_value, dec!(40));
    }

    #[tokio::test]
    async fn test_edit_flow_through_service() {
        let repo = Arc::new(MockSnapshotRepository::with(TrackerSnapshot {
            saved_entries: vec![alice()],
            target: Target::none(),
        }));
        let svc = TrackerService::new(
            TrackerSettings::default(),
            Arc::new(NoOpDomainEventSink),
            Some(repo.clone()),
        )
        .unwrap();

        let view = svc.edit_entry("alice-20").await.unwrap();
        assert!(view.edit_draft.is_some());
        svc.update_edit_field(Field::Hours, "1").await.unwrap();
        svc.save_edit().await.unwrap();

        assert_eq!(repo.stored().saved_entries[0].elapsed_seconds, 5400);

        svc.edit_entry("alice-20").await.unwrap();
        let view = svc.cancel_edit().await;
        assert!(view.edit_draft.is_none());
        assert_eq!(svc.edit_target().await.screen, crate::tracker::Screen::TargetSetup);
    }
}
