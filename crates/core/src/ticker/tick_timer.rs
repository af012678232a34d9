use std::future::Future;
use std::time::Duration;

use log::{debug, error};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Lives inside the tick task and reports how it ended. An abort drops it
/// without a panic in flight, so only a panicking callback is logged as an
/// error.
struct TaskExitLog;

impl Drop for TaskExitLog {
    fn drop(&mut self) {
        if std::thread::panicking() {
            error!("Tick task panicked; the timer is no longer armed");
        }
    }
}

/// Owns at most one repeating tick task.
///
/// Arming always tears down the previous task first, so switching
/// Running -> Paused -> Running never leaves two tasks incrementing the same
/// session. Dropping the timer aborts its task.
pub struct TickTimer {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        TickTimer {
            period: period.max(MIN_PERIOD),
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Starts ticking. The first tick fires one period from now; late ticks
    /// are delayed, never bunched up to catch up.
    ///
    /// `on_tick` returning `false` ends the task.
    pub fn arm<F, Fut>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.disarm();

        let period = self.period;
        debug!("Arming tick timer ({:?} period)", period);
        self.handle = Some(tokio::spawn(async move {
            let _exit_log = TaskExitLog;
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if !on_tick().await {
                    debug!("Tick task finished: callback asked to stop");
                    break;
                }
            }
        }));
    }

    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Disarming tick timer");
            handle.abort();
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn counting(count: &Arc<AtomicU64>) -> impl FnMut() -> std::future::Ready<bool> {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(true)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let count = Arc::new(AtomicU64::new(0));
        let mut timer = TickTimer::new(Duration::from_secs(1));
        timer.arm(counting(&count));

        sleep(Duration::from_millis(900)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_keeps_a_single_task() {
        let count = Arc::new(AtomicU64::new(0));
        let mut timer = TickTimer::new(Duration::from_secs(1));

        for _ in 0..3 {
            timer.arm(counting(&count));
            timer.disarm();
        }
        timer.arm(counting(&count));
        // arming twice in a row still leaves one task
        timer.arm(counting(&count));
        assert!(timer.is_armed());

        sleep(Duration::from_millis(5500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_stops_ticks() {
        let count = Arc::new(AtomicU64::new(0));
        let mut timer = TickTimer::new(Duration::from_secs(1));
        timer.arm(counting(&count));

        sleep(Duration::from_millis(2500)).await;
        timer.disarm();
        assert!(!timer.is_armed());

        sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let count = Arc::new(AtomicU64::new(0));
        {
            let mut timer = TickTimer::new(Duration::from_secs(1));
            timer.arm(counting(&count));
            sleep(Duration::from_millis(1500)).await;
        }
        sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_can_end_task() {
        let count = Arc::new(AtomicU64::new(0));
        let mut timer = TickTimer::new(Duration::from_secs(1));
        let seen = Arc::clone(&count);
        timer.arm(move || {
            let n = seen.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(n < 3)
        });

        sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_callback_disarms_and_can_be_rearmed() {
        let mut timer = TickTimer::new(Duration::from_secs(1));
        timer.arm(|| -> std::future::Ready<bool> { panic!("tick failed") });

        sleep(Duration::from_millis(1500)).await;
        assert!(!timer.is_armed());

        let count = Arc::new(AtomicU64::new(0));
        timer.arm(counting(&count));
        sleep(Duration::from_millis(2500)).await;
        assert!(timer.is_armed());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
