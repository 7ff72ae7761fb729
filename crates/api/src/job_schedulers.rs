use crate::follow_up::due_soon_scan::DueSoonScanUseCase;
use crate::follow_up::overdue_scan::OverdueScanUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep};
use recall_infra::RecallContext;
use std::time::Duration;
use tracing::{error, info, warn};

/// Seconds until the next minute boundary, minus `secs_before_min`. Both
/// scan loops start on a minute boundary so the equality-based threshold
/// matching sees every minute exactly once.
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

pub fn start_due_soon_reminders_job(ctx: RecallContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep(Duration::from_secs(secs_to_next_run as u64)).await;

        let mut check_interval =
            interval(Duration::from_secs(ctx.config.reminder_check_interval_secs));
        loop {
            check_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(send_due_soon_reminders(context));
        }
    });
}

async fn send_due_soon_reminders(context: RecallContext) {
    let alerts = match execute(DueSoonScanUseCase {}, &context).await {
        Ok(alerts) => alerts,
        Err(_) => return,
    };
    if alerts.is_empty() {
        return;
    }

    for alert in &alerts {
        info!(
            follow_up_id = %alert.follow_up_id,
            threshold_minutes = alert.threshold_minutes,
            "{}",
            alert.message
        );
    }

    if let Some(webhook_url) = &context.config.reminder_webhook_url {
        let client = reqwest::Client::new();
        if let Err(e) = client.post(webhook_url).json(&alerts).send().await {
            error!("Error delivering due-soon reminders to webhook: {:?}", e);
        }
    }
}

pub fn start_overdue_alerts_job(ctx: RecallContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep(Duration::from_secs(secs_to_next_run as u64)).await;

        let mut check_interval = interval(Duration::from_secs(ctx.config.ack_check_interval_secs));
        loop {
            check_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(alert_overdue_follow_ups(context));
        }
    });
}

async fn alert_overdue_follow_ups(context: RecallContext) {
    let alerts = match execute(OverdueScanUseCase {}, &context).await {
        Ok(alerts) => alerts,
        Err(_) => return,
    };

    // repeats every tick until acknowledged, which is the point
    for alert in &alerts {
        warn!(
            follow_up_id = %alert.follow_up_id,
            user_id = %alert.user_id,
            "{}",
            alert.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
