use recall_domain::DEFAULT_DUE_SOON_THRESHOLDS;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Minute marks before a due time at which the due-soon scan fires a
    /// one-time alert. The scan matches these minutes exactly, so the
    /// check interval must stay at or below one minute for every
    /// threshold to be hit.
    pub due_soon_thresholds: Vec<i64>,
    /// Seconds between due-soon scans
    pub reminder_check_interval_secs: u64,
    /// Seconds between overdue-acknowledgment scans
    pub ack_check_interval_secs: u64,
    /// Whether admins get a copy of every due-soon notification row in
    /// addition to the assignee
    pub notify_admins_on_due_soon: bool,
    /// Where to POST due-soon alert batches. Unset means alerts are only
    /// logged.
    pub reminder_webhook_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let due_soon_thresholds = match std::env::var("DUE_SOON_THRESHOLDS") {
            Ok(value) => match parse_thresholds(&value) {
                Some(thresholds) => thresholds,
                None => {
                    warn!(
                        "The given DUE_SOON_THRESHOLDS: {} is not a comma separated list of positive minutes, falling back to the defaults: {:?}.",
                        value, DEFAULT_DUE_SOON_THRESHOLDS
                    );
                    DEFAULT_DUE_SOON_THRESHOLDS.to_vec()
                }
            },
            Err(_) => DEFAULT_DUE_SOON_THRESHOLDS.to_vec(),
        };

        Self {
            port,
            due_soon_thresholds,
            reminder_check_interval_secs: interval_from_env("REMINDER_CHECK_INTERVAL_SECS", 60),
            ack_check_interval_secs: interval_from_env("ACK_CHECK_INTERVAL_SECS", 60),
            notify_admins_on_due_soon: std::env::var("NOTIFY_ADMINS_ON_DUE_SOON")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            reminder_webhook_url: std::env::var("REMINDER_WEBHOOK_URL").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_thresholds(value: &str) -> Option<Vec<i64>> {
    let thresholds = value
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    if thresholds.is_empty() || thresholds.iter().any(|m| *m < 0) {
        return None;
    }
    Some(thresholds)
}

fn interval_from_env(var: &str, default_secs: u64) -> u64 {
    match std::env::var(var) {
        Ok(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(
                    "The given {}: {} is not a positive number of seconds, falling back to the default: {}.",
                    var, value, default_secs
                );
                default_secs
            }
        },
        Err(_) => default_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_threshold_lists() {
        assert_eq!(parse_thresholds("10,5"), Some(vec![10, 5]));
        assert_eq!(parse_thresholds("30, 10 ,5"), Some(vec![30, 10, 5]));
        assert_eq!(parse_thresholds("abc"), None);
        assert_eq!(parse_thresholds("10,-5"), None);
        assert_eq!(parse_thresholds(""), None);
    }
}
