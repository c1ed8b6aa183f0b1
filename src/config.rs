use std::env;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
    /// How many calendar months (current month included) customers may book into.
    pub booking_window_months: u32,
    /// Offset of the service's business timezone; defines what "today" means.
    pub utc_offset_minutes: i32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let booking_window_months: u32 = env::var("BOOKING_WINDOW_MONTHS")
            .unwrap_or_else(|_| "3".into())
            .parse()?;
        if booking_window_months == 0 {
            anyhow::bail!("BOOKING_WINDOW_MONTHS must be at least 1");
        }

        let utc_offset_minutes: i32 = env::var("SERVICE_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "480".into())
            .parse()?;
        if service_offset(utc_offset_minutes).is_none() {
            anyhow::bail!("SERVICE_UTC_OFFSET_MINUTES out of range: {utc_offset_minutes}");
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into())
                .trim_end_matches('/')
                .to_string(),
            booking_window_months,
            utc_offset_minutes,
        })
    }

    /// Current calendar date in the service timezone.
    pub fn today(&self) -> NaiveDate {
        let offset = service_offset(self.utc_offset_minutes).unwrap_or(Utc.fix());
        Utc::now().with_timezone(&offset).date_naive()
    }
}

fn service_offset(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(utc_offset_minutes: i32) -> Config {
        Config {
            database_url: String::new(),
            jwt_secret: String::new(),
            host: "127.0.0.1".into(),
            port: 0,
            app_base_url: "http://localhost".into(),
            booking_window_months: 3,
            utc_offset_minutes,
        }
    }

    #[test]
    fn offsets_outside_a_day_are_rejected_without_overflow() {
        assert_eq!(service_offset(480), FixedOffset::east_opt(8 * 3600));
        assert_eq!(service_offset(-300), FixedOffset::west_opt(5 * 3600));
        assert!(service_offset(24 * 60).is_none());
        assert!(service_offset(i32::MAX).is_none());
        assert!(service_offset(i32::MIN).is_none());
    }

    #[test]
    fn today_falls_back_to_utc_for_unusable_offsets() {
        let utc_today = Utc::now().date_naive();
        let today = config(i32::MAX).today();
        assert!((today - utc_today).num_days().abs() <= 1);
    }
}
