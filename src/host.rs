//! The narrow set of services a status-bar host provides to the block

use chrono::{DateTime, Duration, Utc};

/// Binary color classification of a rendered block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Good,
    Bad,
}

const DEFAULT_COLOR_GOOD: &str = "#00FF00";
const DEFAULT_COLOR_BAD: &str = "#FF0000";

pub trait Host {
    /// Substitute named placeholders without ever failing
    fn safe_format(&self, template: &str, params: &[(&str, &str)]) -> String {
        crate::format::safe_format(template, params)
    }

    /// Host-specific color string for a classification
    fn color(&self, color: Color) -> &str;

    /// Point in time `seconds` from now
    fn time_in(&self, seconds: u32) -> DateTime<Utc>;
}

/// Host backed by the system clock
#[derive(Debug, Clone)]
pub struct SystemHost {
    color_good: String,
    color_bad: String,
}

impl SystemHost {
    pub fn with_colors(good: &str, bad: &str) -> Self {
        SystemHost {
            color_good: good.to_string(),
            color_bad: bad.to_string(),
        }
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        SystemHost::with_colors(DEFAULT_COLOR_GOOD, DEFAULT_COLOR_BAD)
    }
}

impl Host for SystemHost {
    fn color(&self, color: Color) -> &str {
        match color {
            Color::Good => &self.color_good,
            Color::Bad => &self.color_bad,
        }
    }

    fn time_in(&self, seconds: u32) -> DateTime<Utc> {
        Utc::now() + Duration::seconds(i64::from(seconds))
    }
}
