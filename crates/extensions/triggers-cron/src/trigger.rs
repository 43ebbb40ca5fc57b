//! Cron expression trigger.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use tracing::debug;

use carillon_protocols::{millis_to_utc, Trigger, TriggerError, SEP};

const DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Trigger that fires on a cron schedule.
///
/// Expressions use the standard 5-field dialect: minute, hour, day-of-month,
/// month, day-of-week, where day-of-week follows the POSIX numbering
/// (0 or 7 = Sunday) and also accepts names. When both day fields are
/// restricted, a day matches if either field matches it, as classic cron
/// behaves; a bare `*` leaves a field unrestricted. The named descriptors
/// `@yearly`/`@annually`, `@monthly`, `@weekly`, `@daily`/`@midnight` and
/// `@hourly` are supported as well.
///
/// The expression is compiled at construction, so a built trigger can no
/// longer fail on syntax; `next_fire_time` only fails when the schedule has
/// no future occurrence. The trigger is immutable and safe to share across
/// threads without synchronization.
#[derive(Debug, Clone)]
pub struct CronTrigger {
    expression: String,
    schedule: Schedule,
    // Present only for the restricted-day union case; `schedule` then
    // carries the day-of-month side and this one the day-of-week side.
    dow_schedule: Option<Schedule>,
    location: Tz,
}

impl CronTrigger {
    /// Creates a trigger evaluated in UTC.
    pub fn new(expression: impl Into<String>) -> Result<Self, TriggerError> {
        Self::with_location(expression, Tz::UTC)
    }

    /// Creates a trigger whose schedule is evaluated in the given location.
    pub fn with_location(
        expression: impl Into<String>,
        location: Tz,
    ) -> Result<Self, TriggerError> {
        let expression = expression.into();
        let expression = expression.trim().to_string();
        if expression.is_empty() {
            return Err(TriggerError::InvalidArgument(
                "cron expression is empty".to_string(),
            ));
        }

        let normalized =
            normalize(&expression).map_err(|reason| TriggerError::InvalidExpression {
                expression: expression.clone(),
                reason,
            })?;
        let schedule = Schedule::from_str(&normalized.schedule).map_err(|err| {
            TriggerError::InvalidExpression {
                expression: expression.clone(),
                reason: err.to_string(),
            }
        })?;
        let dow_schedule = match &normalized.dow_schedule {
            Some(text) => Some(Schedule::from_str(text).map_err(|err| {
                TriggerError::InvalidExpression {
                    expression: expression.clone(),
                    reason: err.to_string(),
                }
            })?),
            None => None,
        };

        debug!(expression = %expression, location = %location, "compiled cron trigger");
        Ok(Self {
            expression,
            schedule,
            dow_schedule,
            location,
        })
    }

    /// The cron expression this trigger was built from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The time zone the schedule is evaluated in.
    pub fn location(&self) -> Tz {
        self.location
    }

    fn next_after(&self, base: DateTime<Tz>) -> Result<i64, TriggerError> {
        let mut next = self.schedule.after(&base).next();
        if let Some(dow_schedule) = &self.dow_schedule {
            next = match (next, dow_schedule.after(&base).next()) {
                (Some(by_dom), Some(by_dow)) => Some(by_dom.min(by_dow)),
                (by_dom, by_dow) => by_dom.or(by_dow),
            };
        }
        match next {
            Some(next) => Ok(next.timestamp_millis()),
            None => Err(TriggerError::ScheduleExhausted {
                expression: self.expression.clone(),
            }),
        }
    }
}

impl Trigger for CronTrigger {
    fn next_fire_time(&self, prev: i64) -> Result<i64, TriggerError> {
        let base: DateTime<Utc> = if prev <= 0 {
            Utc::now()
        } else {
            millis_to_utc(prev).ok_or_else(|| {
                TriggerError::InvalidArgument(format!(
                    "previous fire time {prev} is out of range"
                ))
            })?
        };
        self.next_after(base.with_timezone(&self.location))
    }

    fn description(&self) -> String {
        format!(
            "CronTrigger{sep}{}{sep}{}",
            self.expression,
            self.location,
            sep = SEP
        )
    }
}

/// Rewritten schedule text, plus a second day-of-week schedule when the
/// day fields have to be evaluated as a union.
struct Normalized {
    schedule: String,
    dow_schedule: Option<String>,
}

/// Rewrites a 5-field expression or an `@` descriptor into the
/// seconds-first dialect the underlying parser expects. That parser
/// intersects the two day fields, while classic cron takes their union
/// when both are restricted, so such expressions split into a day-of-month
/// schedule and a day-of-week schedule evaluated side by side.
fn normalize(expression: &str) -> Result<Normalized, String> {
    if let Some(descriptor) = expression.strip_prefix('@') {
        let schedule = match descriptor.to_ascii_lowercase().as_str() {
            "yearly" | "annually" => "0 0 0 1 1 *",
            "monthly" => "0 0 0 1 * *",
            "weekly" => "0 0 0 * * SUN",
            "daily" | "midnight" => "0 0 0 * * *",
            "hourly" => "0 0 * * * *",
            other => return Err(format!("unknown descriptor '@{other}'")),
        };
        return Ok(Normalized {
            schedule: schedule.to_string(),
            dow_schedule: None,
        });
    }

    let fields: Vec<&str> = expression.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }
    let (minute, hour, dom, month, dow) =
        (fields[0], fields[1], fields[2], fields[3], fields[4]);
    let days_of_week = normalize_days_of_week(dow)?;

    // A day field is unrestricted only as a bare `*`; stepped forms such as
    // `*/2` restrict it.
    if dom != "*" && dow != "*" {
        return Ok(Normalized {
            schedule: format!("0 {minute} {hour} {dom} {month} *"),
            dow_schedule: Some(format!("0 {minute} {hour} * {month} {days_of_week}")),
        });
    }
    Ok(Normalized {
        schedule: format!("0 {minute} {hour} {dom} {month} {days_of_week}"),
        dow_schedule: None,
    })
}

/// The underlying parser numbers weekdays from Sunday = 1 while the POSIX
/// dialect counts from Sunday = 0, so numeric day-of-week tokens (values,
/// ranges, steps) are expanded into explicit day names, which both dialects
/// read identically. `*` and already-named tokens pass through this as
/// names too.
fn normalize_days_of_week(field: &str) -> Result<String, String> {
    if field == "*" {
        return Ok("*".to_string());
    }

    let mut days: BTreeSet<u8> = BTreeSet::new();
    for item in field.split(',') {
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => {
                let step: u8 = step
                    .parse()
                    .map_err(|_| format!("invalid day-of-week step '{step}'"))?;
                if step == 0 {
                    return Err("day-of-week step must be positive".to_string());
                }
                (range, step)
            }
            None => (item, 1),
        };

        // Ranges are resolved in the raw 0-7 space so "5-7" covers Friday
        // through Sunday; 7 folds onto Sunday when the set is built.
        let (start, end) = if range == "*" {
            (0, 6)
        } else {
            match range.split_once('-') {
                Some((start, end)) => (parse_day(start)?, parse_day(end)?),
                None => {
                    let day = parse_day(range)?;
                    if step > 1 {
                        (day, 6)
                    } else {
                        (day, day)
                    }
                }
            }
        };
        if start > end {
            return Err(format!("invalid day-of-week range '{range}'"));
        }

        let mut day = start;
        while day <= end {
            days.insert(if day == 7 { 0 } else { day });
            day += step;
        }
    }

    if days.len() == 7 {
        return Ok("*".to_string());
    }
    let names: Vec<&str> = days.iter().map(|&day| DAY_NAMES[day as usize]).collect();
    Ok(names.join(","))
}

fn parse_day(token: &str) -> Result<u8, String> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        let value: u8 = token
            .parse()
            .map_err(|_| format!("invalid day-of-week '{token}'"))?;
        if value > 7 {
            return Err(format!("day-of-week value {value} out of range"));
        }
        return Ok(value);
    }
    match token.to_ascii_lowercase().as_str() {
        "sun" | "sunday" => Ok(0),
        "mon" | "monday" => Ok(1),
        "tue" | "tuesday" => Ok(2),
        "wed" | "wednesday" => Ok(3),
        "thu" | "thursday" => Ok(4),
        "fri" | "friday" => Ok(5),
        "sat" | "saturday" => Ok(6),
        _ => Err(format!("unknown day-of-week '{token}'")),
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
