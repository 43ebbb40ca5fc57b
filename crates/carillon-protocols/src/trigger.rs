//! Trigger trait definition.

use crate::error::TriggerError;

/// Core trait for triggers.
///
/// Triggers answer "when does this run next" for a scheduler. All times are
/// Unix epoch milliseconds; implementations must be safe to query from
/// multiple threads at once.
pub trait Trigger: Send + Sync {
    /// Returns the next fire time strictly after the given previous fire
    /// time, as epoch milliseconds.
    ///
    /// A `prev` of zero or less means "never fired"; implementations base
    /// the computation on the current time instead. When the schedule has
    /// no occurrence after the base time, the call fails with
    /// [`TriggerError::ScheduleExhausted`].
    fn next_fire_time(&self, prev: i64) -> Result<i64, TriggerError>;

    /// Returns a human-readable description of the trigger.
    fn description(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SEP;

    /// Fires at a fixed interval after the previous fire time.
    struct MockTrigger {
        interval_millis: i64,
    }

    impl Trigger for MockTrigger {
        fn next_fire_time(&self, prev: i64) -> Result<i64, TriggerError> {
            if prev <= 0 {
                return Ok(self.interval_millis);
            }
            Ok(prev + self.interval_millis)
        }

        fn description(&self) -> String {
            format!("MockTrigger{}{}ms", SEP, self.interval_millis)
        }
    }

    #[test]
    fn test_trigger_chaining_is_strictly_increasing() {
        let trigger = MockTrigger {
            interval_millis: 500,
        };
        let mut prev = 0;
        for _ in 0..10 {
            let next = trigger.next_fire_time(prev).unwrap();
            assert!(next > prev);
            prev = next;
        }
        assert_eq!(prev, 5000);
    }

    #[test]
    fn test_trigger_is_object_safe() {
        let trigger: Box<dyn Trigger> = Box::new(MockTrigger {
            interval_millis: 100,
        });
        assert_eq!(trigger.next_fire_time(100).unwrap(), 200);
        assert_eq!(trigger.description(), "MockTrigger::100ms");
    }
}
