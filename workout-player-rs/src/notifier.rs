//! Desktop notification when a workout completes, via notify-rust.

use notify_rust::Notification;
use tracing::{debug, warn};

use crate::workout::{format_duration, total_duration, WorkoutSet};

pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn workout_complete(&self, title: &str, sets: &[WorkoutSet]) {
        self.notify(&format!("{title} complete"), &completion_body(sets));
    }

    fn notify(&self, summary: &str, body: &str) {
        if !self.enabled {
            return;
        }

        debug!("Notification: {summary}");

        if let Err(e) = Notification::new()
            .summary(summary)
            .body(body)
            .icon("emblem-default")
            .timeout(5000)
            .show()
        {
            warn!("Failed to show notification: {e}");
        }
    }
}

fn completion_body(sets: &[WorkoutSet]) -> String {
    format!(
        "{} sets in {}",
        sets.len(),
        format_duration(total_duration(sets))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Side;

    #[test]
    fn test_completion_body() {
        let sets: Vec<WorkoutSet> = (1..=4)
            .map(|order| WorkoutSet {
                order,
                name: "Burpees".into(),
                duration: 45,
                side: Side::Both,
                description: String::new(),
            })
            .collect();
        assert_eq!(completion_body(&sets), "4 sets in 3m 0s");
    }

    #[test]
    fn test_disabled_notifier_is_silent() {
        Notifier::new(false).workout_complete("Core", &[]);
    }
}
