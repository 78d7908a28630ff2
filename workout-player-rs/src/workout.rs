//! Workout data model.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Both,
}

impl Side {
    /// Parse the `side` column. An empty field means both sides.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "" | "both" => Some(Self::Both),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// One timed exercise interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSet {
    pub order: u32,
    pub name: String,
    pub duration: u32,
    pub side: Side,
    pub description: String,
}

impl WorkoutSet {
    pub fn motif(&self) -> AlertMotif {
        AlertMotif::for_name(&self.name)
    }

    /// Text spoken when the set starts.
    pub fn announcement(&self) -> String {
        if self.description.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{}. {}", self.name, self.description)
        }
    }
}

/// Cue style shown next to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertMotif {
    Rest,
    Active,
}

impl AlertMotif {
    pub fn for_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("recover") {
            Self::Rest
        } else {
            Self::Active
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rest => "REST",
            Self::Active => "GO",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Rest => "🧘",
            Self::Active => "💪",
        }
    }
}

/// Total playing time of a workout, excluding the get-ready phase.
pub fn total_duration(sets: &[WorkoutSet]) -> Duration {
    Duration::from_secs(sets.iter().map(|s| u64::from(s.duration)).sum())
}

pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    if seconds < 60 {
        format!("{seconds}s")
    } else {
        let minutes = seconds / 60;
        let secs = seconds % 60;
        if minutes < 60 {
            format!("{minutes}m {secs}s")
        } else {
            let hours = minutes / 60;
            let mins = minutes % 60;
            format!("{hours}h {mins}m")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(order: u32, name: &str, duration: u32) -> WorkoutSet {
        WorkoutSet {
            order,
            name: name.to_string(),
            duration,
            side: Side::Both,
            description: String::new(),
        }
    }

    #[test]
    fn test_recover_selects_rest_motif_in_any_case() {
        for name in ["recover", "Recover", "RECOVER", "ReCoVeR"] {
            assert_eq!(AlertMotif::for_name(name), AlertMotif::Rest, "{name}");
        }
    }

    #[test]
    fn test_other_names_select_active_motif() {
        assert_eq!(AlertMotif::for_name("Lunges"), AlertMotif::Active);
        assert_eq!(AlertMotif::for_name("Recovery run"), AlertMotif::Active);
        assert_eq!(set(1, "Squats", 30).motif(), AlertMotif::Active);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::parse("left"), Some(Side::Left));
        assert_eq!(Side::parse("Right"), Some(Side::Right));
        assert_eq!(Side::parse(""), Some(Side::Both));
        assert_eq!(Side::parse("both"), Some(Side::Both));
        assert_eq!(Side::parse("middle"), None);
    }

    #[test]
    fn test_announcement() {
        let mut s = set(1, "Plank", 30);
        assert_eq!(s.announcement(), "Plank");
        s.description = "Keep your back straight".into();
        assert_eq!(s.announcement(), "Plank. Keep your back straight");
    }

    #[test]
    fn test_total_and_format_duration() {
        let sets = vec![set(1, "A", 45), set(2, "B", 155)];
        assert_eq!(total_duration(&sets), Duration::from_secs(200));
        assert_eq!(format_duration(Duration::from_secs(45)), "45s");
        assert_eq!(format_duration(Duration::from_secs(200)), "3m 20s");
        assert_eq!(format_duration(Duration::from_secs(3900)), "1h 5m");
    }
}
