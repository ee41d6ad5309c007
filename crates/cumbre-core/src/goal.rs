//! Goal model and the dashboard view-model built from it.
//!
//! The view-model carries everything the dashboard shows (grouping,
//! separator rule, progress numbers, deadline status) so the rendering
//! layer only has to walk it.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined personal objective with optional deadline and
/// completion state. Invariant: `completed_at` is present iff
/// `completed` is true.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Goal {
    /// Flip completion, keeping the `completed_at` invariant: set on
    /// completion, cleared on undo.
    pub fn toggled(&self, now: DateTime<Utc>) -> Goal {
        let completed = !self.completed;
        Goal {
            completed,
            completed_at: completed.then_some(now),
            ..self.clone()
        }
    }
}

/// Completion counters shown in the dashboard summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
}

impl Progress {
    pub fn of(goals: &[Goal]) -> Progress {
        Progress {
            total: goals.len(),
            completed: goals.iter().filter(|g| g.completed).count(),
        }
    }

    /// Rounded percentage; 0 when there are no goals.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
        }
    }

    pub fn label(&self) -> String {
        format!("{} de {} completadas", self.completed, self.total)
    }
}

/// One snapshot of the goal list, partitioned for display.
/// Pending goals come first; relative order within each group is the
/// subscription order (creation time, descending).
#[derive(Debug)]
pub struct DashboardView<'a> {
    pub pending: Vec<&'a Goal>,
    pub completed: Vec<&'a Goal>,
    pub progress: Progress,
}

impl<'a> DashboardView<'a> {
    pub fn build(goals: &'a [Goal]) -> DashboardView<'a> {
        DashboardView {
            pending: goals.iter().filter(|g| !g.completed).collect(),
            completed: goals.iter().filter(|g| g.completed).collect(),
            progress: Progress::of(goals),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.progress.total == 0
    }

    /// The "Completadas" separator label precedes the completed group
    /// only when both groups are non-empty.
    pub fn show_completed_separator(&self) -> bool {
        !self.pending.is_empty() && !self.completed.is_empty()
    }
}

/// Urgency of a deadline relative to today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeadlineStatus {
    #[default]
    None,
    Soon,
    Overdue,
}

impl DeadlineStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            DeadlineStatus::None => "",
            DeadlineStatus::Soon => "soon",
            DeadlineStatus::Overdue => "overdue",
        }
    }
}

/// A deadline equal to today or within the next 3 days is `Soon`;
/// before today is `Overdue`; anything further out or absent is `None`.
pub fn deadline_status(deadline: Option<NaiveDate>, today: NaiveDate) -> DeadlineStatus {
    let Some(deadline) = deadline else {
        return DeadlineStatus::None;
    };
    let diff = (deadline - today).num_days();
    if diff < 0 {
        DeadlineStatus::Overdue
    } else if diff <= 3 {
        DeadlineStatus::Soon
    } else {
        DeadlineStatus::None
    }
}

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Short es-ES date, e.g. "05 mar 2026".
pub fn format_deadline(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_ES[date.month0() as usize],
        date.year()
    )
}

/// Avatar initials from a display name: first letter of the first two
/// words, uppercased; "?" when there is nothing to take.
pub fn initials(display_name: &str) -> String {
    let s: String = display_name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect();
    if s.is_empty() {
        "?".to_string()
    } else {
        s.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn goal(id: &str, completed: bool) -> Goal {
        Goal {
            id: id.to_string(),
            title: format!("meta {id}"),
            completed,
            completed_at: completed.then(|| Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()),
            ..Goal::default()
        }
    }

    #[test]
    fn toggle_twice_restores_pending_goal_exactly() {
        let original = goal("a", false);
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        let once = original.toggled(now);
        assert!(once.completed);
        assert_eq!(once.completed_at, Some(now));
        let twice = once.toggled(now);
        assert_eq!(twice, original);
    }

    #[test]
    fn toggle_keeps_completed_at_invariant() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        let mut g = goal("a", true);
        for _ in 0..4 {
            g = g.toggled(now);
            assert_eq!(g.completed, g.completed_at.is_some());
        }
        assert!(g.completed, "even number of toggles returns to completed");
    }

    #[test]
    fn progress_two_of_five_is_forty_percent() {
        let goals = vec![
            goal("a", true),
            goal("b", false),
            goal("c", true),
            goal("d", false),
            goal("e", false),
        ];
        let p = Progress::of(&goals);
        assert_eq!(p.label(), "2 de 5 completadas");
        assert_eq!(p.percent(), 40);
    }

    #[test]
    fn progress_rounds_and_handles_empty() {
        let goals = vec![goal("a", true), goal("b", false), goal("c", false)];
        assert_eq!(Progress::of(&goals).percent(), 33);
        assert_eq!(Progress::of(&[]).percent(), 0);
        assert_eq!(Progress::of(&[]).label(), "0 de 0 completadas");
    }

    #[test]
    fn view_partitions_pending_first_preserving_order() {
        let goals = vec![goal("a", true), goal("b", false), goal("c", false)];
        let view = DashboardView::build(&goals);
        let pending_ids: Vec<&str> = view.pending.iter().map(|g| g.id.as_str()).collect();
        let completed_ids: Vec<&str> = view.completed.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(pending_ids, ["b", "c"]);
        assert_eq!(completed_ids, ["a"]);
    }

    #[test]
    fn separator_only_when_both_groups_nonempty() {
        let mixed = vec![goal("a", true), goal("b", false)];
        assert!(DashboardView::build(&mixed).show_completed_separator());

        let all_done = vec![goal("a", true), goal("b", true)];
        assert!(!DashboardView::build(&all_done).show_completed_separator());

        let all_pending = vec![goal("a", false)];
        assert!(!DashboardView::build(&all_pending).show_completed_separator());

        assert!(DashboardView::build(&[]).is_empty());
    }

    #[test]
    fn deadline_today_through_three_days_is_soon() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        for offset in 0..=3 {
            let d = today + chrono::Days::new(offset);
            assert_eq!(deadline_status(Some(d), today), DeadlineStatus::Soon);
        }
    }

    #[test]
    fn deadline_past_is_overdue_and_far_is_none() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let next_week = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
        assert_eq!(deadline_status(Some(yesterday), today), DeadlineStatus::Overdue);
        assert_eq!(deadline_status(Some(next_week), today), DeadlineStatus::None);
        assert_eq!(deadline_status(None, today), DeadlineStatus::None);
    }

    #[test]
    fn formats_short_spanish_date() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_deadline(d), "05 mar 2026");
        let d = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(format_deadline(d), "31 dic 2025");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Juan Perez"), "JP");
        assert_eq!(initials("Ana Maria Lopez"), "AM");
        assert_eq!(initials("solo"), "S");
        assert_eq!(initials("   "), "?");
        assert_eq!(initials(""), "?");
    }
}
