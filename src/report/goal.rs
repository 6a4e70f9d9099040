use serde::{Deserialize, Serialize};

/// Goal used when a participant has not set one.
pub const DEFAULT_SAVINGS_GOAL: f64 = 500.0;

/// Progress of the saved amount toward a savings goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub saved: f64,
    pub goal: f64,
    /// Capped at 100.
    pub percentage: f64,
    pub remaining: f64,
    pub reached: bool,
}

impl GoalProgress {
    pub fn new(saved: f64, goal: f64) -> Self {
        if goal <= 0.0 || !goal.is_finite() {
            return Self {
                saved,
                goal,
                percentage: 0.0,
                remaining: 0.0,
                reached: false,
            };
        }
        let percentage = (saved / goal * 100.0).clamp(0.0, 100.0);
        Self {
            saved,
            goal,
            percentage,
            remaining: (goal - saved).max(0.0),
            reached: saved >= goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_progress() {
        let progress = GoalProgress::new(125.0, DEFAULT_SAVINGS_GOAL);
        assert_eq!(progress.percentage, 25.0);
        assert_eq!(progress.remaining, 375.0);
        assert!(!progress.reached);
    }

    #[test]
    fn percentage_is_capped() {
        let progress = GoalProgress::new(750.0, 500.0);
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, 0.0);
        assert!(progress.reached);
    }

    #[test]
    fn missing_goal_reports_zero() {
        assert_eq!(GoalProgress::new(50.0, 0.0).percentage, 0.0);
        assert_eq!(GoalProgress::new(50.0, -1.0).percentage, 0.0);
    }
}
