use super::keys::MonthKey;
use crate::clock::Clock;

/// The month currently on display. Only explicit navigation moves it and
/// there is no bound on how far it may travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    current: MonthKey,
}

impl CalendarCursor {
    pub fn new(current: MonthKey) -> Self {
        Self { current }
    }

    /// Cursor positioned on the clock's current month.
    pub fn starting_at(clock: &dyn Clock) -> Self {
        Self::new(MonthKey::of(clock.today()))
    }

    pub fn current(&self) -> MonthKey {
        self.current
    }

    pub fn next(&mut self) -> MonthKey {
        self.current = self.current.next();
        self.current
    }

    pub fn prev(&mut self) -> MonthKey {
        self.current = self.current.prev();
        self.current
    }

    pub fn jump_to(&mut self, month: MonthKey) -> MonthKey {
        self.current = month;
        self.current
    }
}
