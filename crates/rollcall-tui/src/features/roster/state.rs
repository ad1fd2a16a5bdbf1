use rollcall_core::roster::{ActivityCard, ParticipantRow, RosterView};

/// The most recent roster render and the participant cursor.
#[derive(Debug, Default)]
pub struct RosterState {
    view: RosterView,
    cursor: usize,
}

impl RosterState {
    pub fn view(&self) -> &RosterView {
        &self.view
    }

    /// Replaces the whole view. Nothing from the previous render survives
    /// except the cursor position, clamped to the new rows.
    pub fn apply(&mut self, view: RosterView) {
        self.view = view;
        self.cursor = self.cursor.min(self.row_count().saturating_sub(1));
    }

    /// Every participant row in render order, with its activity.
    pub fn rows(&self) -> impl Iterator<Item = (&ActivityCard, &ParticipantRow)> {
        self.view
            .cards()
            .iter()
            .flat_map(|card| card.participants.iter().map(move |row| (card, row)))
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<(&ActivityCard, &ParticipantRow)> {
        self.rows().nth(self.cursor)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let last = self.row_count().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }
}
