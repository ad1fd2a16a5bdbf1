//! Roster Renderer: turns the activity collection into a view model.
//!
//! Every refresh builds a brand new [`RosterView`] from the fetched
//! collection, so a second render never duplicates cards, participants, or
//! selector options. Removal controls are decided per render from the
//! authentication state passed in at that moment.

use crate::activity::{Activities, Activity};
use crate::api::{ApiError, BoardApi};
use crate::session::{SessionStore, TokenStore};

pub const LOAD_FAILURE: &str = "Failed to load activities. Please try again later.";
pub const NO_PARTICIPANTS: &str = "No participants yet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub email: String,
    /// A removal control is attached to this row.
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantRow>,
}

impl ActivityCard {
    fn from_activity(activity: &Activity, authenticated: bool) -> Self {
        Self {
            name: activity.name.clone(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            participants: activity
                .participants
                .iter()
                .map(|email| ParticipantRow {
                    email: email.clone(),
                    removable: authenticated,
                })
                .collect(),
        }
    }

    pub fn availability(&self) -> String {
        format!("{} spots left", self.spots_left)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RosterView {
    /// Nothing fetched yet.
    #[default]
    Loading,
    Loaded {
        cards: Vec<ActivityCard>,
        /// Activity selector options, in roster order.
        options: Vec<String>,
    },
    /// The fetch failed; the whole roster is replaced by this message.
    Failed { message: String },
}

impl RosterView {
    pub fn cards(&self) -> &[ActivityCard] {
        match self {
            RosterView::Loaded { cards, .. } => cards,
            RosterView::Loading | RosterView::Failed { .. } => &[],
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            RosterView::Loaded { options, .. } => options,
            RosterView::Loading | RosterView::Failed { .. } => &[],
        }
    }

    /// Number of removal controls in this render.
    pub fn removal_controls(&self) -> usize {
        self.cards()
            .iter()
            .flat_map(|card| &card.participants)
            .filter(|row| row.removable)
            .count()
    }
}

/// Renders `activities` for the given authentication state.
pub fn build(activities: &Activities, authenticated: bool) -> RosterView {
    let cards: Vec<ActivityCard> = activities
        .iter()
        .map(|activity| ActivityCard::from_activity(activity, authenticated))
        .collect();
    let options = cards.iter().map(|card| card.name.clone()).collect();
    RosterView::Loaded { cards, options }
}

/// Renders a fetch result. Failure replaces the roster with a message.
pub fn settle(result: Result<Activities, ApiError>, authenticated: bool) -> RosterView {
    match result {
        Ok(activities) => {
            tracing::debug!(count = activities.len(), authenticated, "roster rendered");
            build(&activities, authenticated)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load activities");
            RosterView::Failed {
                message: LOAD_FAILURE.to_string(),
            }
        }
    }
}

/// Fetches the full collection and renders it against the current session.
pub async fn refresh<A: BoardApi, S: TokenStore>(
    api: &A,
    session: &SessionStore<S>,
) -> RosterView {
    let result = api.list_activities().await;
    settle(result, session.is_authenticated())
}
