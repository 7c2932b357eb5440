// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database entities (sea-orm models).

pub mod activity;
pub mod challenge;
pub mod challenge_participant;
pub mod challenge_progress_entry;
pub mod club;
pub mod club_admin;
pub mod club_member;
pub mod live_run_location;
pub mod live_run_session;
pub mod run;
pub mod scheduled_run;
pub mod scheduled_run_participant;
pub mod user;

pub mod prelude {
    pub use super::activity::Entity as Activity;
    pub use super::challenge::Entity as Challenge;
    pub use super::challenge_participant::Entity as ChallengeParticipant;
    pub use super::challenge_progress_entry::Entity as ChallengeProgressEntry;
    pub use super::club::Entity as Club;
    pub use super::club_admin::Entity as ClubAdmin;
    pub use super::club_member::Entity as ClubMember;
    pub use super::live_run_location::Entity as LiveRunLocation;
    pub use super::live_run_session::Entity as LiveRunSession;
    pub use super::run::Entity as Run;
    pub use super::scheduled_run::Entity as ScheduledRun;
    pub use super::scheduled_run_participant::Entity as ScheduledRunParticipant;
    pub use super::user::Entity as User;
}
