use async_trait::async_trait;
use crate::models::{Launchpad, UpcomingLaunch};
use crate::repository::CollaboratorResult;

/// External launch provider (SpaceX) whose schedule takes priority over ours.
#[async_trait]
pub trait LaunchProvider: Send + Sync {
    /// Every launchpad the provider currently knows about
    async fn list_launchpads(&self) -> CollaboratorResult<Vec<Launchpad>>;

    /// Missions already scheduled by the provider
    async fn list_upcoming_launches(&self) -> CollaboratorResult<Vec<UpcomingLaunch>>;
}
