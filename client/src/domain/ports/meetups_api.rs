//! Driven port for the meetup-request lifecycle.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{MeetupRequest, MeetupRequestId, MeetupRequests, NewMeetupRequest};

/// Port for the meetup-request endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetupsApi: Send + Sync {
    /// The three meetup collections of the bearer.
    async fn list_meetup_requests(&self) -> Result<MeetupRequests, ApiError>;

    /// Propose a meetup about a listing. The request starts out pending.
    async fn request_meetup(&self, request: &NewMeetupRequest) -> Result<MeetupRequest, ApiError>;

    /// Accept a request made against one of the bearer's listings.
    async fn accept_meetup_request(&self, id: MeetupRequestId) -> Result<MeetupRequest, ApiError>;
}
