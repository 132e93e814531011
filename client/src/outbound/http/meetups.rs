//! Meetup request collections, proposals and acceptance.

use async_trait::async_trait;

use super::client::ApiClient;
use super::dto::{AcceptMeetupBody, MeetupRequestBody, MeetupRequestDto, MeetupRequestsDto};
use crate::domain::ports::{ApiError, MeetupsApi};
use crate::domain::{MeetupRequest, MeetupRequestId, MeetupRequests, NewMeetupRequest};

pub(super) const MY_MEETUP_REQUESTS_PATH: &str = "book_listings/my-meetup-requests/";
pub(super) const REQUEST_MEETUP_PATH: &str = "book_listings/request-meetup/";
pub(super) const ACCEPT_MEETUP_PATH: &str = "book_listings/accept-meetup-request/";

#[async_trait]
impl MeetupsApi for ApiClient {
    async fn list_meetup_requests(&self) -> Result<MeetupRequests, ApiError> {
        let requests: MeetupRequestsDto = self.get_json(MY_MEETUP_REQUESTS_PATH, &[]).await?;
        requests.into_domain().map_err(ApiError::decode)
    }

    async fn request_meetup(&self, request: &NewMeetupRequest) -> Result<MeetupRequest, ApiError> {
        let body = MeetupRequestBody::from(request);
        let created: MeetupRequestDto = self.post_json(REQUEST_MEETUP_PATH, &body).await?;
        created.into_domain().map_err(ApiError::decode)
    }

    async fn accept_meetup_request(&self, id: MeetupRequestId) -> Result<MeetupRequest, ApiError> {
        let body = AcceptMeetupBody {
            meetup_request_id: id.get(),
        };
        let accepted: MeetupRequestDto = self.post_json(ACCEPT_MEETUP_PATH, &body).await?;
        accepted.into_domain().map_err(ApiError::decode)
    }
}
