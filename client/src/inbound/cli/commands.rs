//! Command execution against the session service and the API ports.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::info;

use super::render::{
    RETRY_HINT, connection_prompt, listing_detail, listing_line, meetup_line, university_line,
    user_summary,
};
use super::{Command, ListingCommand, ProfileCommand, RequestMeetupArgs};
use crate::domain::ports::{
    AccountsApi, AuthApi, BookListingsApi, MeetupsApi, PaymentsApi, TokenStore,
};
use crate::domain::{
    BookListing, BookListingDraft, BookListingId, Destination, Error, ListingAction,
    MeetupRequestId, NewMeetupRequest, PaymentIntentRequest, Platform, SessionService, User,
};

/// Failures surfaced by a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Domain(#[from] Error),
    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
}

/// Everything a command may touch.
pub struct Context<A, C, T> {
    pub session: SessionService<A, C, T>,
    pub accounts: Arc<C>,
    pub listings: Arc<dyn BookListingsApi>,
    pub meetups: Arc<dyn MeetupsApi>,
    pub payments: Arc<dyn PaymentsApi>,
    pub platform: Platform,
}

impl<A, C, T> Context<A, C, T> {
    fn require_user(&self) -> Result<User, Error> {
        self.session
            .current_user()
            .ok_or_else(|| Error::unauthorized("You are not signed in. Run `sign-in` first."))
    }
}

/// Run `command`, offering a retry whenever it fails after publishing a
/// connection error. A failure left over from an earlier action does not
/// count.
///
/// The prompt waits for a line on `input`; an empty line retries after
/// clearing the connection state, `q` or end of input gives up.
pub async fn run_with_retry<A, C, T, W, R>(
    command: &Command,
    ctx: &Context<A, C, T>,
    out: &mut W,
    input: &mut R,
) -> Result<(), CliError>
where
    A: AuthApi,
    C: AccountsApi,
    T: TokenStore,
    W: Write,
    R: BufRead,
{
    let mut published = ctx.session.state().subscribe_connection_error();
    loop {
        // Only a failure published by this attempt raises the prompt.
        published.mark_unchanged();
        let error = match run(command, ctx, out).await {
            Ok(()) => return Ok(()),
            Err(error) => error,
        };
        let connection = if published.has_changed().unwrap_or(false) {
            published.borrow_and_update().clone()
        } else {
            None
        };
        let Some(connection) = connection else {
            return Err(error);
        };

        writeln!(out, "{}", connection_prompt(&connection))?;
        writeln!(out, "{RETRY_HINT}")?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("q") {
            return Err(error);
        }
        ctx.session.state().clear_connection_error();
        info!(endpoint = %connection.endpoint, "retrying after connection error");
    }
}

/// Run one command and write its output.
pub async fn run<A, C, T, W>(
    command: &Command,
    ctx: &Context<A, C, T>,
    out: &mut W,
) -> Result<(), CliError>
where
    A: AuthApi,
    C: AccountsApi,
    T: TokenStore,
    W: Write,
{
    match command {
        Command::SignIn { username, password } => {
            let user = ctx.session.sign_in(username, password).await?;
            writeln!(out, "Signed in as {}.", user.display_name())?;
            write_next_step(ctx, out)?;
        }
        Command::SignUp(args) => {
            let user = ctx.session.sign_up(args.clone().into()).await?;
            writeln!(out, "Welcome, {}!", user.display_name())?;
            write_next_step(ctx, out)?;
        }
        Command::SignOut => {
            ctx.session.sign_out().await?;
            writeln!(out, "Signed out.")?;
        }
        Command::Whoami => match ctx.session.current_user() {
            Some(user) => writeln!(out, "{}", user_summary(&user))?,
            None => writeln!(out, "Not signed in.")?,
        },
        Command::SendCode => {
            let message = ctx.session.request_verification_code().await?;
            writeln!(out, "{message}")?;
        }
        Command::Verify { code } => {
            let user = ctx.session.confirm_verification(code).await?;
            if user.is_verified {
                writeln!(out, "Phone number verified.")?;
            } else {
                writeln!(out, "The code was accepted but the account is not verified yet.")?;
            }
        }
        Command::Universities => {
            let universities = ctx.accounts.list_universities().await.map_err(Error::from)?;
            for university in &universities {
                writeln!(out, "{}", university_line(university))?;
            }
        }
        Command::Search(args) => {
            let mut listings = ctx
                .listings
                .search_listings(&args.search())
                .await
                .map_err(Error::from)?;
            args.sort.apply(&mut listings);
            write_listings(out, &listings)?;
        }
        Command::Listing(listing) => run_listing(listing, ctx, out).await?,
        Command::Meetups => {
            let requests = ctx
                .meetups
                .list_meetup_requests()
                .await
                .map_err(Error::from)?;
            for (title, section) in [
                ("Requested by you", &requests.created_by_me),
                ("For your listings", &requests.for_my_listings),
                ("Scheduled", &requests.scheduled),
            ] {
                writeln!(out, "{title}:")?;
                if section.is_empty() {
                    writeln!(out, "  none")?;
                }
                for request in section {
                    writeln!(out, "  {}", meetup_line(request, ctx.platform))?;
                }
            }
        }
        Command::RequestMeetup(args) => request_meetup(args, ctx, out).await?,
        Command::AcceptMeetup { id } => accept_meetup(MeetupRequestId::new(*id), ctx, out).await?,
        Command::Profile(ProfileCommand::Update(args)) => {
            let user = ctx.session.update_profile(args.clone().into()).await?;
            writeln!(out, "Profile updated.")?;
            writeln!(out, "{}", user_summary(&user))?;
        }
    }
    Ok(())
}

fn write_next_step<A, C, T, W: Write>(ctx: &Context<A, C, T>, out: &mut W) -> io::Result<()> {
    match ctx.session.destination() {
        Destination::Verification => writeln!(
            out,
            "Verify your phone number to continue: run `send-code`, then `verify --code <code>`."
        ),
        Destination::Marketplace | Destination::Authentication => Ok(()),
    }
}

fn write_listings<W: Write>(out: &mut W, listings: &[BookListing]) -> io::Result<()> {
    if listings.is_empty() {
        return writeln!(out, "No listings found.");
    }
    for listing in listings {
        writeln!(out, "{}", listing_line(listing))?;
    }
    Ok(())
}

async fn run_listing<A, C, T, W>(
    command: &ListingCommand,
    ctx: &Context<A, C, T>,
    out: &mut W,
) -> Result<(), CliError>
where
    W: Write,
{
    match command {
        ListingCommand::Show { id } => {
            let listing = ctx
                .listings
                .get_listing(BookListingId::new(*id))
                .await
                .map_err(Error::from)?;
            writeln!(out, "{}", listing_detail(&listing))?;
            if let Some(user) = ctx.session.current_user() {
                match listing.action_for(user.id) {
                    ListingAction::Edit => {
                        writeln!(out, "You own this listing: `listing update {id}` to edit it.")?
                    }
                    ListingAction::RequestMeetup => writeln!(
                        out,
                        "Interested? `request-meetup --book {id} --at <time>` to meet the seller."
                    )?,
                }
            }
        }
        ListingCommand::Create(args) => {
            let submission = BookListingDraft::from(args.clone())
                .validate()
                .map_err(|errors| Error::validation(&errors))?;
            let listing = ctx
                .listings
                .create_listing(&submission)
                .await
                .map_err(Error::from)?;
            writeln!(out, "Listed {}", listing_line(&listing))?;
        }
        ListingCommand::Update { id, listing } => {
            let submission = BookListingDraft::from(listing.clone())
                .validate()
                .map_err(|errors| Error::validation(&errors))?;
            let updated = ctx
                .listings
                .update_listing(BookListingId::new(*id), &submission)
                .await
                .map_err(Error::from)?;
            writeln!(out, "Updated {}", listing_line(&updated))?;
        }
        ListingCommand::Mine => {
            let user = ctx.require_user()?;
            let listings = ctx
                .listings
                .owned_listings(user.id)
                .await
                .map_err(Error::from)?;
            write_listings(out, &listings)?;
        }
        ListingCommand::Purchased => {
            let user = ctx.require_user()?;
            let listings = ctx
                .listings
                .purchased_listings(user.id)
                .await
                .map_err(Error::from)?;
            write_listings(out, &listings)?;
        }
    }
    Ok(())
}

/// Create the connection-fee intent for `request`; the secret itself is
/// handed to a payment sheet in graphical front ends and never printed.
async fn pay_connection_fee<A, C, T, W: Write>(
    request: &PaymentIntentRequest,
    ctx: &Context<A, C, T>,
    out: &mut W,
) -> Result<(), CliError> {
    ctx.payments
        .create_payment_intent(request)
        .await
        .map_err(Error::from)?;
    writeln!(
        out,
        "Connection fee of ${}.{:02} authorised.",
        request.amount_cents / 100,
        request.amount_cents % 100
    )?;
    Ok(())
}

async fn request_meetup<A, C, T, W: Write>(
    args: &RequestMeetupArgs,
    ctx: &Context<A, C, T>,
    out: &mut W,
) -> Result<(), CliError> {
    ctx.require_user()?;
    let book_id = BookListingId::new(args.book);
    let location = args.location();
    pay_connection_fee(
        &PaymentIntentRequest::connection_fee(book_id, Some(location)),
        ctx,
        out,
    )
    .await?;

    let created = ctx
        .meetups
        .request_meetup(&NewMeetupRequest {
            book_id,
            location,
            meetup_time: args.at,
        })
        .await
        .map_err(Error::from)?;
    writeln!(out, "Requested {}", meetup_line(&created, ctx.platform))?;
    Ok(())
}

async fn accept_meetup<A, C, T, W: Write>(
    id: MeetupRequestId,
    ctx: &Context<A, C, T>,
    out: &mut W,
) -> Result<(), CliError> {
    ctx.require_user()?;
    let requests = ctx
        .meetups
        .list_meetup_requests()
        .await
        .map_err(Error::from)?;
    let pending = requests
        .for_my_listings
        .iter()
        .find(|request| request.id == id)
        .ok_or_else(|| {
            Error::not_found(format!("No pending meetup request #{id} for your listings."))
        })?;
    pay_connection_fee(
        &PaymentIntentRequest::connection_fee(pending.book_listing.id, pending.location()),
        ctx,
        out,
    )
    .await?;

    let accepted = ctx
        .meetups
        .accept_meetup_request(id)
        .await
        .map_err(Error::from)?;
    writeln!(out, "Accepted {}", meetup_line(&accepted, ctx.platform))?;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
