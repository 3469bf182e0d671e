//! Approve/reject workflow for event submissions.
//!
//! Unlike the directory there is no derived row; approval flips the status
//! and stamps the review time, and the public calendar picks the event up
//! from there. Notification email is fire-and-forget: a send failure never
//! rolls back the status change.

use tracing::{info, warn};

use crate::common::{ApiError, EventSubmissionId, ModerationStatus};
use crate::domains::events::models::EventSubmission;
use crate::kernel::ServerDeps;

/// Parse a raw path id, refusing anything that must not reach the store.
///
/// A broken upstream client occasionally serializes a missing id as the
/// literal string "undefined"; that (and the empty string, and anything that
/// is not a UUID) is rejected here before any query runs.
pub fn parse_event_submission_id(raw: &str) -> Result<EventSubmissionId, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" {
        return Err(ApiError::InvalidId(raw.to_string()));
    }
    EventSubmissionId::parse(trimmed).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Transition an event submission to approved or rejected.
pub async fn moderate_event_submission(
    raw_id: &str,
    status: ModerationStatus,
    send_email: bool,
    deps: &ServerDeps,
) -> Result<EventSubmission, ApiError> {
    let id = parse_event_submission_id(raw_id)?;

    if status == ModerationStatus::Pending {
        return Err(ApiError::Validation("status".to_string()));
    }

    let submission = EventSubmission::set_status(id, &status.to_string(), &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("event submission"))?;

    info!(
        submission_id = %submission.id,
        status = %submission.status,
        send_email,
        "Event submission moderated"
    );

    if send_email {
        let mailer = deps.mailer.clone();
        let to = submission.contact_email.clone();
        let title = submission.title.clone();
        let approved = status == ModerationStatus::Approved;

        tokio::spawn(async move {
            let (subject, body) = if approved {
                (
                    format!("Your event \"{}\" is on the calendar", title),
                    format!(
                        "Good news! \"{}\" was approved and now appears on the \
                         North Harbor events calendar.",
                        title
                    ),
                )
            } else {
                (
                    format!("About your event \"{}\"", title),
                    format!(
                        "Thanks for the submission. \"{}\" wasn't a fit for the \
                         North Harbor events calendar this time.",
                        title
                    ),
                )
            };

            if let Err(e) = mailer.send(&to, &subject, &body).await {
                warn!(error = %e, to = %to, "Moderation notification failed to send");
            }
        });
    }

    Ok(submission)
}
