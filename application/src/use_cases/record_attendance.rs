//! Record Attendance use case
//!
//! Check-in and check-out for a meeting. A member counts as present from
//! check-in until check-out; checking in again after leaving starts a new
//! presence.

use crate::ports::clock::{Clock, SystemClock};
use crate::ports::events::{GovernanceEvent, GovernanceEventPublisher, NoEventPublisher};
use crate::ports::repository::{GovernanceRepository, RepositoryError};
use condo_domain::{Attendance, AttendanceKind, MeetingId, MemberId};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RecordAttendanceError {
    #[error("Unknown member: {0}")]
    UnknownMember(MemberId),

    #[error("Unknown meeting: {0}")]
    UnknownMeeting(MeetingId),

    #[error("Member {member} is not checked in to {meeting}")]
    NotCheckedIn { meeting: MeetingId, member: MemberId },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Use case for recording meeting attendance
pub struct RecordAttendanceUseCase<R: GovernanceRepository + 'static> {
    repository: Arc<R>,
    events: Arc<dyn GovernanceEventPublisher>,
    clock: Arc<dyn Clock>,
}

impl<R: GovernanceRepository + 'static> RecordAttendanceUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            events: Arc::new(NoEventPublisher),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn GovernanceEventPublisher>) -> Self {
        self.events = events;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Check a member in, snapshotting their current weight.
    ///
    /// A member who is already present keeps their original check-in.
    pub async fn check_in(
        &self,
        meeting: &MeetingId,
        member: &MemberId,
        kind: AttendanceKind,
    ) -> Result<Attendance, RecordAttendanceError> {
        if self.repository.meeting(meeting).await?.is_none() {
            return Err(RecordAttendanceError::UnknownMeeting(meeting.clone()));
        }
        let found = self
            .repository
            .member(member)
            .await?
            .ok_or_else(|| RecordAttendanceError::UnknownMember(member.clone()))?;

        if let Some(current) = self.current(meeting, member).await?
            && current.is_present()
        {
            return Ok(current);
        }

        let attendance =
            Attendance::check_in(meeting.clone(), member.clone(), self.clock.now(), found.weight)
                .with_kind(kind);
        self.repository.upsert_attendance(attendance.clone()).await?;
        info!("{} checked in to {} ({:?})", member, meeting, kind);

        self.events.publish(GovernanceEvent::AttendanceRecorded {
            attendance: attendance.clone(),
        });
        Ok(attendance)
    }

    /// Check a member out. Checking out twice keeps the first time.
    pub async fn check_out(
        &self,
        meeting: &MeetingId,
        member: &MemberId,
    ) -> Result<Attendance, RecordAttendanceError> {
        let mut attendance = self.current(meeting, member).await?.ok_or_else(|| {
            RecordAttendanceError::NotCheckedIn {
                meeting: meeting.clone(),
                member: member.clone(),
            }
        })?;

        attendance.check_out(self.clock.now());
        self.repository.upsert_attendance(attendance.clone()).await?;
        info!("{} checked out of {}", member, meeting);

        self.events.publish(GovernanceEvent::AttendanceRecorded {
            attendance: attendance.clone(),
        });
        Ok(attendance)
    }

    async fn current(
        &self,
        meeting: &MeetingId,
        member: &MemberId,
    ) -> Result<Option<Attendance>, RecordAttendanceError> {
        Ok(self
            .repository
            .attendance(meeting)
            .await?
            .into_iter()
            .find(|a| &a.member_id == member))
    }
}
