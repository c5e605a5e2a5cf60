//! In-memory fakes of the repository and email ports
//!
//! Compiled for unit tests and behind the `testing` feature for the
//! end-to-end suite.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use member_core::entities::{Member, MemberFilter, NewMember};
use member_core::error::DomainError;
use member_core::traits::{MemberRepository, RepoResult};
use member_core::{EmailMessage, EmailSender, MailError};

/// `MemberRepository` over a vector, with the same uniqueness rule as the
/// database
#[derive(Debug, Default)]
pub struct InMemoryMemberRepository {
    members: RwLock<Vec<Member>>,
    unavailable: AtomicBool,
}

impl InMemoryMemberRepository {
    pub fn with_members(members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            members: RwLock::new(members.into_iter().collect()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Member> {
        self.members.read().clone()
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        self.check_available()?;

        let mut members = self.members.write();
        if members.iter().any(|m| m.email == member.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let created = member.clone().into_member();
        members.push(created.clone());
        Ok(created)
    }

    async fn list(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>> {
        self.check_available()?;
        Ok(self
            .members
            .read()
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>> {
        self.check_available()?;
        Ok(self.members.read().iter().find(|m| m.id == id).cloned())
    }

    async fn count(&self) -> RepoResult<i64> {
        self.check_available()?;
        Ok(self.members.read().len() as i64)
    }
}

/// `EmailSender` that records messages instead of delivering them
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<EmailMessage>>,
    fail: bool,
}

impl RecordingSender {
    /// A sender whose provider rejects every message
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, message: &EmailMessage) -> Result<String, MailError> {
        if self.fail {
            return Err(MailError::Rejected("Email address is not verified".to_string()));
        }

        let mut sent = self.sent.lock();
        sent.push(message.clone());
        Ok(format!("test-message-{}", sent.len()))
    }
}
