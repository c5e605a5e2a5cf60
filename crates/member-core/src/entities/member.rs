//! Member entity - represents a registered member record

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Stored member record
///
/// Every string field has already been through the sanitizer; `phone` is
/// either absent or in canonical E.164 form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub is_employee: bool,
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Get the member's full name: "first last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Canonical member data awaiting persistence
///
/// Produced by the sanitization step; `id` and `created_at` are assigned by
/// the repository at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub is_employee: bool,
}

impl NewMember {
    /// Assign a fresh random id and the current UTC instant
    pub fn into_member(self) -> Member {
        self.into_member_with(Uuid::new_v4(), Utc::now())
    }

    /// Assign an explicit id and creation time (seed data, tests)
    pub fn into_member_with(self, id: Uuid, created_at: DateTime<Utc>) -> Member {
        Member {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            age: self.age,
            is_employee: self.is_employee,
            created_at,
        }
    }
}

/// Exact-match filter for listing members
///
/// Each populated field must equal the member's field (case-sensitive).
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl MemberFilter {
    /// Check if no filter field is set
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }

    /// Check whether a member satisfies every populated field
    pub fn matches(&self, member: &Member) -> bool {
        self.first_name
            .as_deref()
            .is_none_or(|name| member.first_name == name)
            && self
                .last_name
                .as_deref()
                .is_none_or(|name| member.last_name == name)
    }
}
