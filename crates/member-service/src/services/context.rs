//! Service context - dependency container for services
//!
//! Holds the repository, the notifier, and the settings services need.

use std::sync::Arc;

use member_core::traits::MemberRepository;
use member_core::PhoneRegion;

use crate::notifier::Notifier;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; everything behind it is shared.
#[derive(Clone)]
pub struct ServiceContext {
    member_repo: Arc<dyn MemberRepository>,
    notifier: Notifier,
    phone_region: PhoneRegion,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(member_repo: Arc<dyn MemberRepository>, notifier: Notifier, phone_region: PhoneRegion) -> Self {
        Self {
            member_repo,
            notifier,
            phone_region,
        }
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the registration notifier
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Region used for numbers without a country prefix
    pub fn phone_region(&self) -> PhoneRegion {
        self.phone_region
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("member_repo", &"...")
            .field("notifier", &self.notifier)
            .field("phone_region", &self.phone_region)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    notifier: Option<Notifier>,
    phone_region: Option<PhoneRegion>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn phone_region(mut self, region: PhoneRegion) -> Self {
        self.phone_region = Some(region);
        self
    }

    /// Build the ServiceContext
    ///
    /// The phone region defaults to Singapore.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.member_repo
                .ok_or_else(|| ServiceError::internal("member_repo is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::internal("notifier is required"))?,
            self.phone_region.unwrap_or_default(),
        ))
    }
}
