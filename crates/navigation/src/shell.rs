//! Authenticated application shell: owns the current page.
//!
//! Events drive the shell synchronously:
//!
//! | Event | Effect on `current_page` |
//! |-------|--------------------------|
//! | bootstrap / login success | landing page (resolved once per handoff) |
//! | bootstrap / login failure | reset to fallback, signed out |
//! | permission refresh | unchanged; map rebuilt, guard corrects on next render |
//! | navigation click | set directly |
//! | logout | reset to fallback |
//!
//! [`AppShell::render`] resolves first and commits second: it returns the
//! authorized page and stores it as current in the same call, so no
//! placeholder view is ever needed.

use chrono::{DateTime, Utc};

use dashgate_auth::{
    Organization, SessionError, SessionPayload, User, can_access_department, explain_department,
    has_permission,
};
use dashgate_core::PageId;

use crate::config::DeploymentConfig;
use crate::guard::{GuardDecision, PageGuard};
use crate::landing::LandingSource;
use crate::map::NavigationMap;

/// Which collaborator produced a session payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// Stored token resolved on startup.
    Bootstrap,
    /// Credentials exchanged through the login form.
    Login,
}

impl core::fmt::Display for Handoff {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Handoff::Bootstrap => write!(f, "bootstrap"),
            Handoff::Login => write!(f, "login"),
        }
    }
}

/// What the shell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellView {
    /// Unauthenticated: the external sign-in view.
    SignIn,
    Page(PageId),
}

/// An established session and the navigation map derived from its user.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
    organization: Organization,
    navigation: NavigationMap,
    authenticated_at: DateTime<Utc>,
    refreshed_at: DateTime<Utc>,
}

impl Session {
    fn establish(payload: SessionPayload, now: DateTime<Utc>) -> Self {
        let (user, organization) = payload.into_parts();
        let navigation = NavigationMap::build(&user);
        Self {
            user,
            organization,
            navigation,
            authenticated_at: now,
            refreshed_at: now,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn navigation(&self) -> &NavigationMap {
        &self.navigation
    }

    pub fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }
}

/// Shell state for one deployment.
#[derive(Debug, Clone)]
pub struct AppShell {
    config: DeploymentConfig,
    session: Option<Session>,
    current_page: PageId,
}

impl AppShell {
    /// Signed out, current page at the deployment fallback.
    pub fn new(config: DeploymentConfig) -> Self {
        let current_page = config.fallback().clone();
        Self {
            config,
            session: None,
            current_page,
        }
    }

    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_page(&self) -> &PageId {
        &self.current_page
    }

    /// The active navigation map; `None` when signed out.
    pub fn navigation(&self) -> Option<&NavigationMap> {
        self.session.as_ref().map(Session::navigation)
    }

    /// Result of session bootstrap (stored token validation).
    pub fn complete_bootstrap(
        &mut self,
        result: Result<SessionPayload, SessionError>,
    ) -> Result<PageId, SessionError> {
        self.complete(Handoff::Bootstrap, result, Utc::now())
    }

    /// Result of a credential exchange.
    pub fn complete_login(
        &mut self,
        result: Result<SessionPayload, SessionError>,
    ) -> Result<PageId, SessionError> {
        self.complete(Handoff::Login, result, Utc::now())
    }

    /// Establish the session, build the map once and land once.
    pub fn complete(
        &mut self,
        handoff: Handoff,
        result: Result<SessionPayload, SessionError>,
        now: DateTime<Utc>,
    ) -> Result<PageId, SessionError> {
        let payload = match result {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%handoff, error = %err, "session handoff failed");
                self.sign_out();
                return Err(err);
            }
        };

        let session = Session::establish(payload, now);
        let landing = self.config.resolve_landing(&session.navigation);
        tracing::info!(
            %handoff,
            deployment = self.config.name(),
            user_id = %session.user.id,
            organization_id = %session.organization.id,
            landing = %landing.page,
            source = ?landing.source,
            "session established"
        );
        if landing.source == LandingSource::Fallback {
            tracing::warn!(
                %handoff,
                user_id = %session.user.id,
                fallback = %landing.page,
                "no enabled pages for user; landed on unvalidated fallback"
            );
        }

        self.current_page = landing.page.clone();
        self.session = Some(session);
        Ok(landing.page)
    }

    /// Replace the user after a permission payload refresh.
    ///
    /// The map is rebuilt from the new user; the current page is left for the
    /// guard to re-check on the next render.
    pub fn refresh_permissions(&mut self, payload: SessionPayload) -> Result<(), SessionError> {
        self.refresh_permissions_at(payload, Utc::now())
    }

    pub fn refresh_permissions_at(
        &mut self,
        payload: SessionPayload,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let Some(current) = self.session.take() else {
            return Err(SessionError::Rejected(
                "permission refresh without an active session".to_string(),
            ));
        };

        let mut session = Session::establish(payload, now);
        session.authenticated_at = current.authenticated_at;
        tracing::info!(
            user_id = %session.user.id,
            enabled_before = current.navigation.enabled_count(),
            enabled_after = session.navigation.enabled_count(),
            "navigation rebuilt after permission refresh"
        );
        self.session = Some(session);
        Ok(())
    }

    /// User-initiated navigation. No resolution happens here.
    pub fn navigate(&mut self, page: PageId) {
        tracing::debug!(from = %self.current_page, to = %page, "navigate");
        self.current_page = page;
    }

    pub fn logout(&mut self) {
        if let Some(session) = &self.session {
            tracing::info!(user_id = %session.user.id, "logout");
        }
        self.sign_out();
    }

    fn sign_out(&mut self) {
        self.session = None;
        self.current_page = self.config.fallback().clone();
    }

    /// Raw guard decision for the current page, for hosts that render a safe
    /// view this pass and apply [`GuardDecision::correction`] on the next.
    /// `None` when signed out.
    pub fn evaluate(&self) -> Option<GuardDecision> {
        let session = self.session.as_ref()?;
        Some(PageGuard::new(&self.config).evaluate(&self.current_page, &session.navigation))
    }

    /// Resolve the page to show and commit it as current.
    ///
    /// Calling this again without changing inputs returns the same view and
    /// leaves state untouched.
    pub fn render(&mut self) -> ShellView {
        let Some(decision) = self.evaluate() else {
            return ShellView::SignIn;
        };
        if let Some(target) = decision.correction() {
            self.current_page = target.clone();
        }
        ShellView::Page(self.current_page.clone())
    }

    /// Enabled pages in menu order; empty when signed out.
    pub fn menu(&self) -> Vec<&PageId> {
        self.navigation()
            .map(|map| map.enabled_pages().collect())
            .unwrap_or_default()
    }

    pub fn has_permission(&self, name: &str) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| has_permission(&s.user.permissions, name))
    }

    /// Whether a department tab is visible. Denials are logged with their explanation.
    pub fn can_access_department(&self, name: &str) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let user = &session.user;
        let granted = can_access_department(&user.accessible_departments, name, &user.permissions);
        if !granted {
            let explanation = explain_department(user, name);
            tracing::debug!(
                user_id = %user.id,
                department = name,
                reason = %explanation.reason,
                "department hidden"
            );
        }
        granted
    }
}
