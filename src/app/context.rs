use crate::domain::entities::LoginRole;
use crate::domain::{AppError, Session};
use crate::ports::LicensingGateway;
use crate::services::BookingConfirmation;

/// Application context holding the gateway and the authenticated session.
///
/// The session is created by [`login`](AppContext::login) and dropped by
/// [`logout`](AppContext::logout); wizards receive it explicitly at
/// construction. The last booking confirmation is a single ephemeral slot
/// backing the booking-details screen, nothing more.
pub struct AppContext<G: LicensingGateway> {
    gateway: G,
    session: Option<Session>,
    last_booking: Option<BookingConfirmation>,
}

impl<G: LicensingGateway> AppContext<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway, session: None, last_booking: None }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The session, or `NotAuthenticated` for flows that need a login.
    pub fn require_session(&self) -> Result<&Session, AppError> {
        self.session.as_ref().ok_or(AppError::NotAuthenticated)
    }

    /// Check credentials against the backend and install the session.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        role: LoginRole,
    ) -> Result<&Session, AppError> {
        let user = self.gateway.login(email, password, role)?;
        Ok(self.session.insert(Session::from_login(user)))
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.last_booking = None;
    }

    /// Keep the most recent booking confirmation for the details screen.
    pub fn remember_booking(&mut self, confirmation: BookingConfirmation) {
        self.last_booking = Some(confirmation);
    }

    pub fn last_booking(&self) -> Option<&BookingConfirmation> {
        self.last_booking.as_ref()
    }
}
