//! Licensing backend port definition.

use crate::domain::AppError;
use crate::domain::entities::{
    Applicant, ApplicantStatus, AppointmentOrder, AuthenticatedUser, DiscOrder, EntityKind,
    LoginRole, NewApplicant, NewVehicle, Payment, PaymentOrder, TestAppointment, TrafficTicket,
    Vehicle, VehicleDisc,
};

/// Port for every operation the wizards and the back office perform against
/// the licensing backend.
///
/// All operations are request/response; transport failures and structured
/// server errors are normalized by the adapter into
/// [`AppError::Gateway`](crate::domain::AppError::Gateway) before they reach
/// callers. Nothing here retries; a failed call is surfaced to the user and
/// only re-triggered explicitly.
pub trait LicensingGateway {
    /// Register a new applicant.
    fn create_applicant(&self, applicant: &NewApplicant) -> Result<Applicant, AppError>;

    /// Check credentials against the applicant or admin login endpoint.
    ///
    /// Rejected credentials come back as
    /// [`AppError::InvalidCredentials`](crate::domain::AppError::InvalidCredentials).
    fn login(
        &self,
        email: &str,
        password: &str,
        role: LoginRole,
    ) -> Result<AuthenticatedUser, AppError>;

    /// Register a vehicle for the owning applicant.
    ///
    /// Fails fast with [`AppError::NotAuthenticated`](crate::domain::AppError::NotAuthenticated)
    /// when the payload carries no owner id; no request is sent in that case.
    fn register_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError>;

    /// Create a disc for a vehicle, or renew one when the order carries a
    /// disc id.
    fn create_vehicle_disc(&self, order: &DiscOrder) -> Result<VehicleDisc, AppError>;

    /// Record a standalone payment (traffic tickets).
    fn create_payment(&self, order: &PaymentOrder) -> Result<Payment, AppError>;

    /// Create a test appointment together with its nested payment, in one
    /// call. Failures carry the backend's structured error.
    fn create_test_appointment(
        &self,
        order: &AppointmentOrder,
    ) -> Result<TestAppointment, AppError>;

    /// All bookings made by one applicant.
    fn bookings_for_applicant(&self, applicant_id: u64) -> Result<Vec<TestAppointment>, AppError>;

    /// All vehicles owned by one applicant.
    fn vehicles_for_applicant(&self, applicant_id: u64) -> Result<Vec<Vehicle>, AppError>;

    /// Vehicles the backend considers candidates for disc renewal.
    fn expired_vehicles(&self) -> Result<Vec<Vehicle>, AppError>;

    /// Look up an outstanding traffic ticket by its number.
    fn find_ticket(&self, ticket_number: &str) -> Result<TrafficTicket, AppError>;

    /// Admin: delete a record of the given kind.
    fn delete_entity(&self, kind: EntityKind, id: u64) -> Result<(), AppError>;

    /// Admin: set an applicant's review status, with an optional reason.
    fn update_applicant_status(
        &self,
        id: u64,
        status: ApplicantStatus,
        reason: Option<&str>,
    ) -> Result<(), AppError>;
}
