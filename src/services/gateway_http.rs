//! Licensing backend client implementation using reqwest.

use std::time::Duration;

use chrono::NaiveDate;
use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::entities::{
    Address, Applicant, ApplicantStatus, AppointmentOrder, AuthenticatedUser, Contact, DiscOrder,
    EntityKind, LoginRole, NewApplicant, NewVehicle, Payment, PaymentOrder, TestAppointment,
    TrafficTicket, Vehicle, VehicleDisc,
};
use crate::domain::{AppError, GatewayConfig};
use crate::ports::LicensingGateway;

const DEFAULT_STATUS_MESSAGE: &str = "Licensing API request failed";

/// HTTP transport for the licensing backend.
///
/// One request per call, no automatic retries: a failed submission returns
/// to its wizard and is only re-sent when the user retries.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: Url,
    client: Client,
}

impl HttpGateway {
    /// Create a new HTTP gateway from validated configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::gateway(format!("Failed to create HTTP client: {}", e), None))?;

        // Joining relative endpoint paths drops the last path segment unless
        // the base ends with a slash.
        let mut base_url = config.api_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::gateway(format!("Invalid endpoint '{}': {}", path, e), None))
    }

    fn post<B, R>(&self, path: &str, body: &B) -> Result<R, AppError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {url}");
        let response = self.client.post(url).json(body).send().map_err(transport_error)?;
        read_json(response)
    }

    fn put<B>(&self, path: &str, body: &B) -> Result<(), AppError>
    where
        B: Serialize,
    {
        let url = self.endpoint(path)?;
        debug!("PUT {url}");
        let response = self.client.put(url).json(body).send().map_err(transport_error)?;
        read_unit(response)
    }

    fn get<R>(&self, path: &str) -> Result<R, AppError>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("GET {url}");
        let response = self.client.get(url).send().map_err(transport_error)?;
        read_json(response)
    }

    fn delete(&self, path: &str) -> Result<(), AppError> {
        let url = self.endpoint(path)?;
        debug!("DELETE {url}");
        let response = self.client.delete(url).send().map_err(transport_error)?;
        read_unit(response)
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    AppError::gateway(format!("HTTP request failed: {}", err), None)
}

fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, AppError> {
    let status = response.status();
    let body_text = response.text().unwrap_or_default();

    if status.is_success() {
        return serde_json::from_str(&body_text).map_err(|e| {
            AppError::gateway(format!("Failed to parse response: {}", e), Some(status.as_u16()))
        });
    }

    Err(status_error(status, &body_text))
}

fn read_unit(response: Response) -> Result<(), AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body_text = response.text().unwrap_or_default();
    Err(status_error(status, &body_text))
}

/// Collapse every failure shape the backend produces into one message.
fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = extract_error_message(body).unwrap_or_else(|| {
        if !body.trim().is_empty() {
            body.to_string()
        } else if status.is_server_error() {
            "Server error".to_string()
        } else {
            DEFAULT_STATUS_MESSAGE.to_string()
        }
    });

    AppError::gateway(message, Some(status.as_u16()))
}

/// Pull a human-readable message out of a structured error body.
///
/// Understands `{"error":{"message":…}}`, `{"message":…}` and the Spring
/// `{"status":…,"error":…}` shape.
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    if let Some(msg) = parsed.get("message").and_then(|message| message.as_str()) {
        return Some(msg.to_string());
    }

    if let (Some(status), Some(error)) = (
        parsed.get("status").and_then(|status| status.as_u64()),
        parsed.get("error").and_then(|error| error.as_str()),
    ) {
        return Some(format!("Server Error {}: {}", status, error));
    }

    None
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    contact: LoginContact<'a>,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginContact<'a> {
    email: &'a str,
}

/// Login response as the backend actually sends it: the id field name has
/// drifted across backend versions, so both spellings are accepted here and
/// nowhere else.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginWire {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    user_id: Option<u64>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl LoginWire {
    fn normalize(self, role: LoginRole) -> Result<AuthenticatedUser, AppError> {
        let user_id = self
            .user_id
            .or(self.id)
            .ok_or_else(|| AppError::gateway("No user data returned", None))?;
        let first_name =
            self.first_name.ok_or_else(|| AppError::gateway("No user data returned", None))?;

        Ok(AuthenticatedUser {
            user_id,
            first_name,
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            role,
        })
    }
}

/// Created-applicant response; same id-field drift as [`LoginWire`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicantWire {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    user_id: Option<u64>,
    first_name: String,
    last_name: String,
    id_number: String,
    birth_date: NaiveDate,
    contact: Contact,
    address: Address,
    #[serde(default)]
    status: Option<ApplicantStatus>,
    #[serde(default)]
    reason: Option<String>,
}

impl ApplicantWire {
    fn normalize(self) -> Result<Applicant, AppError> {
        let id =
            self.id.or(self.user_id).ok_or_else(|| AppError::gateway("No applicant id in response", None))?;

        Ok(Applicant {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            id_number: self.id_number,
            birth_date: self.birth_date,
            contact: self.contact,
            address: self.address,
            status: self.status.unwrap_or(ApplicantStatus::Pending),
            reason: self.reason,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusUpdateRequest<'a> {
    status: ApplicantStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl LicensingGateway for HttpGateway {
    fn create_applicant(&self, applicant: &NewApplicant) -> Result<Applicant, AppError> {
        let wire: ApplicantWire = self.post("applicants/create", applicant)?;
        wire.normalize()
    }

    fn login(
        &self,
        email: &str,
        password: &str,
        role: LoginRole,
    ) -> Result<AuthenticatedUser, AppError> {
        let path = match role {
            LoginRole::Applicant => "applicants/login",
            LoginRole::Admin => "admin/login",
        };
        let request = LoginRequest { contact: LoginContact { email }, password };

        let wire: LoginWire = match self.post(path, &request) {
            Ok(wire) => wire,
            Err(AppError::Gateway { status: Some(401 | 403), .. }) => {
                return Err(AppError::InvalidCredentials);
            }
            Err(other) => return Err(other),
        };

        wire.normalize(role)
    }

    fn register_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        if vehicle.owner_id.is_none() {
            return Err(AppError::NotAuthenticated);
        }
        self.post("vehicle/create", vehicle)
    }

    fn create_vehicle_disc(&self, order: &DiscOrder) -> Result<VehicleDisc, AppError> {
        self.post("vehicledisc/create", order)
    }

    fn create_payment(&self, order: &PaymentOrder) -> Result<Payment, AppError> {
        self.post("payment/create", order)
    }

    fn create_test_appointment(
        &self,
        order: &AppointmentOrder,
    ) -> Result<TestAppointment, AppError> {
        self.post("testappointment/create", order)
    }

    fn bookings_for_applicant(&self, applicant_id: u64) -> Result<Vec<TestAppointment>, AppError> {
        self.get(&format!("testappointment/applicant/{}", applicant_id))
    }

    fn vehicles_for_applicant(&self, applicant_id: u64) -> Result<Vec<Vehicle>, AppError> {
        self.get(&format!("vehicle/applicant/{}", applicant_id))
    }

    fn expired_vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        self.get("vehicle/expired")
    }

    fn find_ticket(&self, ticket_number: &str) -> Result<TrafficTicket, AppError> {
        match self.get(&format!("ticket/{}", ticket_number)) {
            Err(AppError::Gateway { status: Some(404), .. }) => {
                Err(AppError::TicketNotFound(ticket_number.to_string()))
            }
            other => other,
        }
    }

    fn delete_entity(&self, kind: EntityKind, id: u64) -> Result<(), AppError> {
        self.delete(&format!("{}/delete/{}", kind.path_segment(), id))
    }

    fn update_applicant_status(
        &self,
        id: u64,
        status: ApplicantStatus,
        reason: Option<&str>,
    ) -> Result<(), AppError> {
        self.put(&format!("applicants/{}/status", id), &StatusUpdateRequest { status, reason })
    }
}
