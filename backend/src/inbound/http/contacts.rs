//! Contact CRUD and moderation endpoints.
//!
//! ```text
//! GET    /api/v1/contacts?limit=25&cursor=...
//! POST   /api/v1/contacts {"name":"Debra Garcia","address":"1234 Main St", ...}
//! GET    /api/v1/contacts/{id}
//! PUT    /api/v1/contacts/{id}
//! DELETE /api/v1/contacts/{id}
//! POST   /api/v1/contacts/{id}/approve
//! POST   /api/v1/contacts/{id}/reject
//! ```
//!
//! Handlers translate between the JSON wire shapes and the domain ports.
//! Visibility and permission checks live behind the ports, so a handler
//! only establishes who is asking and maps the result; it never inspects
//! roles itself. Pages are forward-only: the response carries an opaque
//! cursor and an RFC 5988 `Link` header pointing at the next slice.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::{Cursor, Page, PageLimits, next_link};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::domain::ports::{ContactPageKey, ContactPageRequest};
use crate::domain::{Contact, ContactDetails, ContactId, ContactValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_cursor_error, parse_uuid};

/// Page-size policy for the contact listing.
const CONTACT_PAGE_LIMITS: PageLimits = PageLimits::new(25, 100);

/// Request body shared by `POST /api/v1/contacts` and `PUT /api/v1/contacts/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    /// Contact name shown on the card.
    #[schema(example = "Debra Garcia")]
    pub name: String,
    /// Street address line.
    #[schema(example = "1234 Main St")]
    pub address: String,
    /// City name.
    #[schema(example = "Redmond")]
    pub city: String,
    /// State or region name.
    #[schema(example = "WA")]
    pub state: String,
    /// Postal code.
    #[schema(example = "10999")]
    pub zip: String,
    /// Email address.
    #[schema(example = "debra@example.com")]
    pub email: String,
}

impl TryFrom<ContactRequest> for ContactDetails {
    type Error = ContactValidationError;

    fn try_from(value: ContactRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            value.name,
            value.address,
            value.city,
            value.state,
            value.zip,
            value.email,
        )
    }
}

/// Contact payload returned by every contact endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    /// Stable contact identifier.
    #[schema(example = "9b2f1d34-0c4e-4a7b-9c3d-2f6a8e5b7c10")]
    pub id: String,
    /// Identifier of the owning user.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub owner_id: String,
    /// Contact name shown on the card.
    #[schema(example = "Debra Garcia")]
    pub name: String,
    /// Street address line.
    #[schema(example = "1234 Main St")]
    pub address: String,
    /// City name.
    #[schema(example = "Redmond")]
    pub city: String,
    /// State or region name.
    #[schema(example = "WA")]
    pub state: String,
    /// Postal code.
    #[schema(example = "10999")]
    pub zip: String,
    /// Email address.
    #[schema(example = "debra@example.com")]
    pub email: String,
    /// Workflow status: `submitted`, `approved`, or `rejected`.
    #[schema(example = "submitted")]
    pub status: String,
    /// Creation timestamp.
    #[schema(value_type = String, example = "2026-01-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    #[schema(value_type = String, example = "2026-01-15T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id().to_string(),
            owner_id: contact.owner_id().to_string(),
            name: contact.details().name().to_owned(),
            address: contact.details().address().to_owned(),
            city: contact.details().city().to_owned(),
            state: contact.details().state().to_owned(),
            zip: contact.details().zip().to_owned(),
            email: contact.details().email().to_owned(),
            status: contact.status().as_str().to_owned(),
            created_at: contact.created_at(),
            updated_at: contact.updated_at(),
        }
    }
}

/// Query parameters accepted by the contact listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ContactPageQuery {
    /// Requested page size; clamped to the endpoint maximum.
    pub limit: Option<usize>,
    /// Continuation token from the previous page.
    pub cursor: Option<String>,
}

/// Payload inside the opaque listing cursor.
///
/// The wire token is base64 over this JSON shape; changing the fields is a
/// compatible evolution because stale tokens fail decoding and surface as
/// `invalid_request` rather than mis-paginating.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContactCursor {
    created_at: DateTime<Utc>,
    id: ContactId,
}

impl From<ContactPageKey> for ContactCursor {
    fn from(key: ContactPageKey) -> Self {
        Self {
            created_at: key.created_at,
            id: key.id,
        }
    }
}

impl From<ContactCursor> for ContactPageKey {
    fn from(cursor: ContactCursor) -> Self {
        Self {
            created_at: cursor.created_at,
            id: cursor.id,
        }
    }
}

/// List the contacts visible to the session user.
///
/// Members see approved contacts plus their own; administrators and
/// managers see everything. Results are ordered by creation time and
/// paginate forwards only.
///
/// # Errors
/// Returns 400 for an unreadable cursor, 401 without a session, and 503
/// when the contact store is unreachable.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    params(ContactPageQuery),
    responses(
        (status = 200, description = "One page of visible contacts", body = [ContactResponse]),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ContactPageQuery>,
    request: HttpRequest,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let ContactPageQuery { limit, cursor } = query.into_inner();
    let limit = CONTACT_PAGE_LIMITS.clamp(limit);
    let after = cursor.as_deref().map(decode_cursor).transpose()?;

    let page = state
        .contacts_query
        .list_contacts(&user_id, ContactPageRequest { after, limit })
        .await?;

    let next_cursor = page
        .next
        .map(|key| Cursor::encode(&ContactCursor::from(key)))
        .transpose()
        .map_err(|err| Error::internal(format!("failed to encode page cursor: {err}")))?;

    let mut builder = HttpResponse::Ok();
    builder.insert_header(private_no_cache_header());
    if let Some(cursor) = &next_cursor {
        if let Some(request_url) = request_url(&request) {
            builder.insert_header((header::LINK, next_link(&request_url, cursor)));
        }
    }

    let items = page
        .contacts
        .into_iter()
        .map(ContactResponse::from)
        .collect();
    Ok(builder.json(Page::new(items, next_cursor)))
}

/// Create a contact owned by the session user.
///
/// New contacts always enter the workflow as submitted, whatever roles the
/// caller holds.
///
/// # Errors
/// Returns 400 for payload validation failures, 401 without a session, and
/// 503 when the contact store is unreachable.
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Contact created as a submission", body = ContactResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let details =
        ContactDetails::try_from(payload.into_inner()).map_err(map_contact_validation_error)?;

    let contact = state.contacts.create(&user_id, details).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(contact)))
}

/// Fetch a single contact.
///
/// # Errors
/// Returns 400 for a malformed identifier, 401 without a session, 403 when
/// the contact exists but is not visible to the caller, 404 when it does
/// not exist, and 503 when the contact store is unreachable.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "The requested contact", body = ContactResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Forbidden", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let contact_id = parse_contact_id(&path.into_inner())?;

    let contact = state
        .contacts_query
        .fetch_contact(&user_id, &contact_id)
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(ContactResponse::from(contact)))
}

/// Replace the display fields of a contact.
///
/// Editing an approved contact withdraws the approval unless the editor
/// could have approved it themselves; the response carries the resulting
/// status.
///
/// # Errors
/// Returns 400 for payload or identifier validation failures, 401 without a
/// session, 403 when the caller may not edit this contact, 404 when it
/// does not exist, and 503 when the contact store is unreachable.
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier")),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "The updated contact", body = ContactResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Forbidden", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let contact_id = parse_contact_id(&path.into_inner())?;
    let details =
        ContactDetails::try_from(payload.into_inner()).map_err(map_contact_validation_error)?;

    let contact = state
        .contacts
        .update(&user_id, &contact_id, details)
        .await?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

/// Delete a contact.
///
/// # Errors
/// Returns 400 for a malformed identifier, 401 without a session, 403 when
/// the caller may not delete this contact, 404 when it does not exist, and
/// 503 when the contact store is unreachable.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Forbidden", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let contact_id = parse_contact_id(&path.into_inner())?;

    state.contacts.delete(&user_id, &contact_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Approve a submitted or rejected contact.
///
/// # Errors
/// Returns 400 for a malformed identifier, 401 without a session, 403
/// without the approval permission, 404 when the contact does not exist,
/// 409 when it is already approved, and 503 when the contact store is
/// unreachable.
#[utoipa::path(
    post,
    path = "/api/v1/contacts/{id}/approve",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "The approved contact", body = ContactResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Forbidden", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Already in the requested status", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "approveContact"
)]
#[post("/contacts/{id}/approve")]
pub async fn approve_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let contact_id = parse_contact_id(&path.into_inner())?;

    let contact = state.contacts.approve(&user_id, &contact_id).await?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

/// Reject a submitted or approved contact.
///
/// # Errors
/// Returns 400 for a malformed identifier, 401 without a session, 403
/// without the rejection permission, 404 when the contact does not exist,
/// 409 when it is already rejected, and 503 when the contact store is
/// unreachable.
#[utoipa::path(
    post,
    path = "/api/v1/contacts/{id}/reject",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "The rejected contact", body = ContactResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 403, description = "Forbidden", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Already in the requested status", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "rejectContact"
)]
#[post("/contacts/{id}/reject")]
pub async fn reject_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let contact_id = parse_contact_id(&path.into_inner())?;

    let contact = state.contacts.reject(&user_id, &contact_id).await?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

fn parse_contact_id(raw: &str) -> Result<ContactId, Error> {
    parse_uuid(raw, FieldName::new("contact_id")).map(ContactId::from_uuid)
}

fn decode_cursor(raw: &str) -> Result<ContactPageKey, Error> {
    let payload: ContactCursor = Cursor::from_raw(raw)
        .decode()
        .map_err(|_| invalid_cursor_error(FieldName::new("cursor"), raw))?;
    Ok(payload.into())
}

/// Reconstruct the request URL for the `Link` header.
///
/// Falls back to `None` when the connection metadata does not form a valid
/// URL; the response then simply omits the header.
fn request_url(request: &HttpRequest) -> Option<Url> {
    let info = request.connection_info();
    let uri = request.uri();
    let path_and_query = uri
        .path_and_query()
        .map_or(uri.path(), |path_query| path_query.as_str());
    Url::parse(&format!(
        "{}://{}{}",
        info.scheme(),
        info.host(),
        path_and_query
    ))
    .ok()
}

fn map_contact_validation_error(err: ContactValidationError) -> Error {
    use ContactValidationError as E;
    let (field, code) = match &err {
        E::EmptyName => ("name", "empty_name"),
        E::NameTooLong { .. } => ("name", "name_too_long"),
        E::EmptyAddress => ("address", "empty_address"),
        E::AddressTooLong { .. } => ("address", "address_too_long"),
        E::EmptyCity => ("city", "empty_city"),
        E::CityTooLong { .. } => ("city", "city_too_long"),
        E::EmptyState => ("state", "empty_state"),
        E::StateTooLong { .. } => ("state", "state_too_long"),
        E::EmptyZip => ("zip", "empty_zip"),
        E::ZipTooLong { .. } => ("zip", "zip_too_long"),
        E::EmptyEmail => ("email", "empty_email"),
        E::EmailTooLong { .. } => ("email", "email_too_long"),
        E::InvalidEmail => ("email", "invalid_email"),
        _ => ("contact", "invalid_contact"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
