//! Test doubles for driving ports used by the adapter guardrails suite.
//!
//! Each double records a simplified view of the calls it receives and
//! replies with a configurable response, so scenarios can assert both the
//! wire behaviour and the exact arguments handlers pass to the ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend::domain::ports::{
    ContactPage, ContactPageRequest, ContactsCommand, ContactsQuery, LoginService,
    RegistrationService, UserProfileQuery,
};
use backend::domain::{
    Contact, ContactDetails, ContactId, Error, LoginCredentials, RegisterDetails, User, UserId,
};

/// Configurable success or failure outcome for RecordingLoginService.
#[derive(Clone)]
pub(crate) enum LoginResponse {
    Ok(User),
    Err(Error),
}

/// Configurable success or failure outcome for RecordingRegistrationService.
#[derive(Clone)]
pub(crate) enum RegistrationResponse {
    Ok(User),
    Err(Error),
}

/// Configurable success or failure outcome for RecordingUserProfileQuery.
#[derive(Clone)]
pub(crate) enum UserProfileResponse {
    Ok(User),
    Err(Error),
}

#[derive(Clone)]
pub(crate) struct RecordingLoginService {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    response: Arc<Mutex<LoginResponse>>,
}

impl RecordingLoginService {
    pub(crate) fn new(response: LoginResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("login calls lock").clone()
    }

    pub(crate) fn set_response(&self, response: LoginResponse) {
        *self.response.lock().expect("login response lock") = response;
    }
}

#[async_trait]
impl LoginService for RecordingLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        self.calls.lock().expect("login calls lock").push((
            credentials.username().to_owned(),
            credentials.password().to_owned(),
        ));
        match self.response.lock().expect("login response lock").clone() {
            LoginResponse::Ok(user) => Ok(user),
            LoginResponse::Err(error) => Err(error),
        }
    }
}

#[derive(Clone)]
pub(crate) struct RecordingRegistrationService {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    response: Arc<Mutex<RegistrationResponse>>,
}

impl RecordingRegistrationService {
    pub(crate) fn new(response: RegistrationResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("registration calls lock").clone()
    }

    pub(crate) fn set_response(&self, response: RegistrationResponse) {
        *self.response.lock().expect("registration response lock") = response;
    }
}

#[async_trait]
impl RegistrationService for RecordingRegistrationService {
    async fn register(&self, details: &RegisterDetails) -> Result<User, Error> {
        self.calls.lock().expect("registration calls lock").push((
            details.username().as_ref().to_owned(),
            details.display_name().as_ref().to_owned(),
        ));
        match self
            .response
            .lock()
            .expect("registration response lock")
            .clone()
        {
            RegistrationResponse::Ok(user) => Ok(user),
            RegistrationResponse::Err(error) => Err(error),
        }
    }
}

#[derive(Clone)]
pub(crate) struct RecordingUserProfileQuery {
    calls: Arc<Mutex<Vec<String>>>,
    response: Arc<Mutex<UserProfileResponse>>,
}

impl RecordingUserProfileQuery {
    pub(crate) fn new(response: UserProfileResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("profile calls lock").clone()
    }

    pub(crate) fn set_response(&self, response: UserProfileResponse) {
        *self.response.lock().expect("profile response lock") = response;
    }
}

#[async_trait]
impl UserProfileQuery for RecordingUserProfileQuery {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.calls
            .lock()
            .expect("profile calls lock")
            .push(user_id.to_string());
        match self.response.lock().expect("profile response lock").clone() {
            UserProfileResponse::Ok(user) => Ok(user),
            UserProfileResponse::Err(error) => Err(error),
        }
    }
}

/// Configurable outcome for contact writes (create, update, approve, reject).
#[derive(Clone)]
pub(crate) enum ContactWriteResponse {
    Ok(Contact),
    Err(Error),
}

/// Configurable outcome for contact deletion.
#[derive(Clone)]
pub(crate) enum ContactDeleteResponse {
    Ok,
    Err(Error),
}

/// Configurable outcome for fetching a single contact.
#[derive(Clone)]
pub(crate) enum ContactFetchResponse {
    Ok(Contact),
    Err(Error),
}

/// Configurable outcome for listing a page of contacts.
#[derive(Clone)]
pub(crate) enum ContactListResponse {
    Ok(ContactPage),
    Err(Error),
}

/// Maps a configured response enum onto the port method's `Result`.
trait PortResponse {
    type Success;

    fn into_result(self) -> Result<Self::Success, Error>;
}

impl PortResponse for ContactWriteResponse {
    type Success = Contact;

    fn into_result(self) -> Result<Self::Success, Error> {
        match self {
            ContactWriteResponse::Ok(contact) => Ok(contact),
            ContactWriteResponse::Err(error) => Err(error),
        }
    }
}

impl PortResponse for ContactDeleteResponse {
    type Success = ();

    fn into_result(self) -> Result<Self::Success, Error> {
        match self {
            ContactDeleteResponse::Ok => Ok(()),
            ContactDeleteResponse::Err(error) => Err(error),
        }
    }
}

impl PortResponse for ContactFetchResponse {
    type Success = Contact;

    fn into_result(self) -> Result<Self::Success, Error> {
        match self {
            ContactFetchResponse::Ok(contact) => Ok(contact),
            ContactFetchResponse::Err(error) => Err(error),
        }
    }
}

impl PortResponse for ContactListResponse {
    type Success = ContactPage;

    fn into_result(self) -> Result<Self::Success, Error> {
        match self {
            ContactListResponse::Ok(page) => Ok(page),
            ContactListResponse::Err(error) => Err(error),
        }
    }
}

/// Records calls to one port method and returns its configured response.
#[derive(Clone)]
struct CallRecorder<Call, Response> {
    calls: Arc<Mutex<Vec<Call>>>,
    response: Arc<Mutex<Response>>,
}

impl<Call, Response> CallRecorder<Call, Response>
where
    Call: Clone,
    Response: Clone + PortResponse,
{
    fn new(response: Response) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    fn record_and_respond(&self, call: Call) -> Result<Response::Success, Error> {
        self.calls
            .lock()
            .expect("test double calls lock")
            .push(call);
        self.response
            .lock()
            .expect("test double response lock")
            .clone()
            .into_result()
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("test double calls lock").clone()
    }

    fn set_response(&self, response: Response) {
        *self.response.lock().expect("test double response lock") = response;
    }
}

/// Recording double for the contact mutation port.
///
/// Calls are recorded as strings: the session user id, the contact id where
/// the operation names one, and the contact name for payload-carrying writes.
#[derive(Clone)]
pub(crate) struct RecordingContactsCommand {
    create: CallRecorder<(String, String), ContactWriteResponse>,
    update: CallRecorder<(String, String, String), ContactWriteResponse>,
    delete: CallRecorder<(String, String), ContactDeleteResponse>,
    approve: CallRecorder<(String, String), ContactWriteResponse>,
    reject: CallRecorder<(String, String), ContactWriteResponse>,
}

impl RecordingContactsCommand {
    pub(crate) fn new(
        create_response: ContactWriteResponse,
        update_response: ContactWriteResponse,
        delete_response: ContactDeleteResponse,
        approve_response: ContactWriteResponse,
        reject_response: ContactWriteResponse,
    ) -> Self {
        Self {
            create: CallRecorder::new(create_response),
            update: CallRecorder::new(update_response),
            delete: CallRecorder::new(delete_response),
            approve: CallRecorder::new(approve_response),
            reject: CallRecorder::new(reject_response),
        }
    }

    pub(crate) fn create_calls(&self) -> Vec<(String, String)> {
        self.create.calls()
    }

    pub(crate) fn update_calls(&self) -> Vec<(String, String, String)> {
        self.update.calls()
    }

    pub(crate) fn delete_calls(&self) -> Vec<(String, String)> {
        self.delete.calls()
    }

    pub(crate) fn approve_calls(&self) -> Vec<(String, String)> {
        self.approve.calls()
    }

    pub(crate) fn reject_calls(&self) -> Vec<(String, String)> {
        self.reject.calls()
    }

    pub(crate) fn set_update_response(&self, response: ContactWriteResponse) {
        self.update.set_response(response);
    }

    pub(crate) fn set_approve_response(&self, response: ContactWriteResponse) {
        self.approve.set_response(response);
    }

    pub(crate) fn set_delete_response(&self, response: ContactDeleteResponse) {
        self.delete.set_response(response);
    }
}

#[async_trait]
impl ContactsCommand for RecordingContactsCommand {
    async fn create(&self, user_id: &UserId, details: ContactDetails) -> Result<Contact, Error> {
        self.create
            .record_and_respond((user_id.to_string(), details.name().to_owned()))
    }

    async fn update(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
        details: ContactDetails,
    ) -> Result<Contact, Error> {
        self.update.record_and_respond((
            user_id.to_string(),
            contact_id.to_string(),
            details.name().to_owned(),
        ))
    }

    async fn delete(&self, user_id: &UserId, contact_id: &ContactId) -> Result<(), Error> {
        self.delete
            .record_and_respond((user_id.to_string(), contact_id.to_string()))
    }

    async fn approve(&self, user_id: &UserId, contact_id: &ContactId) -> Result<Contact, Error> {
        self.approve
            .record_and_respond((user_id.to_string(), contact_id.to_string()))
    }

    async fn reject(&self, user_id: &UserId, contact_id: &ContactId) -> Result<Contact, Error> {
        self.reject
            .record_and_respond((user_id.to_string(), contact_id.to_string()))
    }
}

/// Recording double for the contact read port.
///
/// List calls record the resume key as the contact id inside the cursor so
/// pagination scenarios can assert the cursor round-trips into the port.
#[derive(Clone)]
pub(crate) struct RecordingContactsQuery {
    fetch: CallRecorder<(String, String), ContactFetchResponse>,
    list: CallRecorder<(String, Option<String>, usize), ContactListResponse>,
}

impl RecordingContactsQuery {
    pub(crate) fn new(
        fetch_response: ContactFetchResponse,
        list_response: ContactListResponse,
    ) -> Self {
        Self {
            fetch: CallRecorder::new(fetch_response),
            list: CallRecorder::new(list_response),
        }
    }

    pub(crate) fn fetch_calls(&self) -> Vec<(String, String)> {
        self.fetch.calls()
    }

    pub(crate) fn list_calls(&self) -> Vec<(String, Option<String>, usize)> {
        self.list.calls()
    }

    pub(crate) fn set_fetch_response(&self, response: ContactFetchResponse) {
        self.fetch.set_response(response);
    }

    pub(crate) fn set_list_response(&self, response: ContactListResponse) {
        self.list.set_response(response);
    }
}

#[async_trait]
impl ContactsQuery for RecordingContactsQuery {
    async fn fetch_contact(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
    ) -> Result<Contact, Error> {
        self.fetch
            .record_and_respond((user_id.to_string(), contact_id.to_string()))
    }

    async fn list_contacts(
        &self,
        user_id: &UserId,
        page: ContactPageRequest,
    ) -> Result<ContactPage, Error> {
        self.list.record_and_respond((
            user_id.to_string(),
            page.after.as_ref().map(|key| key.id.to_string()),
            page.limit,
        ))
    }
}
