//! Server harness and shared world for adapter guardrails.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use crate::doubles::{
    ContactDeleteResponse, ContactFetchResponse, ContactListResponse, ContactWriteResponse,
    LoginResponse, RecordingContactsCommand, RecordingContactsQuery, RecordingLoginService,
    RecordingRegistrationService, RecordingUserProfileQuery, RegistrationResponse,
    UserProfileResponse,
};
use backend::Trace;
use backend::domain::ports::ContactPage;
use backend::domain::{Contact, ContactDetails, ContactId, ContactStatus, Role, User, UserId};
use backend::inbound::http::auth::{
    login as login_handler, logout as logout_handler, register as register_handler,
};
use backend::inbound::http::contacts::{
    approve_contact as approve_contact_handler, create_contact as create_contact_handler,
    delete_contact as delete_contact_handler, get_contact as get_contact_handler,
    list_contacts as list_contacts_handler, reject_contact as reject_contact_handler,
    update_contact as update_contact_handler,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::users::me as current_user_handler;

pub(crate) struct AdapterWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) login: RecordingLoginService,
    pub(crate) registration: RecordingRegistrationService,
    pub(crate) profile: RecordingUserProfileQuery,
    pub(crate) contacts: RecordingContactsCommand,
    pub(crate) contacts_query: RecordingContactsQuery,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_cache_control: Option<String>,
    pub(crate) last_link: Option<String>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) session_cookie: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<AdapterWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

async fn spawn_adapter_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(test_session_middleware(key.clone()))
            .service(register_handler)
            .service(login_handler)
            .service(logout_handler)
            .service(current_user_handler)
            .service(list_contacts_handler)
            .service(create_contact_handler)
            .service(get_contact_handler)
            .service(update_contact_handler)
            .service(delete_contact_handler)
            .service(approve_contact_handler)
            .service(reject_contact_handler);

        App::new().app_data(http_data.clone()).wrap(Trace).service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

fn create_fixture_user_id() -> UserId {
    UserId::new("11111111-1111-1111-1111-111111111111").expect("fixture user id")
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0)
        .single()
        .expect("fixture timestamp")
}

pub(crate) fn fixture_contact(owner: &UserId, status: ContactStatus) -> Contact {
    let details = ContactDetails::try_new(
        "Debra Garcia",
        "1234 Main St",
        "Redmond",
        "WA",
        "10999",
        "debra@example.com",
    )
    .expect("fixture contact details");
    Contact::new(
        ContactId::new("eeeeeeee-eeee-eeee-eeee-eeeeeeeeeeee").expect("fixture contact id"),
        owner.clone(),
        details,
        status,
        fixture_timestamp(),
        fixture_timestamp(),
    )
}

fn create_identity_doubles(
    user_id: &UserId,
) -> (
    RecordingLoginService,
    RecordingRegistrationService,
    RecordingUserProfileQuery,
) {
    let admin = User::try_from_strings(user_id.as_ref(), "admin", "Site Admin")
        .expect("fixture admin user")
        .with_roles([Role::Administrator]);
    let registered = User::try_from_strings(
        "22222222-2222-2222-2222-222222222222",
        "ada.lovelace",
        "Ada Lovelace",
    )
    .expect("fixture registered user");

    let login = RecordingLoginService::new(LoginResponse::Ok(admin.clone()));
    let registration = RecordingRegistrationService::new(RegistrationResponse::Ok(registered));
    let profile = RecordingUserProfileQuery::new(UserProfileResponse::Ok(admin));

    (login, registration, profile)
}

fn create_contact_doubles(user_id: &UserId) -> (RecordingContactsCommand, RecordingContactsQuery) {
    let submitted = fixture_contact(user_id, ContactStatus::Submitted);
    let approved = fixture_contact(user_id, ContactStatus::Approved);
    let rejected = fixture_contact(user_id, ContactStatus::Rejected);

    let contacts = RecordingContactsCommand::new(
        ContactWriteResponse::Ok(submitted.clone()),
        ContactWriteResponse::Ok(submitted),
        ContactDeleteResponse::Ok,
        ContactWriteResponse::Ok(approved.clone()),
        ContactWriteResponse::Ok(rejected),
    );
    let contacts_query = RecordingContactsQuery::new(
        ContactFetchResponse::Ok(approved.clone()),
        ContactListResponse::Ok(ContactPage {
            contacts: vec![approved],
            next: None,
        }),
    );

    (contacts, contacts_query)
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let user_id = create_fixture_user_id();
    let (login, registration, profile) = create_identity_doubles(&user_id);
    let (contacts, contacts_query) = create_contact_doubles(&user_id);
    let http_state = HttpState::new(HttpStatePorts {
        login: Arc::new(login.clone()),
        registration: Arc::new(registration.clone()),
        profile: Arc::new(profile.clone()),
        contacts: Arc::new(contacts.clone()),
        contacts_query: Arc::new(contacts_query.clone()),
    });

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_adapter_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(AdapterWorld {
        runtime,
        local,
        base_url,
        server,
        login,
        registration,
        profile,
        contacts,
        contacts_query,
        last_status: None,
        last_body: None,
        last_cache_control: None,
        last_link: None,
        last_trace_id: None,
        session_cookie: None,
    }));

    WorldFixture { world }
}
