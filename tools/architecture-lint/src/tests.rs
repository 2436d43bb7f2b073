//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::fixture;
use rstest::rstest;

use super::*;

#[derive(Clone, Copy)]
struct LintSingle;

impl LintSingle {
    fn lint(self, file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
        lint_sources(&[LintSource {
            file: PathBuf::from(file),
            contents: contents.to_owned(),
        }])
    }
}

#[fixture]
fn lint_single() -> LintSingle {
    LintSingle
}

#[rstest]
#[case(
    "inbound/http/contacts.rs",
    "use crate::domain::ContactId; fn handler() { let _ = ContactId::new(\"x\"); }",
    true
)]
#[case(
    "inbound/http/contacts.rs",
    "use actix_web::HttpResponse; fn handler() { let _ = HttpResponse::Ok(); }",
    true
)]
#[case(
    "inbound/http/contacts.rs",
    "use crate::outbound::persistence::DieselContactRepository; fn handler() { let _ = DieselContactRepository; }",
    false
)]
#[case(
    "inbound/http/contacts.rs",
    "use outbound::persistence::DieselContactRepository; fn handler() { let _ = DieselContactRepository; }",
    false
)]
#[case(
    "inbound/http/contacts.rs",
    "use backend::outbound::persistence::DieselContactRepository; fn handler() { let _ = DieselContactRepository; }",
    false
)]
#[case(
    "inbound/http/contacts.rs",
    "use diesel::prelude::*; fn handler() {}",
    false
)]
#[case(
    "inbound/http/auth.rs",
    "use argon2::Argon2; fn handler() { let _ = Argon2::default(); }",
    false
)]
#[case(
    "domain/contacts.rs",
    "use serde::Serialize; #[derive(Serialize)] struct Card { name: String }",
    true
)]
#[case(
    "domain/contacts.rs",
    "use crate::inbound::http; fn thing() { let _ = 1; }",
    false
)]
#[case(
    "domain/contacts.rs",
    "use diesel::prelude::*; fn thing() {}",
    false
)]
#[case(
    "domain/contacts.rs",
    "use utoipa::ToSchema; #[derive(ToSchema)] struct Card { name: String }",
    false
)]
#[case(
    "outbound/persistence/contact_repository.rs",
    "use diesel::prelude::*; fn query() {}",
    true
)]
#[case(
    "outbound/persistence/contact_repository.rs",
    "use crate::inbound::http; fn thing() { let _ = 1; }",
    false
)]
#[case(
    "outbound/persistence/contact_repository.rs",
    "use inbound::http; fn thing() { let _ = 1; }",
    false
)]
#[case(
    "outbound/persistence/contact_repository.rs",
    "use actix_web::HttpResponse; fn thing() { let _ = HttpResponse::Ok(); }",
    false
)]
fn detects_boundary_violations(
    lint_single: LintSingle,
    #[case] file: &str,
    #[case] contents: &str,
    #[case] ok: bool,
) {
    let result = lint_single.lint(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn violation_messages_name_the_offending_crate(lint_single: LintSingle) {
    let result = lint_single.lint("inbound/http/contacts.rs", "use diesel::prelude::*;");
    let Err(ArchitectureLintError::Violations(violations)) = result else {
        panic!("expected violations, got: {result:?}");
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "inbound module must not depend on external crate `diesel`"
    );
}

#[rstest]
fn files_outside_the_hexagon_are_rejected(lint_single: LintSingle) {
    let result = lint_single.lint("middleware/trace.rs", "fn noop() {}");
    assert!(
        matches!(result, Err(ArchitectureLintError::Parse { .. })),
        "result: {result:?}"
    );
}
