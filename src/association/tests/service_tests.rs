//! Service orchestration tests for the association lifecycle.

use std::sync::Arc;

use crate::association::{
    adapters::memory::InMemoryAssociationRepository,
    domain::{AssociationDomainError, AssociationId, Cnpj},
    ports::{AssociationFilter, AssociationListQuery},
    services::{
        AssociationLifecycleError, AssociationLifecycleService, CreateAssociationRequest,
        UpdateAssociationRequest,
    },
};
use crate::listing::PageRequest;
use crate::store::memory::InMemoryDb;
use rstest::{fixture, rstest};

type TestService = AssociationLifecycleService<InMemoryAssociationRepository>;

#[fixture]
fn service() -> TestService {
    AssociationLifecycleService::new(Arc::new(InMemoryAssociationRepository::new(
        InMemoryDb::new(),
    )))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_and_is_retrievable(service: TestService) {
    let created = service
        .create(CreateAssociationRequest::new(
            "Neighbourhood Group",
            "12345678901234",
        ))
        .await
        .expect("creation should succeed");

    assert!(created.status());

    let fetched = service.get(created.id()).await.expect("lookup should succeed");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_malformed_cnpj(service: TestService) {
    let result = service
        .create(CreateAssociationRequest::new("Bad Registration", "123"))
        .await;

    assert!(matches!(
        result,
        Err(AssociationLifecycleError::Domain(
            AssociationDomainError::InvalidCnpj(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_by_cnpj_finds_exact_registration(service: TestService) {
    let created = service
        .create(CreateAssociationRequest::new("Lookup Group", "12345678901234"))
        .await
        .expect("creation should succeed");

    let cnpj = Cnpj::new("12345678901234").expect("valid CNPJ");
    let fetched = service
        .get_by_cnpj(&cnpj)
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_overwrites_only_present_fields(service: TestService) {
    let created = service
        .create(CreateAssociationRequest::new("Before", "12345678901234"))
        .await
        .expect("creation should succeed");

    let updated = service
        .update(created.id(), UpdateAssociationRequest::new().with_name("After"))
        .await
        .expect("update should succeed");

    assert_eq!(updated.name(), "After");
    assert_eq!(updated.cnpj(), created.cnpj());
    assert_eq!(updated.status(), created.status());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_id_reports_not_found(service: TestService) {
    let missing = AssociationId::new();
    let result = service
        .update(missing, UpdateAssociationRequest::new().with_status(false))
        .await;

    assert!(matches!(
        result,
        Err(AssociationLifecycleError::NotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_then_get_reports_not_found(service: TestService) {
    let created = service
        .create(CreateAssociationRequest::new("Ephemeral", "12345678901234"))
        .await
        .expect("creation should succeed");

    let deleted = service.delete(created.id()).await.expect("delete should succeed");
    assert_eq!(deleted, 1);

    let result = service.get(created.id()).await;
    assert!(matches!(
        result,
        Err(AssociationLifecycleError::NotFound(id)) if id == created.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_unknown_id_is_a_silent_no_op(service: TestService) {
    let deleted = service
        .delete(AssociationId::new())
        .await
        .expect("delete should succeed");

    assert_eq!(deleted, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_name_fragment(service: TestService) {
    for (name, cnpj) in [
        ("Bairro Novo", "11111111111111"),
        ("Bairro Velho", "22222222222222"),
        ("Outro Grupo", "33333333333333"),
    ] {
        service
            .create(CreateAssociationRequest::new(name, cnpj))
            .await
            .expect("creation should succeed");
    }

    let query = AssociationListQuery::new()
        .with_filter(AssociationFilter::new().with_name("Bairro"))
        .with_page(PageRequest::new(None, None));
    let page = service.list(&query).await.expect("listing should succeed");

    assert_eq!(page.total(), 2);
    assert!(page.items().iter().all(|found| found.name().contains("Bairro")));
}
