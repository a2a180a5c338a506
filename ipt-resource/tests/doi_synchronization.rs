use ipt_resource::metadata::Citation;
use ipt_resource::{Doi, IdentifierStatus, Resource, ShortName, SharedResource};

fn resource_with_ids(ids: &[&str]) -> Resource {
    let mut resource = Resource::create(ShortName::parse("birds").unwrap());
    for id in ids {
        resource.eml_mut().add_alternate_identifier(*id);
    }
    resource.set_doi(Some(Doi::parse("doi:10.5072/ABC").unwrap()));
    resource
}

#[test]
fn public_doi_is_first_and_sync_is_idempotent() {
    let mut resource = resource_with_ids(&["urn:lsid:birds", "10.5072/abc", "https://example.org"]);
    resource.set_identifier_status(IdentifierStatus::Public);

    assert!(resource.update_alternate_identifier_for_doi());
    let first_pass = resource.eml().alternate_identifiers().to_vec();
    assert_eq!(
        first_pass,
        ["10.5072/abc", "urn:lsid:birds", "https://example.org"]
    );

    assert!(!resource.update_alternate_identifier_for_doi());
    assert_eq!(resource.eml().alternate_identifiers(), first_pass.as_slice());
}

#[test]
fn unavailable_doi_is_removed() {
    let mut resource = resource_with_ids(&["urn:lsid:birds"]);
    resource.set_identifier_status(IdentifierStatus::Public);
    resource.sync_doi_identifiers();
    assert!(resource.eml().contains_alternate_identifier("10.5072/abc"));

    resource.set_identifier_status(IdentifierStatus::Unavailable);
    resource.sync_doi_identifiers();
    assert!(!resource.eml().contains_alternate_identifier("10.5072/abc"));
    assert_eq!(resource.eml().alternate_identifiers(), ["urn:lsid:birds"]);
    assert_eq!(resource.eml().citation().unwrap().identifier(), None);
}

#[test]
fn citation_sync_is_idempotent() {
    let mut resource = resource_with_ids(&[]);
    resource.set_identifier_status(IdentifierStatus::PublicPendingPublication);
    resource
        .eml_mut()
        .set_citation(Some(Citation::new("Birds of the world", None)));

    assert!(resource.sync_doi_identifiers());
    let snapshot = resource.clone();
    assert!(!resource.sync_doi_identifiers());
    assert_eq!(resource.eml(), snapshot.eml());
    assert_eq!(
        resource.eml().citation().unwrap().identifier(),
        Some("https://doi.org/10.5072/abc")
    );
}

#[test]
fn shared_handle_syncs_under_one_lock() {
    let mut resource = resource_with_ids(&["urn:lsid:birds"]);
    resource.set_identifier_status(IdentifierStatus::Public);
    let shared = SharedResource::new(resource);

    assert!(shared.sync_doi_identifiers().unwrap());
    assert!(!shared.sync_doi_identifiers().unwrap());

    let snapshot = shared.snapshot().unwrap();
    assert_eq!(
        snapshot.eml().alternate_identifiers(),
        ["10.5072/abc", "urn:lsid:birds"]
    );
    assert!(snapshot.is_citation_auto_generated());
}
