use super::*;

#[test]
fn test_identifier_round_trip() {
    for domain in PathDomain::ALL {
        assert_eq!(PathDomain::from_identifier(domain.identifier()), Some(domain));
    }
    assert_eq!(PathDomain::from_identifier("PathDomainStorage"), None);
}

#[test]
fn test_tag_name_differs_from_identifier() {
    assert_eq!(PathDomain::Storage.identifier(), "storage");
    assert_eq!(PathDomain::Storage.tag_name(), "PathDomainStorage");
    assert_eq!(PathDomain::Public.tag_name(), "PathDomainPublic");
}
