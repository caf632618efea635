use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_type_ids() {
    assert_eq!(Location::string("test").type_id("Foo"), "S.test.Foo");
    assert_eq!(Location::identifier("A").type_id("X"), "I.A.X");
    assert_eq!(Location::Builtin.type_id("PublicKey"), "PublicKey");

    let address = Location::Address {
        address: Address([0, 0, 0, 0, 0, 0, 0, 1]),
        name: "Vault".to_string(),
    };
    assert_eq!(
        address.type_id("Vault.Receiver"),
        "A.0000000000000001.Vault.Receiver"
    );
}

#[test]
fn test_location_range_display() {
    let range = LocationRange::new(Location::string("test"), Span::new(3, 9));
    assert_eq!(range.to_string(), "S.test:3..9");
    assert_eq!(LocationRange::EMPTY.to_string(), "<unknown>:0..0");
    assert!(LocationRange::EMPTY.span.is_empty());
}
