use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_primitive_display() {
    assert_eq!(StaticType::from(PrimitiveStaticType::Int).to_string(), "Int");
    assert_eq!(PrimitiveStaticType::MetaType.to_string(), "Type");
    assert_eq!(PrimitiveStaticType::UFix64.to_string(), "UFix64");
}

#[test]
fn test_compound_display() {
    assert_eq!(
        StaticType::variable_sized(PrimitiveStaticType::AnyStruct).to_string(),
        "[AnyStruct]"
    );
    assert_eq!(
        StaticType::constant_sized(PrimitiveStaticType::UInt8, 4).to_string(),
        "[UInt8; 4]"
    );
    assert_eq!(
        StaticType::dictionary(PrimitiveStaticType::String, PrimitiveStaticType::UInt8)
            .to_string(),
        "{String: UInt8}"
    );
    assert_eq!(
        StaticType::optional(StaticType::reference(
            false,
            StaticType::composite(Location::string("test"), "Foo")
        ))
        .to_string(),
        "&S.test.Foo?"
    );
    assert_eq!(
        StaticType::reference(true, PrimitiveStaticType::Int).to_string(),
        "auth &Int"
    );
    assert_eq!(StaticType::Capability(None).to_string(), "Capability");
}

#[test]
fn test_element_type() {
    let array = StaticType::byte_array();
    assert_eq!(
        array.element_type(),
        Some(&StaticType::Primitive(PrimitiveStaticType::UInt8))
    );
    assert_eq!(StaticType::from(PrimitiveStaticType::Int).element_type(), None);
}

#[test]
fn test_structural_equality() {
    assert_eq!(
        StaticType::variable_sized(PrimitiveStaticType::UInt8),
        StaticType::byte_array()
    );
    assert_ne!(
        StaticType::variable_sized(PrimitiveStaticType::UInt8),
        StaticType::variable_sized(PrimitiveStaticType::UInt16)
    );
}
