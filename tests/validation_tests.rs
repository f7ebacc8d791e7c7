//! Validation integration tests
//!
//! End-to-end checks: schema text and document text in, diagnostics out.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use minixsd::{
    compile_validator, parse_document, parse_schema_document, ErrorCode, Node, SchemaValidator,
    ValidationError,
};
use proptest::prelude::*;

fn fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(&path).expect("fixture should be readable")
}

fn validator(xsd: &str) -> SchemaValidator {
    let schema = parse_schema_document(xsd)
        .into_result()
        .expect("schema should build");
    compile_validator(schema)
}

fn document(xml: &str) -> Node {
    parse_document(xml).into_result().expect("document should parse")
}

fn codes(errors: &[ValidationError]) -> Vec<ErrorCode> {
    errors.iter().map(|e| e.code).collect()
}

// ============================================================================
// Library fixtures
// ============================================================================

#[test]
fn test_valid_library() {
    let errors = validator(&fixture("library.xsd")).validate(&document(&fixture("library.xml")));
    assert!(errors.is_empty(), "{:?}", errors);
}

#[test]
fn test_invalid_library_reports_every_problem() {
    let errors =
        validator(&fixture("library.xsd")).validate(&document(&fixture("library_invalid.xml")));

    assert_eq!(
        codes(&errors),
        vec![
            ErrorCode::FixedValueViolation,
            ErrorCode::PatternViolation,
            ErrorCode::MinInclusiveViolation,
            ErrorCode::MissingRequiredAttribute,
            ErrorCode::UnexpectedElement,
        ]
    );

    let positions: Vec<(usize, usize)> = errors.iter().map(|e| (e.line, e.column)).collect();
    assert_eq!(positions, vec![(2, 1), (6, 5), (7, 5), (9, 3), (12, 5)]);
}

// ============================================================================
// Documented behaviours
// ============================================================================

const LIBRARY_XSD: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="library" type="libraryType"/>
  <xs:complexType name="libraryType">
    <xs:sequence>
      <xs:element name="book" type="bookType" minOccurs="1" maxOccurs="unbounded"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="bookType">
    <xs:sequence>
      <xs:element name="title" type="xs:string"/>
    </xs:sequence>
    <xs:attribute name="id" type="xs:string" use="required"/>
  </xs:complexType>
</xs:schema>"#;

#[test]
fn test_zero_matches_for_required_particle() {
    let errors = validator(LIBRARY_XSD).validate(&document("<library></library>"));
    assert_eq!(codes(&errors), vec![ErrorCode::MinOccursViolation]);
    assert!(errors[0].message.contains("'book'"));
    assert!(errors[0].message.contains('0'));
}

#[test]
fn test_missing_attribute_on_one_sibling() {
    let errors = validator(LIBRARY_XSD).validate(&document(
        r#"<library>
  <book id="1"><title>A</title></book>
  <book><title>B</title></book>
  <book id="3"><title>C</title></book>
</library>"#,
    ));
    assert_eq!(codes(&errors), vec![ErrorCode::MissingRequiredAttribute]);
    assert_eq!(errors[0].line, 3);
}

#[test]
fn test_siblings_are_still_validated_after_a_failure() {
    let errors = validator(LIBRARY_XSD).validate(&document(
        r#"<library><book><title>A</title></book><book id="2"><isbn/></book></library>"#,
    ));
    assert_eq!(
        codes(&errors),
        vec![
            ErrorCode::MissingRequiredAttribute,
            ErrorCode::MinOccursViolation,
            ErrorCode::UnexpectedElement,
        ]
    );
}

#[test]
fn test_fixed_attribute_mismatch() {
    let xsd = r#"<schema>
        <element name="config" type="configType"/>
        <complexType name="configType">
          <attribute name="version" type="string" fixed="1.0"/>
        </complexType>
      </schema>"#;
    let v = validator(xsd);

    assert!(v.validate(&document(r#"<config version="1.0"/>"#)).is_empty());
    assert!(v.validate(&document("<config/>")).is_empty());

    let errors = v.validate(&document(r#"<config version="2.0"/>"#));
    assert_eq!(codes(&errors), vec![ErrorCode::FixedValueViolation]);
}

#[test]
fn test_isbn_pattern() {
    let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
        <xs:element name="isbn">
          <xs:simpleType>
            <xs:restriction base="xs:string">
              <xs:pattern value="[0-9]{3}-[0-9]{10}"/>
            </xs:restriction>
          </xs:simpleType>
        </xs:element>
      </xs:schema>"#;
    let v = validator(xsd);

    assert!(v.validate(&document("<isbn>978-0142437171</isbn>")).is_empty());
    assert_eq!(
        codes(&v.validate(&document("<isbn>invalid-isbn</isbn>"))),
        vec![ErrorCode::PatternViolation]
    );
}

#[test]
fn test_inline_complex_type_is_not_checked() {
    let xsd = r#"<schema>
        <element name="point">
          <complexType>
            <sequence><element name="x" type="int"/></sequence>
            <attribute name="label" use="required"/>
          </complexType>
        </element>
      </schema>"#;
    let errors = validator(xsd).validate(&document(r#"<point><y>nope</y></point>"#));
    assert!(errors.is_empty(), "{:?}", errors);
}

#[test]
fn test_enumeration_is_not_enforced() {
    let xsd = r#"<schema>
        <element name="colour" type="colourType"/>
        <simpleType name="colourType">
          <restriction base="string">
            <enumeration value="red"/>
            <enumeration value="blue"/>
          </restriction>
        </simpleType>
      </schema>"#;
    assert!(validator(xsd).validate(&document("<colour>green</colour>")).is_empty());
}

#[test]
fn test_non_ascii_digits_are_not_an_int() {
    let v = validator(r#"<schema><element name="n" type="int"/></schema>"#);
    assert!(v.validate(&document("<n>123</n>")).is_empty());
    assert_eq!(
        codes(&v.validate(&document("<n>\u{661}\u{662}\u{663}</n>"))),
        vec![ErrorCode::InvalidElementValue]
    );
}

fn bounded_int(facet: &str, bound: &str) -> SchemaValidator {
    validator(&format!(
        r#"<schema>
        <element name="n" type="boundedInt"/>
        <simpleType name="boundedInt">
          <restriction base="int"><{} value="{}"/></restriction>
        </simpleType>
      </schema>"#,
        facet, bound
    ))
}

#[test]
fn test_inclusive_bounds_with_huge_magnitudes() {
    let max = bounded_int("maxInclusive", "100");
    assert!(max.validate(&document("<n>99</n>")).is_empty());
    assert_eq!(
        codes(&max.validate(&document("<n>100000000000000000000000000000000</n>"))),
        vec![ErrorCode::MaxInclusiveViolation]
    );

    let min = bounded_int("minInclusive", "1e40");
    assert_eq!(
        codes(&min.validate(&document("<n>5</n>"))),
        vec![ErrorCode::MinInclusiveViolation]
    );
}

#[test]
fn test_root_must_be_declared() {
    let errors = validator(LIBRARY_XSD).validate(&document("\n\n  <book id=\"1\"/>"));
    assert_eq!(codes(&errors), vec![ErrorCode::ElementNotFound]);
    assert_eq!((errors[0].line, errors[0].column), (1, 1));
}

#[test]
fn test_diagnostic_display() {
    let errors = validator(LIBRARY_XSD).validate(&document("<library/>"));
    let rendered = errors[0].to_string();
    assert!(rendered.starts_with("1:1 [MIN_OCCURS_VIOLATION] "), "{}", rendered);

    let json = serde_json::to_value(&errors[0]).unwrap();
    assert_eq!(json["code"], "MIN_OCCURS_VIOLATION");
    assert_eq!(json["line"], 1);
}

// ============================================================================
// Sharing and idempotence
// ============================================================================

#[test]
fn test_validator_is_shared_across_threads() {
    let v = Arc::new(validator(&fixture("library.xsd")));
    let doc = Arc::new(document(&fixture("library_invalid.xml")));
    let expected = v.validate(&doc);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let v = Arc::clone(&v);
            let doc = Arc::clone(&doc);
            thread::spawn(move || v.validate(&doc))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

fn arb_book() -> impl Strategy<Value = Node> {
    (
        prop::option::of("[a-z0-9]{1,4}"),
        prop::collection::vec("[A-Za-z]{0,6}", 0..3),
        any::<bool>(),
    )
        .prop_map(|(id, titles, extra)| {
            let mut book = Node::new("book");
            if let Some(id) = id {
                book = book.with_attribute("id", id);
            }
            for title in titles {
                let node = Node::new("title");
                book = book.with_child(if title.is_empty() { node } else { node.with_text(title) });
            }
            if extra {
                book = book.with_child(Node::new("extra"));
            }
            book
        })
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(books in prop::collection::vec(arb_book(), 0..5)) {
        let library = books
            .into_iter()
            .fold(Node::new("library"), |node, book| node.with_child(book));

        let v = validator(LIBRARY_XSD);
        let first = v.validate(&library);
        let second = v.validate(&library);
        prop_assert_eq!(first, second);
    }
}
