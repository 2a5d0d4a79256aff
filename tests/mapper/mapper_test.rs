//! Structural row mapping tests.

use quickreport::error::FieldAccessError;
use quickreport::mapper::StructuralRowMapper;
use quickreport::prelude::*;
use quickreport::registry::TypeRegistry;
use quickreport::synth::{ArtifactStore, RowTypeSynthesizer};

/// A hand-written source type with one field the report cannot hold.
struct Person {
    id: i32,
    name: String,
    avatar: Vec<u8>,
}

impl Reportable for Person {
    fn source_type(&self) -> SourceType {
        SourceType::new("Person")
            .field("id", TypeTag::Int32)
            .field("name", TypeTag::Text)
            .other_field("avatar", "Vec<u8>")
    }

    fn field_value(&self, field: &str) -> Result<Value, FieldAccessError> {
        match field {
            "id" => Ok(Value::from(self.id)),
            "name" => Ok(Value::from(self.name.as_str())),
            "avatar" => Err(FieldAccessError::Inaccessible {
                field: field.to_string(),
                reason: format!("{} bytes of binary data", self.avatar.len()),
            }),
            _ => Err(FieldAccessError::UnknownField {
                type_name: "Person".to_string(),
                field: field.to_string(),
            }),
        }
    }
}

/// Same field names as `Person`, different tags for some.
struct LegacyPerson;

impl Reportable for LegacyPerson {
    fn source_type(&self) -> SourceType {
        SourceType::new("LegacyPerson")
            .field("name", TypeTag::Text)
            .field("id", TypeTag::Int64)
            .field("nickname", TypeTag::Text)
    }

    fn field_value(&self, field: &str) -> Result<Value, FieldAccessError> {
        match field {
            "name" => Ok(Value::from("Ada")),
            "id" => Ok(Value::from(99i64)),
            "nickname" => Ok(Value::from("ada")),
            _ => Err(FieldAccessError::UnknownField {
                type_name: "LegacyPerson".to_string(),
                field: field.to_string(),
            }),
        }
    }
}

struct Broken;

impl Reportable for Broken {
    fn source_type(&self) -> SourceType {
        SourceType::new("Person").field("id", TypeTag::Int32)
    }

    fn field_value(&self, field: &str) -> Result<Value, FieldAccessError> {
        Err(FieldAccessError::Inaccessible {
            field: field.to_string(),
            reason: "detached".to_string(),
        })
    }
}

fn person_row_type(registry: &TypeRegistry) -> std::sync::Arc<RowType> {
    let settings = Settings::default();
    let artifacts = ArtifactStore::disabled();
    let sample = Person {
        id: 0,
        name: String::new(),
        avatar: vec![],
    };
    RowTypeSynthesizer::new(registry, &settings, &artifacts)
        .synthesize(&sample.source_type())
        .unwrap()
}

#[test]
fn test_maps_matching_fields_and_ignores_excluded() {
    let registry = TypeRegistry::new();
    let row_type = person_row_type(&registry);
    assert_eq!(row_type.schema().names(), vec!["id", "name"]);

    let people = vec![Person {
        id: 7,
        name: "Bob".to_string(),
        avatar: vec![0xFF; 16],
    }];
    let rows = StructuralRowMapper::new().map(&row_type, &people).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id").unwrap(), &Value::Int32(7));
    assert_eq!(rows[0].get("name").unwrap(), &Value::from("Bob"));
    assert_eq!(rows[0].invoke_getter("name").unwrap(), &Value::from("Bob"));
}

#[test]
fn test_matching_requires_same_tag() {
    let registry = TypeRegistry::new();
    let row_type = person_row_type(&registry);

    let row = StructuralRowMapper::new()
        .map_one(&row_type, &LegacyPerson)
        .unwrap();

    assert_eq!(row.get("name").unwrap(), &Value::from("Ada"));
    assert!(row.get("id").unwrap().is_null());
    assert!(row.get("nickname").is_err());
}

#[test]
fn test_mixed_sources() {
    let registry = TypeRegistry::new();
    let row_type = person_row_type(&registry);
    let bob = Person {
        id: 1,
        name: "Bob".to_string(),
        avatar: vec![],
    };
    let sources: Vec<&dyn Reportable> = vec![&bob, &LegacyPerson];

    let mapper = StructuralRowMapper::new();
    let rows = mapper.map(&row_type, sources.iter().copied()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("name").unwrap(), &Value::from("Ada"));
    assert_eq!(mapper.cached_plans(), 2);
}

#[test]
fn test_access_failure_aborts_whole_call() {
    let registry = TypeRegistry::new();
    let row_type = person_row_type(&registry);
    let bob = Person {
        id: 1,
        name: "Bob".to_string(),
        avatar: vec![],
    };
    let sources: Vec<&dyn Reportable> = vec![&bob, &Broken];

    let err = StructuralRowMapper::new()
        .map(&row_type, sources.iter().copied())
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::Mapping {
            source: FieldAccessError::Inaccessible { .. },
            ..
        }
    ));
    assert!(!err.is_retriable());
}
