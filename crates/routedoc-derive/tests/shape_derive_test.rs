use routedoc::specification::Schema;
use routedoc::{Document, SchemaGenerator, ShapeDescriptor, ShapeKind};
use serde::Serialize;

/// A registered account
#[allow(dead_code)]
#[derive(Serialize, ShapeDescriptor)]
#[serde(rename_all = "camelCase")]
struct Account {
    /// Unique identifier
    account_id: u64,
    display_name: String,
    nickname: Option<String>,
    #[serde(default)]
    roles: Vec<Role>,
    #[serde(skip)]
    password_hash: String,
    #[serde(rename = "e-mail")]
    email: String,
}

#[allow(dead_code)]
#[derive(Serialize, ShapeDescriptor)]
#[serde(rename_all = "snake_case")]
enum Role {
    Admin,
    ReadOnly,
    #[serde(rename = "guest")]
    Visitor,
    #[serde(skip)]
    Internal,
}

#[allow(dead_code)]
#[derive(ShapeDescriptor)]
struct Page<T> {
    items: Vec<T>,
    total: u64,
}

#[allow(dead_code)]
#[derive(ShapeDescriptor)]
struct AccountId(u64);

#[allow(dead_code)]
#[derive(ShapeDescriptor)]
struct Point(f64, f64);

#[derive(ShapeDescriptor)]
struct Ping;

#[allow(dead_code)]
#[derive(ShapeDescriptor)]
#[shape(name = "Folder", rename_all = "PascalCase")]
struct FolderRecord {
    folder_name: String,
    #[shape(rename = "Kids")]
    children: Vec<FolderRecord>,
    #[shape(skip)]
    cached_size: u64,
}

#[allow(dead_code)]
#[derive(ShapeDescriptor)]
struct Category {
    name: String,
    children: Vec<Category>,
}

fn property<'a>(schema: &'a Schema, name: &str) -> &'a Schema {
    schema
        .properties
        .get(name)
        .unwrap_or_else(|| panic!("missing property {}", name))
}

#[test]
fn test_struct_registers_component() {
    let mut generator = SchemaGenerator::default();
    let reference = generator.generate::<Account>().unwrap();

    assert_eq!(reference.referenced_name(), Some("Account"));
    assert_eq!(Account::shape_kind(), ShapeKind::Struct);

    let account = generator.get("Account").unwrap();
    assert_eq!(account.schema_type.as_deref(), Some("object"));
    assert_eq!(account.title.as_deref(), Some("Account"));
    assert_eq!(account.description.as_deref(), Some("A registered account"));
}

#[test]
fn test_field_names_follow_serde() {
    let mut generator = SchemaGenerator::default();
    generator.generate::<Account>().unwrap();
    let account = generator.get("Account").unwrap();

    let names: Vec<&str> = account.properties.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["accountId", "displayName", "e-mail", "nickname", "roles"]
    );
    assert_eq!(account.required, vec!["accountId", "displayName", "e-mail"]);
}

#[test]
fn test_field_docs_and_types() {
    let mut generator = SchemaGenerator::default();
    generator.generate::<Account>().unwrap();
    let account = generator.get("Account").unwrap();

    let id = property(account, "accountId");
    assert_eq!(id.schema_type.as_deref(), Some("integer"));
    assert_eq!(id.format.as_deref(), Some("int64"));
    assert_eq!(id.description.as_deref(), Some("Unique identifier"));

    let roles = property(account, "roles");
    assert_eq!(roles.schema_type.as_deref(), Some("array"));
    let items = roles.items.as_ref().unwrap();
    assert_eq!(items.referenced_name(), Some("Role"));
}

#[test]
fn test_unit_enum_is_string_enum() {
    let mut generator = SchemaGenerator::default();
    let reference = generator.generate::<Role>().unwrap();

    assert_eq!(reference.referenced_name(), Some("Role"));
    assert_eq!(Role::shape_kind(), ShapeKind::Scalar);

    let role = generator.get("Role").unwrap();
    assert_eq!(role.schema_type.as_deref(), Some("string"));
    assert_eq!(
        role.enum_values,
        vec![
            serde_json::json!("admin"),
            serde_json::json!("read_only"),
            serde_json::json!("guest"),
        ]
    );
}

#[test]
fn test_generic_names_include_arguments() {
    assert_eq!(Page::<Account>::schema_name().as_deref(), Some("Page_Account"));
    assert_eq!(Page::<String>::schema_name().as_deref(), Some("Page_String"));

    let mut generator = SchemaGenerator::default();
    generator.generate::<Page<Account>>().unwrap();
    generator.generate::<Page<Role>>().unwrap();

    assert!(generator.get("Page_Account").is_some());
    assert!(generator.get("Page_Role").is_some());
    assert!(generator.get("Account").is_some());
}

#[test]
fn test_newtype_is_transparent() {
    assert_eq!(AccountId::schema_name(), None);
    assert_eq!(AccountId::shape_kind(), ShapeKind::Scalar);

    let mut generator = SchemaGenerator::default();
    let schema = generator.generate::<AccountId>().unwrap();
    assert_eq!(schema.schema_type.as_deref(), Some("integer"));
    assert!(generator.is_empty());
}

#[test]
fn test_tuple_struct_is_fixed_array() {
    assert_eq!(Point::shape_kind(), ShapeKind::Array);

    let mut generator = SchemaGenerator::default();
    generator.generate::<Point>().unwrap();
    let point = generator.get("Point").unwrap();
    assert_eq!(point.schema_type.as_deref(), Some("array"));
    assert_eq!(point.min_items, Some(2));
    assert_eq!(point.max_items, Some(2));
}

#[test]
fn test_unit_struct_is_empty_object() {
    let mut generator = SchemaGenerator::default();
    generator.generate::<Ping>().unwrap();
    let ping = generator.get("Ping").unwrap();
    assert_eq!(ping.schema_type.as_deref(), Some("object"));
    assert!(ping.properties.is_empty());
    assert!(ping.required.is_empty());
}

#[test]
fn test_shape_attributes() {
    assert_eq!(FolderRecord::schema_name().as_deref(), Some("Folder"));

    let mut generator = SchemaGenerator::default();
    generator.declare("Folder", Schema::of_type("object"));
    let reference = generator.generate::<FolderRecord>().unwrap();
    assert_eq!(reference.referenced_name(), Some("Folder"));

    // The declared schema wins over the derived one
    assert!(generator.get("Folder").unwrap().properties.is_empty());
}

#[test]
fn test_shape_rename_rules() {
    let mut generator = SchemaGenerator::default();
    let err = generator.generate::<FolderRecord>().unwrap_err();
    assert!(err.to_string().contains("Folder -> Folder"));

    // Without the cycle the renamed fields show up
    #[allow(dead_code)]
    #[derive(ShapeDescriptor)]
    #[shape(rename_all = "PascalCase")]
    struct Leaf {
        folder_name: String,
        #[shape(rename = "Size")]
        byte_count: u64,
        #[shape(skip)]
        cached: bool,
    }

    generator.generate::<Leaf>().unwrap();
    let leaf = generator.get("Leaf").unwrap();
    let names: Vec<&str> = leaf.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["FolderName", "Size"]);
}

#[test]
fn test_recursive_type_documented_after_declaration() {
    let mut api = Document::new("Catalog");
    api.route("/categories")
        .get()
        .summary("List categories")
        .response::<Vec<Category>>(200);

    let get = api.path_item("/categories").unwrap().get.as_ref().unwrap();
    assert!(get.responses.is_empty());
    assert_eq!(get.operation_id.as_deref(), Some("listCategories"));

    api.declare_schema("Category", Schema::of_type("object"));
    api.route("/categories")
        .get()
        .summary("List categories")
        .response::<Vec<Category>>(200);

    let get = api.path_item("/categories").unwrap().get.as_ref().unwrap();
    assert!(get.responses.contains_key("200"));
    assert!(api.schemas().contains_key("Category"));
}

#[allow(dead_code)]
#[derive(Serialize, ShapeDescriptor)]
struct RequestMeta {
    request_id: String,
    trace: Option<String>,
}

#[allow(dead_code)]
#[derive(Serialize, ShapeDescriptor)]
struct Paging {
    cursor: String,
}

#[allow(dead_code)]
#[derive(Serialize, ShapeDescriptor)]
struct Envelope {
    #[serde(flatten)]
    meta: RequestMeta,
    #[serde(flatten)]
    paging: Option<Paging>,
    #[serde(flatten)]
    extra: std::collections::BTreeMap<String, String>,
    data: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[allow(dead_code)]
#[derive(ShapeDescriptor)]
struct Pair(String, Account);

#[test]
fn test_flattened_fields_sit_at_top_level() {
    let mut generator = SchemaGenerator::default();
    generator.generate::<Envelope>().unwrap();
    let envelope = generator.get("Envelope").unwrap();

    let names: Vec<&str> = envelope.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["cursor", "data", "request_id", "trace", "warnings"]);
    assert!(!envelope.properties.contains_key("meta"));
    assert!(!envelope.properties.contains_key("paging"));

    // Required names from an Option flatten are dropped
    assert_eq!(envelope.required, vec!["request_id", "data"]);

    // A flattened map admits extra keys
    let extra = envelope.additional_properties.as_ref().unwrap();
    assert_eq!(extra.schema_type.as_deref(), Some("string"));
}

#[test]
fn test_flattened_schema_matches_serialized_keys() {
    let envelope = Envelope {
        meta: RequestMeta {
            request_id: "r-1".to_string(),
            trace: None,
        },
        paging: None,
        extra: Default::default(),
        data: vec!["a".to_string()],
        warnings: Vec::new(),
    };
    let value = serde_json::to_value(&envelope).unwrap();
    let wire_keys: Vec<&String> = value.as_object().unwrap().keys().collect();

    let mut generator = SchemaGenerator::default();
    generator.generate::<Envelope>().unwrap();
    let schema = generator.get("Envelope").unwrap();
    for key in wire_keys {
        assert!(schema.properties.contains_key(key), "{} not documented", key);
    }
}

#[test]
fn test_skip_serializing_if_is_not_required() {
    let mut generator = SchemaGenerator::default();
    generator.generate::<Envelope>().unwrap();
    let envelope = generator.get("Envelope").unwrap();

    assert!(envelope.properties.contains_key("warnings"));
    assert!(!envelope.required.iter().any(|name| name == "warnings"));
}

#[test]
fn test_tuple_elements_are_described() {
    let mut generator = SchemaGenerator::default();
    generator.generate::<Point>().unwrap();
    let point_items = generator.get("Point").unwrap().items.clone().unwrap();
    assert_eq!(point_items.schema_type.as_deref(), Some("number"));
    assert!(point_items.one_of.is_empty());

    generator.generate::<Pair>().unwrap();
    let pair_items = generator.get("Pair").unwrap().items.clone().unwrap();
    assert_eq!(pair_items.one_of.len(), 2);
    assert_eq!(pair_items.one_of[0].schema_type.as_deref(), Some("string"));
    assert_eq!(pair_items.one_of[1].referenced_name(), Some("Account"));
    assert!(generator.get("Account").is_some());
}
