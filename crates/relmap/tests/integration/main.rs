use {
    rand::prelude::*,
    relmap::{
        key_type, record_pair, ColumnSpec, Evaluate, ForeignKey, KeyPredicate, KeyType, Predicate,
        PrimaryKey, RawValue, RegistryBuilder, SchemaBuilder, ShapeBuilder, ShapeDescriptor,
        ShapePair, SlotRow, StorageType, TableSpec, Truth, TypeRegistry,
    },
};

key_type! {
    pub struct UserKey(i64) as Integer64, tag "user";
    pub struct MessageKey(i64) as Integer64, tag "message";
}

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: UserKey,
    name: String,
}

#[derive(Clone, Debug, PartialEq)]
struct Message {
    id: MessageKey,
    sender: UserKey,
    content: String,
}

fn registry() -> TypeRegistry {
    let mut builder = RegistryBuilder::with_primitives();
    builder.register_key::<UserKey>().unwrap();
    builder.register_key::<MessageKey>().unwrap();
    builder.freeze()
}

// columns are declared (name, id) on purpose: the projection follows the
// declared column order, not the struct's field order
fn user_shape(registry: &TypeRegistry) -> ShapeDescriptor<User> {
    ShapeBuilder::new(registry)
        .column::<String>(ColumnSpec::new("name", StorageType::Text))
        .unwrap()
        .column::<UserKey>(ColumnSpec::new("id", StorageType::Integer64))
        .unwrap()
        .finish(ShapePair::new(
            2,
            |slots: SlotRow| {
                Ok(User {
                    id: slots.at::<UserKey>(1)?.clone(),
                    name: slots.at::<String>(0)?.clone(),
                })
            },
            |user: &User| {
                let mut slots = SlotRow::with_capacity(2);
                slots.push(user.name.clone());
                slots.push(user.id.clone());
                Some(slots)
            },
        ))
        .unwrap()
}

fn message_shape(registry: &TypeRegistry) -> ShapeDescriptor<Message> {
    ShapeBuilder::new(registry)
        .column::<MessageKey>(ColumnSpec::new("id", StorageType::Integer64))
        .unwrap()
        .column::<UserKey>(ColumnSpec::new("sender", StorageType::Integer64))
        .unwrap()
        .column::<String>(ColumnSpec::new("content", StorageType::Text))
        .unwrap()
        .finish(record_pair!(Message {
            id: MessageKey,
            sender: UserKey,
            content: String,
        }))
        .unwrap()
}

fn user_table(registry: &TypeRegistry) -> TableSpec {
    TableSpec::new("user", user_shape(registry))
        .with_primary_key(PrimaryKey::new(["id"], UserKey::TAG))
        .unwrap()
}

fn message_table(registry: &TypeRegistry) -> TableSpec {
    TableSpec::new("message", message_shape(registry))
        .with_primary_key(PrimaryKey::new(["id"], MessageKey::TAG))
        .unwrap()
        .with_foreign_key(ForeignKey::to_key::<User, UserKey>(
            "message_sender",
            "sender",
            "user",
            |user| user.id.clone(),
        ))
        .unwrap()
}

#[test]
fn project_respects_declared_column_order() {
    let registry = registry();
    let shape = user_shape(&registry);

    let row = vec![RawValue::from("hello"), RawValue::Integer64(1)];
    let user = shape.project(row.clone()).unwrap();

    assert_eq!(
        user,
        User {
            id: UserKey(1),
            name: "hello".to_string(),
        }
    );
    assert_eq!(shape.unproject(&user).unwrap(), row);
}

#[test]
fn well_formed_schema_round_trips_rows() {
    let registry = registry();

    let mut builder = SchemaBuilder::new();
    builder.register_table(user_table(&registry)).unwrap();
    builder.register_table(message_table(&registry)).unwrap();
    let schema = builder.finish().unwrap();

    let shape = schema
        .table("message")
        .unwrap()
        .shape::<Message>()
        .unwrap();
    let row = vec![
        RawValue::Integer64(10),
        RawValue::Integer64(1),
        RawValue::from("hello"),
    ];
    let message = shape.project(row.clone()).unwrap();

    assert_eq!(
        message,
        Message {
            id: MessageKey(10),
            sender: UserKey(1),
            content: "hello".to_string(),
        }
    );
    assert_eq!(shape.unproject(&message).unwrap(), row);
}

#[test]
fn mistyped_foreign_key_fails_before_any_row_operation() {
    #[derive(Clone, Debug, PartialEq)]
    struct BadMessage {
        id: MessageKey,
        sender: String,
        content: String,
    }

    let registry = registry();

    // sender declared as text while user.id is an integer64 key
    let bad_shape = ShapeBuilder::new(&registry)
        .column::<MessageKey>(ColumnSpec::new("id", StorageType::Integer64))
        .unwrap()
        .column::<String>(ColumnSpec::new("sender", StorageType::Text))
        .unwrap()
        .column::<String>(ColumnSpec::new("content", StorageType::Text))
        .unwrap()
        .finish(record_pair!(BadMessage {
            id: MessageKey,
            sender: String,
            content: String,
        }))
        .unwrap();

    let mut builder = SchemaBuilder::new();
    builder.register_table(user_table(&registry)).unwrap();
    builder
        .register_table(
            TableSpec::new("message", bad_shape)
                .with_primary_key(PrimaryKey::new(["id"], MessageKey::TAG))
                .unwrap()
                .with_foreign_key(ForeignKey::with_projection::<User>(
                    "message_sender",
                    vec!["sender".to_string()],
                    "user",
                    UserKey::TAG,
                    |user| vec![user.id.to_raw()],
                ))
                .unwrap(),
        )
        .unwrap();

    let err = builder.finish().unwrap_err();
    assert!(matches!(
        err,
        relmap::catalog::Error::KeyTypeMismatch { .. }
    ));
}

#[test]
fn foreign_keys_project_join_values() {
    let registry = registry();

    let mut builder = SchemaBuilder::new();
    builder.register_table(user_table(&registry)).unwrap();
    builder.register_table(message_table(&registry)).unwrap();
    let schema = builder.finish().unwrap();

    let key = &schema.table("message").unwrap().foreign_keys()[0];
    assert_eq!(key.referenced_table(), "user");
    assert_eq!(key.referenced_columns(), ["id"]);

    let sender = key
        .project_key(&User {
            id: UserKey(4),
            name: "ada".to_string(),
        })
        .unwrap();
    assert_eq!(sender, vec![RawValue::Integer64(4)]);
}

#[test]
fn ddl_descriptors_describe_the_whole_graph() {
    let registry = registry();

    let mut builder = SchemaBuilder::new();
    builder.register_table(user_table(&registry)).unwrap();
    builder.register_table(message_table(&registry)).unwrap();
    let schema = builder.finish().unwrap();

    let descriptors = schema.ddl_descriptors();
    assert_eq!(descriptors.len(), 2);

    let json = serde_json::to_value(&descriptors[1]).unwrap();
    assert_eq!(json["table_name"], "message");
    assert_eq!(json["primary_key"]["columns"][0], "id");
    assert_eq!(json["foreign_keys"][0]["referenced_table"], "user");
    assert_eq!(json["foreign_keys"][0]["referenced_columns"][0], "id");
}

#[test]
fn key_tags_keep_identifiers_apart() {
    // same storage type, different nominal tags: rejected before any
    // statement could be built
    let err = KeyPredicate::equals(UserKey(1).key_value(), MessageKey(1).key_value())
        .unwrap_err();
    assert!(matches!(
        err,
        relmap::expr::Error::IncompatibleKeyComparison { .. }
    ));

    let same = KeyPredicate::equals(UserKey(1).key_value(), UserKey(1).key_value()).unwrap();
    assert_eq!(same.evaluate(), Truth::True);
}

#[test]
fn absent_values_follow_storage_null_semantics() {
    let against_absent = Predicate::equals(RawValue::Null, "hello").unwrap();
    assert_eq!(against_absent.evaluate(), Truth::Unknown);
    assert!(!against_absent.evaluate().is_match());

    assert_eq!(
        Predicate::is_absent(RawValue::Null).evaluate(),
        Truth::True
    );
    assert_eq!(Predicate::is_absent("hello").evaluate(), Truth::False);
}

#[test]
fn random_rows_round_trip() {
    let registry = registry();
    let shape = user_shape(&registry);

    let mut rng = rand::thread_rng();

    for _ in 0..64 {
        let id: i64 = rng.gen();
        let len = rng.gen_range(0..24);
        let name: String = (&mut rng)
            .sample_iter(rand::distributions::Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();

        let row = vec![RawValue::from(name), RawValue::from(id)];
        let user = shape.project(row.clone()).unwrap();
        assert_eq!(shape.unproject(&user).unwrap(), row);
    }
}
