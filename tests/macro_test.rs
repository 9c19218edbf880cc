use envbind::{
    Bind, ConfigError, FieldDescriptor, FieldKind, OutcomeKind, StaticSource, Value,
    define_config,
};

define_config! {
    /// Server settings
    #[derive(Debug, Clone, PartialEq)]
    pub struct ServerConfig {
        /// Address to bind
        #[field(example = "localhost")]
        pub host: String,

        #[field(example = 9000u16)]
        pub port: u16,

        #[field(example = false)]
        pub debug: bool,

        pub workers: usize,
    }
}

define_config! {
    #[derive(Debug, Default)]
    pub struct DerivedDefaultConfig {
        pub name: String,
    }
}

define_config! {
    pub struct RawIdentConfig {
        pub r#type: String,
    }
}

define_config! {
    pub struct GatedConfig {
        pub always: String,

        #[cfg(any())]
        pub never: String,
    }
}

define_config! {
    pub struct EmptyConfig {}
}

#[test]
fn test_fields_follow_declaration() {
    let fields = ServerConfig::fields();

    assert_eq!(
        fields,
        vec![
            FieldDescriptor::string("host").with_example("localhost"),
            FieldDescriptor::integer("port").with_example("9000"),
            FieldDescriptor::boolean("debug").with_example("false"),
            FieldDescriptor::integer("workers"),
        ]
    );
}

#[test]
fn test_generated_default() {
    let config = ServerConfig::default();

    assert_eq!(config.host, "");
    assert_eq!(config.port, 0);
    assert!(!config.debug);
    assert_eq!(config.workers, 0);
}

#[test]
fn test_load_from_static_source() {
    let source = StaticSource::new()
        .with("HOST", "thepark")
        .with("PORT", "4242")
        .with("DEBUG", "true")
        .with("WORKERS", "8");

    let config = ServerConfig::load_from(&source)
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(
        config,
        ServerConfig {
            host: "thepark".to_string(),
            port: 4242,
            debug: true,
            workers: 8,
        }
    );
}

#[test]
fn test_out_of_range_is_type_mismatch() {
    let source = StaticSource::new()
        .with("HOST", "thepark")
        .with("PORT", "70000")
        .with("DEBUG", "false")
        .with("WORKERS", "-1");

    let loaded = ServerConfig::load_from(&source).unwrap();

    assert_eq!(loaded.result.get("port").unwrap().kind, OutcomeKind::TypeMismatch);
    assert_eq!(loaded.result.get("workers").unwrap().kind, OutcomeKind::TypeMismatch);
    assert_eq!(loaded.result.get("host").unwrap().kind, OutcomeKind::Ok);
    assert_eq!(loaded.config.port, 0);
    assert_eq!(loaded.config.workers, 0);

    let errors = loaded.into_result().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0],
        ConfigError::TypeMismatch {
            key: "PORT".to_string(),
            kind: FieldKind::Integer,
            value: "70000".to_string(),
            example: Some("9000".to_string()),
        }
    );
}

#[test]
fn test_bind_from_keeps_existing_values() {
    let mut config = ServerConfig {
        host: "fallback".to_string(),
        port: 8080,
        debug: false,
        workers: 4,
    };

    let source = StaticSource::new().with("PORT", "9001").with("DEBUG", "maybe");
    let result = config.bind_from(&source).unwrap();

    assert!(result.has_errors());
    assert_eq!(config.host, "fallback");
    assert_eq!(config.port, 9001);
    assert!(!config.debug);
    assert_eq!(config.workers, 4);
}

#[test]
fn test_assign_unknown_field_hands_value_back() {
    let mut config = ServerConfig::default();
    let value = Value::String("x".to_string());

    assert_eq!(config.assign("nope", value.clone()), Err(value));
    assert!(config.assign("port", Value::String("80".to_string())).is_err());
    assert_eq!(config.assign("port", Value::Integer(80)), Ok(()));
    assert_eq!(config.port, 80);
}

#[test]
fn test_user_derived_default() {
    let config = DerivedDefaultConfig::default();
    assert_eq!(config.name, "");
    assert_eq!(DerivedDefaultConfig::fields().len(), 1);
}

#[test]
fn test_raw_identifier_uses_plain_name() {
    let fields = RawIdentConfig::fields();
    assert_eq!(fields[0].name(), "type");
    assert_eq!(fields[0].key(), "TYPE");

    let source = StaticSource::new().with("TYPE", "worker");
    let loaded = RawIdentConfig::load_from(&source).unwrap();
    assert_eq!(loaded.config.r#type, "worker");
}

#[test]
fn test_cfg_gated_fields_are_skipped() {
    let fields = GatedConfig::fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name(), "always");
}

#[test]
fn test_empty_config() {
    let loaded = EmptyConfig::load_from(&StaticSource::new()).unwrap();
    assert!(loaded.result.is_empty());
    assert!(loaded.is_ok());
}
