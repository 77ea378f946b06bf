mod common;

use argman::{ArgOption, OptionErr, OptionSpec, OptionType, Options, SpecField, SpecKey};

fn invalid_key(result: Result<(), OptionErr>) -> Option<SpecKey> {
    match result {
        Err(OptionErr::InvalidSpecification { key, .. }) => Some(key),
        _ => None,
    }
}

#[test]
fn add_option_names() {
    common::init_logger();
    let mut options = Options::new();

    assert_eq!(Some(SpecKey::Names), invalid_key(options.add_option(["a", "a"], OptionSpec::new())));
    assert_eq!(Some(SpecKey::Names), invalid_key(options.add_option(Vec::<String>::new(), OptionSpec::new())));
    for name in ["-a", "a-", "1", "a b", "foo_bar", ""] {
        assert_eq!(Some(SpecKey::Names), invalid_key(options.add_option([name], OptionSpec::new())), "{name}");
    }

    options.add_option(["a"], OptionSpec::new()).unwrap();
    assert!(matches!(options.add_option(["a"], OptionSpec::new()), Err(OptionErr::DuplicateName(_))));
    assert_eq!(1, options.get_options().len());
}

#[test]
fn add_option_boolean() {
    common::init_logger();
    let mut options = Options::new();
    options.add_option(["b", "b-boolean"], OptionSpec::new()
        .help("boolean opt")
        .bind("boolean_opt")).unwrap();

    let opt = options.fetch_by_name("b-boolean").unwrap();
    assert!(matches!(opt, ArgOption::Boolean(_)));
    assert_eq!(Some("boolean opt"), opt.get_help());
    assert_eq!(Some("boolean_opt"), opt.get_bind());
    assert!(!opt.is_mandatory());

    assert_eq!(Some(SpecKey::Help), invalid_key(OptionSpec::from_json(r#"{"help": 0}"#).map(|_| ())));
    assert_eq!(Some(SpecKey::Bind), invalid_key(OptionSpec::from_json(r#"{"bind": ["bind"]}"#).map(|_| ())));
    assert_eq!(Some(SpecKey::Bind), invalid_key(options.add_option(["f"], OptionSpec::new().bind("boolean opt"))));
    assert!(options.fetch_by_name("f").is_none());
}

#[test]
fn add_option_integer() {
    common::init_logger();
    let mut options = Options::new();
    let integer = || OptionSpec::new().kind(OptionType::Integer);

    options.add_option(["i"], integer().default_int(0)).unwrap();
    options.add_option(["j"], integer()).unwrap();
    options.add_option(["k"], integer().min(0).max(10).default_int(10)).unwrap();
    options.add_option(["l"], integer().min(-5)).unwrap();
    options.add_option(["m"], integer().max(5).default_int(-100)).unwrap();
    options.add_option(["n"], integer().min(3).max(3)).unwrap();

    assert_eq!(Some(SpecKey::Min), invalid_key(options.add_option(["p"], integer().min(10).max(0))));
    assert_eq!(Some(SpecKey::DefaultInt), invalid_key(options.add_option(["p"], integer().min(0).default_int(-1))));
    assert_eq!(Some(SpecKey::DefaultInt), invalid_key(options.add_option(["p"], integer().max(0).default_int(1))));
    assert_eq!(Some(SpecKey::Min), invalid_key(OptionSpec::from_json(r#"{"min": "zero"}"#).map(|_| ())));
    assert_eq!(6, options.get_options().len());

    match options.fetch_by_name("k") {
        Some(ArgOption::Integer(opt)) => {
            assert_eq!((Some(0), Some(10), Some(10)), (opt.get_min(), opt.get_max(), opt.get_default()));
        }
        other => panic!("unexpected option: {:?}", other),
    }
}

#[test]
fn add_option_string() {
    common::init_logger();
    let mut options = Options::new();
    let string = || OptionSpec::new().kind(OptionType::String);

    options.add_option(["s"], string()).unwrap();
    options.add_option(["t"], string().default_str("anything")).unwrap();
    options.add_option(["u"], string().domain(["foo", "bar"]).default_str("bar")).unwrap();
    options.add_option(["v"], string().mandatory(true).domain(["foo"])).unwrap();

    assert_eq!(Some(SpecKey::Domain), invalid_key(options.add_option(["w"], string().domain(["foo", "foo"]))));
    assert_eq!(Some(SpecKey::DefaultStr), invalid_key(options.add_option(["w"], string().domain(["foo"]).default_str("baz"))));
    assert_eq!(Some(SpecKey::Domain), invalid_key(OptionSpec::from_json(r#"{"domain": "foo"}"#).map(|_| ())));
    assert_eq!(4, options.get_options().len());
}

#[test]
fn add_option_unknown_keyword() {
    common::init_logger();
    let mut options = Options::new();
    let result = options.load_json(r#"[{"names": "x", "type": "integer", "maximum": 3}]"#);
    assert!(matches!(result, Err(OptionErr::UnknownKeyword(ref k)) if k == "maximum"));
    assert_eq!(Some(SpecKey::Type), invalid_key(options.load_json(r#"[{"names": "x", "type": "float"}]"#)));
    assert!(options.get_options().is_empty());
}

#[test]
fn add_options_with_defaults() {
    common::init_logger();
    let mut options = Options::new();
    options.add_options(&["u", "v", "w"]).unwrap();
    options.set_defaults(OptionSpec::new().kind(OptionType::Integer).default_int(0)).unwrap();
    options.add_options(&["i", "j", "k"]).unwrap();

    for name in ["u", "v", "w"] {
        assert_eq!(OptionType::Boolean, options.fetch_by_name(name).unwrap().kind());
    }
    for name in ["i", "j", "k"] {
        match options.fetch_by_name(name) {
            Some(ArgOption::Integer(opt)) => assert_eq!(Some(0), opt.get_default()),
            other => panic!("unexpected option: {:?}", other),
        }
    }
}

#[test]
fn set_defaults() {
    common::init_logger();
    let mut options = Options::new();
    options.set_defaults(OptionSpec::new()
        .kind(OptionType::String)
        .mandatory(true)
        .min(0)
        .max(10)
        .default_int(5)
        .domain(["foo", "bar"])
        .default_str("foo")
        .help("RTFM")
        .bind("bound")).unwrap();

    let defaults = options.get_defaults();
    assert_eq!(OptionType::String, defaults.kind);
    assert!(defaults.mandatory);
    assert_eq!((Some(0), Some(10), Some(5)), (defaults.min, defaults.max, defaults.default_int));
    assert_eq!(Some("foo"), defaults.default_str.as_deref());

    assert_eq!(Some(SpecKey::Min), invalid_key(options.set_defaults(OptionSpec::new().min(11))));
    assert_eq!(Some(SpecKey::Max), invalid_key(options.set_defaults(OptionSpec::new().max(-1))));
    assert_eq!(Some(SpecKey::DefaultInt), invalid_key(options.set_defaults(OptionSpec::new().default_int(11))));
    assert_eq!(Some(SpecKey::Domain), invalid_key(options.set_defaults(OptionSpec::new().domain(["a", "a"]))));
    assert_eq!(Some(SpecKey::DefaultStr), invalid_key(options.set_defaults(OptionSpec::new().default_str("baz"))));

    options.set_defaults(OptionSpec::new()
        .field(SpecField::Min(None))
        .field(SpecField::Max(None))
        .field(SpecField::Domain(None))
        .default_str("baz")).unwrap();
    assert_eq!(None, options.get_defaults().min);
    assert_eq!(Some("baz"), options.get_defaults().default_str.as_deref());
}

#[test]
fn set_defaults_from_json() {
    common::init_logger();
    let mut options = Options::new();
    options.set_defaults(OptionSpec::from_json(r#"{"type": "integer", "max": 30, "min": 20, "default_int": 25}"#).unwrap())
        .unwrap();
    options.add_option(["n"], OptionSpec::new()).unwrap();

    match options.fetch_by_name("n") {
        Some(ArgOption::Integer(opt)) => {
            assert_eq!((Some(20), Some(30), Some(25)), (opt.get_min(), opt.get_max(), opt.get_default()));
        }
        other => panic!("unexpected option: {:?}", other),
    }
}

#[test]
fn set_defaults_keeps_defaults_within_constraints() {
    common::init_logger();
    let mut options = Options::new();
    options.set_defaults(OptionSpec::new().kind(OptionType::String).default_str("baz")).unwrap();

    assert_eq!(Some(SpecKey::Domain), invalid_key(options.set_defaults(OptionSpec::new().domain(["foo"]))));
    assert_eq!(None, options.get_defaults().domain);
    options.add_options(&["s"]).unwrap();

    options.set_defaults(OptionSpec::new()
        .field(SpecField::DefaultStr(None))
        .domain(["foo"])
        .default_str("foo")).unwrap();
    options.add_options(&["t"]).unwrap();

    options.set_defaults(OptionSpec::new().kind(OptionType::Integer).default_int(5)).unwrap();
    assert_eq!(Some(SpecKey::Min), invalid_key(options.set_defaults(OptionSpec::new().min(6))));
    assert_eq!(Some(SpecKey::Max), invalid_key(options.set_defaults(OptionSpec::new().max(4))));
    options.add_options(&["i"]).unwrap();
}
