use archon::{evaluate_formula, validate_formula, Feature, Formula, FormulaError};

fn steel_tower() -> Feature {
    Feature::new("b-1")
        .set("material", "Steel Frame")
        .set("height", "45m")
        .set("zone", "R1")
        .set("kind", "  commercial ")
        .set("floors", 12_i64)
        .set("roof", "Flat membrane")
}

fn timber_hut() -> Feature {
    Feature::new("b-2")
        .set("material", "Timber")
        .set("height", "8m")
        .set("zone", "IND")
        .set("kind", "residential")
        .set("roof", "Gabled")
}

#[test]
fn dangerous_constructs_are_rejected_in_any_casing() {
    let sources = [
        "eval('x')",
        "EVAL('x')",
        "new Function('return 1')",
        "FUNCTION('x')",
        "window.location",
        "WiNdOw.open()",
        "document.cookie",
        "localStorage.getItem('k')",
        "sessionStorage.clear()",
        "new XMLHttpRequest()",
        "fetch('/secrets')",
        "FETCH('/secrets')",
        "import('module')",
        "require('fs')",
        "x.__proto__",
        "x.__PROTO__",
        "x.constructor",
        "x.CONSTRUCTOR('y')",
        "x.prototype.y",
        "f.apply(null)",
        "f . apply ()",
        "f.call(null)",
        "f.bind(null)",
        "this.secrets",
        "THIS.secrets",
        "global.process",
        "process.env",
    ];
    for source in sources {
        let err = validate_formula(source).unwrap_err();
        assert!(
            matches!(err, FormulaError::Dangerous { .. }),
            "{source:?} should be flagged dangerous, got {err:?}"
        );
        assert!(
            err.to_string().contains("dangerous"),
            "error for {source:?} should mention danger: {err}"
        );
    }
}

#[test]
fn lookalike_words_are_not_dangerous() {
    // Word boundaries keep supersets of forbidden tokens usable.
    for source in [
        r#"includes(feature["notes"], "evaluated")"#,
        r#"feature["region"] === "windows""#,
        r#"includes(feature["tags"], "importance")"#,
    ] {
        assert!(validate_formula(source).is_ok(), "{source:?} should pass");
    }
}

#[test]
fn example_formulas_separate_matching_from_non_matching() {
    let sources = [
        r#"includes(lower(feature["material"]), "steel")"#,
        r#"toNumber(feature["height"]) > 20"#,
        r#"in(feature["zone"], ["R1", "R2"])"#,
        r#"in(feature["zone"], ["R1", "R2"]) && toNumber(feature["height"]) > 20"#,
        r#"trim(feature["kind"]) === "commercial" && !isEmpty(feature["floors"])"#,
        r#"includes(lower(feature["roof"]), "flat") || includes(lower(feature["roof"]), "shed")"#,
    ];
    let tower = steel_tower();
    let hut = timber_hut();
    for source in sources {
        let formula = Formula::compile(source).unwrap();
        assert!(formula.evaluate(&tower), "{source:?} should match the tower");
        assert!(!formula.evaluate(&hut), "{source:?} should not match the hut");
    }
}

#[test]
fn helper_fidelity() {
    let f = Feature::new("f");
    assert!(evaluate_formula(r#"toNumber("invalid") === 0"#, &f));
    assert!(evaluate_formula(r#"isEmpty("")"#, &f));
    assert!(!evaluate_formula(r#"isEmpty("x")"#, &f));
    assert!(evaluate_formula(r#"in("apple", ["apple", "banana"])"#, &f));
    assert!(!evaluate_formula(r#"in("cherry", ["apple", "banana"])"#, &f));
    assert!(evaluate_formula(r#"trim("  pad  ") === "pad""#, &f));
    assert!(evaluate_formula(r#"upper("r1") === "R1""#, &f));
}

#[test]
fn strict_equality_needs_matching_types() {
    let f = Feature::new("f").set("height", "20");
    assert!(!evaluate_formula(r#"feature["height"] === 20"#, &f));
    assert!(evaluate_formula(r#"feature["height"] === "20""#, &f));
    // Coercing through the helper bridges the gap.
    assert!(evaluate_formula(r#"toNumber(feature["height"]) === 20"#, &f));
}

#[test]
fn dotted_and_bracket_field_access_agree() {
    let f = Feature::new("f").set("zone", "R1");
    assert!(evaluate_formula(r#"feature.zone === "R1""#, &f));
    assert!(evaluate_formula(r#"feature["zone"] === "R1""#, &f));
}

#[test]
fn result_is_reduced_through_truthiness() {
    let named = Feature::new("f").set("zone", "R1");
    let blank = Feature::new("f").set("zone", "");
    let zero = Feature::new("f").set("zone", 0_i64);

    // A bare field reference matches exactly when its value is truthy.
    assert!(evaluate_formula(r#"feature["zone"]"#, &named));
    assert!(!evaluate_formula(r#"feature["zone"]"#, &blank));
    assert!(!evaluate_formula(r#"feature["zone"]"#, &zero));
    assert!(!evaluate_formula(r#"feature["missing"]"#, &named));
    assert!(evaluate_formula(r#"!feature["missing"]"#, &named));
}

#[test]
fn syntax_errors_are_reported_not_executed() {
    for source in [
        "",
        "feature[\"a\"] = 1",
        "feature[\"a\"] == 1",
        "lower()",
        "lower(\"a\", \"b\")",
        "nope(1)",
        "while (1)",
        "feature[zone]",
        "(1 + 2)",
    ] {
        let err = validate_formula(source).unwrap_err();
        assert!(
            matches!(err, FormulaError::Syntax { .. }),
            "{source:?} should be a syntax error, got {err:?}"
        );
    }
}

#[test]
fn helper_names_are_case_sensitive() {
    assert!(validate_formula(r#"lower("x")"#).is_ok());
    assert!(validate_formula(r#"LOWER("x")"#).is_err());
    assert!(validate_formula(r#"tonumber("5")"#).is_err());
}

#[test]
fn evaluation_never_panics_on_odd_shapes() {
    let f = Feature::new("f").set("list", "a,b");
    assert!(!evaluate_formula("[1, 2] === [1, 2]", &f));
    assert!(evaluate_formula("[1, 2] !== [1, 2]", &f));
    assert!(!evaluate_formula(r#""b" > "a""#, &f));
    assert!(evaluate_formula("!!1", &f));
    assert!(!evaluate_formula("!!0", &f));
}

#[test]
fn compile_once_evaluate_many() {
    let formula = Formula::compile(r#"toNumber(feature["height"]) >= 10"#).unwrap();
    for (height, expected) in [("10", true), ("9.5", false), ("150m", true), ("", false)] {
        let f = Feature::new("f").set("height", height);
        assert_eq!(formula.evaluate(&f), expected, "height {height:?}");
    }
}
