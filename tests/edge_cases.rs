use archon::{field, resolve, Condition, Feature, Rule, Value};

fn hit(condition: Condition, feature: &Feature) -> bool {
    let rules = [Rule::new("probe", "HIT").all([condition])];
    resolve(&rules, feature).is_some()
}

#[test]
fn nan_never_equals_itself() {
    let f = Feature::new("f").set("x", f64::NAN);
    assert!(!hit(field("x").eq(f64::NAN), &f));
    // NaN has no ordering either.
    assert!(!hit(field("x").gt(0_i64), &f));
    assert!(!hit(field("x").lt(0_i64), &f));
    assert!(!hit(field("x").gte(f64::NAN), &f));
}

#[test]
fn infinity_comparisons() {
    let f = Feature::new("f").set("x", f64::INFINITY);
    assert!(hit(field("x").eq(f64::INFINITY), &f));
    assert!(!hit(field("x").eq(f64::NEG_INFINITY), &f));
    assert!(hit(field("x").gt(1e308), &f));
}

#[test]
fn empty_string_equality() {
    let f = Feature::new("f").set("name", "");
    assert!(hit(field("name").eq(""), &f));

    // An absent field is null, which is not the empty string.
    let bare = Feature::new("f");
    assert!(!hit(field("name").eq(""), &bare));
}

#[test]
fn numeric_strings_equal_numbers() {
    let f = Feature::new("f").set("height", "20");
    assert!(hit(field("height").eq(20_i64), &f));
    assert!(hit(field("height").eq("20.0"), &f));

    let n = Feature::new("f").set("height", 20_i64);
    assert!(hit(field("height").eq("20"), &n));
}

#[test]
fn unit_suffix_strings_order_numerically() {
    let f = Feature::new("f").set("height", "25m");
    assert!(hit(field("height").gt(20_i64), &f));
    assert!(hit(field("height").lte(25_i64), &f));
    assert!(!hit(field("height").gt(25_i64), &f));
}

#[test]
fn boolean_spellings_equal_booleans() {
    let f = Feature::new("f").set("occupied", "TRUE").set("vacant", "False");
    assert!(hit(field("occupied").eq(true), &f));
    assert!(hit(field("vacant").eq(false), &f));
    assert!(hit(field("occupied").eq("true"), &f));
}

#[test]
fn iso_date_equals_epoch_millis() {
    let f = Feature::new("f").set("built", "2024-01-01T00:00:00Z");
    assert!(hit(field("built").eq(1_704_067_200_000_i64), &f));

    let bare = Feature::new("f").set("built", "2024-01-01");
    assert!(hit(field("built").eq(1_704_067_200_000_i64), &bare));
    assert!(hit(field("built").eq("2024-01-01T00:00:00Z"), &bare));
}

#[test]
fn malformed_date_falls_back_to_numeric_prefix() {
    // Month 13 fails the date parse; the leading year survives as a number.
    let f = Feature::new("f").set("built", "2024-13-99");
    assert!(hit(field("built").eq(2024_i64), &f));
    assert!(!hit(field("built").eq(1_704_067_200_000_i64), &f));
}

#[test]
fn missing_field_reads_as_null() {
    let f = Feature::new("f").set("zone", "R1");
    assert!(hit(field("ghost").eq(Value::Null), &f));
    assert!(!hit(field("ghost").neq(Value::Null), &f));
    assert!(!hit(field("ghost").eq("x"), &f));
}

#[test]
fn emptiness_on_missing_blank_and_zero() {
    let f = Feature::new("f")
        .set("notes", "   ")
        .set("count", 0_i64)
        .set("flag", false)
        .set("tags", Value::List(vec![]));
    assert!(hit(field("ghost").is_empty(), &f));
    assert!(hit(field("notes").is_empty(), &f));
    assert!(hit(field("tags").is_empty(), &f));
    // Zero and false are present values.
    assert!(!hit(field("count").is_empty(), &f));
    assert!(!hit(field("flag").is_empty(), &f));
    assert!(hit(field("count").is_not_empty(), &f));
}

#[test]
fn negated_operators_complement() {
    let f = Feature::new("f").set("zone", "R1");
    assert!(hit(field("zone").eq("R1"), &f) != hit(field("zone").neq("R1"), &f));
    assert!(
        hit(field("zone").contains("R"), &f) != hit(field("zone").not_contains("R"), &f)
    );
    assert!(
        hit(field("zone").is_in(["R1"]), &f) != hit(field("zone").not_in(["R1"]), &f)
    );
}

#[test]
fn contains_blanks_falsy_feature_values() {
    // Zero stringifies to "" under the falsy guard, so it contains nothing.
    let f = Feature::new("f").set("height", 0_i64).set("occupied", false);
    assert!(!hit(field("height").contains("0"), &f));
    assert!(!hit(field("occupied").contains("false"), &f));
    assert!(hit(field("height").contains(""), &f));
}

#[test]
fn contains_searches_coerced_not_raw_text() {
    // The unit suffix vanishes under coercion, so only the digits match.
    let f = Feature::new("f").set("height", "3.14abc");
    assert!(hit(field("height").contains("3.14"), &f));
    assert!(!hit(field("height").contains("abc"), &f));
    assert!(hit(field("height").not_contains("abc"), &f));

    // A string zero coerces to the number zero, which is falsy-blanked.
    let z = Feature::new("f").set("count", "0");
    assert!(!hit(field("count").contains("0"), &z));

    // Date spellings search their epoch digits, not their ISO text.
    let d = Feature::new("f").set("built", "2024-01-01");
    assert!(hit(field("built").contains("1704067200000"), &d));
    assert!(!hit(field("built").contains("2024"), &d));
}

#[test]
fn contains_with_array_is_exact_membership() {
    let r10 = Feature::new("f").set("zone", "R10");
    // "R1" is a substring of "R10" but not an equal member.
    assert!(!hit(field("zone").contains(["R1", "C1"]), &r10));

    let r1 = Feature::new("f").set("zone", "R1");
    assert!(hit(field("zone").contains(["R1", "C1"]), &r1));
}

#[test]
fn membership_coerces_and_handles_null() {
    let f = Feature::new("f").set("floors", "5");
    assert!(hit(field("floors").is_in([5_i64, 6_i64]), &f));

    // A null list element matches an absent field.
    let bare = Feature::new("f");
    assert!(hit(field("ghost").is_in(Value::List(vec![Value::Null])), &bare));
}

#[test]
fn membership_against_scalar_comparison_value() {
    let f = Feature::new("f").set("zone", "R1");
    assert!(!hit(field("zone").is_in("R1"), &f));
    assert!(hit(field("zone").not_in("R1"), &f));
}

#[test]
fn ordering_is_never_lexical() {
    let f = Feature::new("f").set("word", "b");
    assert!(!hit(field("word").gt("a"), &f));
    assert!(!hit(field("word").lt("c"), &f));
}

#[test]
fn list_feature_value_compares_as_joined_text() {
    let f = Feature::new("f").set(
        "tags",
        Value::List(vec![Value::from("a"), Value::from("b")]),
    );
    assert!(hit(field("tags").eq("a,b"), &f));
}

#[test]
fn empty_condition_list_matches_under_every_logic() {
    let f = Feature::new("f").set("zone", "R1");
    for rule in [
        Rule::new("r", "X").all([]),
        Rule::new("r", "X").any([]),
        Rule::new("r", "X").none([]),
    ] {
        assert_eq!(resolve(&[rule], &f).map(|r| r.archetype.as_str()), Some("X"));
    }
}
