use archon::{validate_formula, Feature, Rule, Ruleset};

fn main() {
    // A custom rule carries a formula; when present it replaces the
    // structured conditions entirely.
    let ruleset = Ruleset::new(vec![
        Rule::new("steel_tower", "Steel Tower")
            .formula(
                r#"includes(lower(feature["material"]), "steel") && toNumber(feature["height"]) >= 30"#,
            )
            .priority(100),
        Rule::new("other", "Low Rise").priority(0),
    ]);

    // Field access tolerates messy data: "42m" still reads as 42
    let tower = Feature::new("t1")
        .set("material", "Steel frame")
        .set("height", "42m");
    let hut = Feature::new("h1")
        .set("material", "timber")
        .set("height", 4_i64);

    for feature in [&tower, &hut] {
        match ruleset.resolve(feature) {
            Some(rule) => println!("{}: {}", feature.id(), rule.archetype),
            None => println!("{}: no archetype", feature.id()),
        }
    }

    // Formulas are screened before they ever run; anything touching the
    // host environment is rejected outright.
    for source in ["window.alert(1)", "feature.constructor", "eval('x')"] {
        match validate_formula(source) {
            Ok(()) => println!("accepted: {source}"),
            Err(error) => println!("rejected: {error}"),
        }
    }
}
