use archon::{field, Feature, Rule, Ruleset};

fn main() {
    // Higher priority wins regardless of where a rule sits in the list.
    // Equal priorities fall back to definition order: first listed wins.
    let ruleset = Ruleset::new(vec![
        Rule::new("landmark", "Landmark")
            .all([field("listed").eq(true)])
            .priority(200),
        Rule::new("tall", "Tower")
            .all([field("height").gt(30_i64)])
            .priority(100),
        Rule::new("old", "Heritage")
            .all([field("built").lt(1900_i64)])
            .priority(100),
        // No conditions at all: matches everything, catches the rest.
        Rule::new("other", "Generic").priority(0),
    ]);

    // Listed and tall: the priority 200 rule beats the priority 100 one
    let feature = Feature::new("cathedral")
        .set("listed", true)
        .set("height", 45_i64)
        .set("built", 1880_i64);
    report(&ruleset, &feature);

    // Tall and old tie at priority 100: "tall" is listed first, so it wins
    let feature = Feature::new("mill")
        .set("listed", false)
        .set("height", 38_i64)
        .set("built", 1885_i64);
    report(&ruleset, &feature);

    // Nothing specific matches: the catch-all takes it
    let feature = Feature::new("shed")
        .set("listed", false)
        .set("height", 3_i64)
        .set("built", 1995_i64);
    report(&ruleset, &feature);

    // Disabled rules never participate, whatever their priority
    let ruleset = Ruleset::new(vec![
        Rule::new("landmark", "Landmark")
            .all([field("listed").eq(true)])
            .priority(200)
            .disabled(),
        Rule::new("tall", "Tower")
            .all([field("height").gt(30_i64)])
            .priority(100),
    ]);
    let feature = Feature::new("cathedral")
        .set("listed", true)
        .set("height", 45_i64);
    report(&ruleset, &feature);
}

fn report(ruleset: &Ruleset, feature: &Feature) {
    match ruleset.resolve(feature) {
        Some(rule) => println!("{}: {}", feature.id(), rule.archetype),
        None => println!("{}: no archetype", feature.id()),
    }
}
