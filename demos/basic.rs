use archon::{field, Feature, Rule, Ruleset};

fn main() {
    // Define rules
    let ruleset = Ruleset::new(vec![
        Rule::new("residential", "Residential")
            .all([field("zone").is_in(["R1", "R2"])])
            .priority(100),
        Rule::new("commercial", "Commercial")
            .all([field("zone").eq("C1")])
            .priority(50),
    ]);

    let features = vec![
        Feature::new("f1").set("zone", "R1"),
        Feature::new("f2").set("zone", "C1"),
        Feature::new("f3").set("zone", "X"),
    ];

    // Resolve one feature at a time
    for feature in &features {
        match ruleset.resolve(feature) {
            Some(rule) => println!("{}: {}", feature.id(), rule.archetype),
            None => println!("{}: no archetype", feature.id()),
        }
    }

    // Or assign the whole batch at once; unmatched features are simply absent
    let assignments = ruleset.assign_all(&features);
    println!("assignments: {assignments:?}");
}
