//! End-to-end reconciliation scenarios
//!
//! Exercises diff, change set and merge set together over the shared
//! fixtures and over generated records.

#[cfg(test)]
mod tests {
    use fieldmerge_core::{Category, Date, Model, Record, Toggle, Value};
    use fieldmerge_reconcile::{
        ChangeSet, DiffOptions, MergeSet, ModelDiff, Preference, Proposal, ResolverTable, Strategy,
    };

    use crate::fixtures::*;
    use crate::generator::{GeneratorConfig, RecordGenerator};

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    const DAD: &str = "Annual family picnic with games and BBQ.";
    const MOM: &str = "Picnic with family and friends, do not forget the salads!";
    const SON: &str = "Bring your football and frisbee!";

    fn joined(target: &str, baseline: &str) -> Value {
        text(&format!("{}\n\n{}", target, baseline))
    }

    fn entries() -> [(&'static str, Record); 4] {
        [
            ("dad", dads_entry().unwrap()),
            ("mom", moms_entry().unwrap()),
            ("son", sons_entry().unwrap()),
            ("daughter", daughters_entry().unwrap()),
        ]
    }

    fn entry(name: &str) -> Record {
        entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| r)
            .unwrap()
    }

    #[test]
    fn test_get_preferred_table() {
        let cases = [
            ("dad", "son", "location", Preference::Left),
            ("dad", "daughter", "time", Preference::Left),
            ("dad", "daughter", "description", Preference::Left),
            ("son", "daughter", "time", Preference::Left),
            ("son", "daughter", "description", Preference::Left),
            ("son", "mom", "location", Preference::Right),
            ("daughter", "mom", "time", Preference::Right),
            ("daughter", "mom", "description", Preference::Right),
            ("son", "daughter", "location", Preference::Right),
            ("dad", "mom", "time", Preference::Both),
            ("dad", "mom", "description", Preference::Both),
            ("mom", "son", "day", Preference::Both),
        ];

        for (baseline, target, field, expected) in cases {
            let mut left = entry(baseline);
            let right = entry(target);
            let change_set = ChangeSet::new(&mut left, &right).unwrap();
            assert_eq!(
                change_set.get_preferred(field).unwrap(),
                expected,
                "{} => {} on {}",
                baseline,
                target,
                field
            );
        }
    }

    #[test]
    fn test_resolve_preferences_table() {
        let raw = |b: Value, t: Value| (b, Proposal::Raw(t));
        let resolved = |b: &str, t: &str| {
            (
                text(b),
                Proposal::Resolved {
                    target: text(t),
                    resolution: joined(t, b),
                },
            )
        };
        let day = |d: u8| Value::from(Date::new(2025, 6, d));

        let cases: Vec<(&str, &str, Vec<(&str, (Value, Proposal<Value>))>)> = vec![
            ("dad", "mom", vec![("description", resolved(DAD, MOM))]),
            ("dad", "son", vec![("description", resolved(DAD, SON))]),
            ("dad", "daughter", vec![]),
            (
                "mom",
                "dad",
                vec![
                    ("time", raw(text("12:00 PM"), text("11:00 AM"))),
                    ("description", resolved(MOM, DAD)),
                ],
            ),
            ("mom", "son", vec![("description", resolved(MOM, SON))]),
            ("mom", "daughter", vec![]),
            (
                "son",
                "dad",
                vec![
                    ("day", raw(day(19), day(20))),
                    ("time", raw(text("12:00 PM"), text("11:00 AM"))),
                    ("location", raw(Value::Null, text("Central Park"))),
                    ("description", resolved(SON, DAD)),
                ],
            ),
            (
                "son",
                "mom",
                vec![
                    ("day", raw(day(19), day(20))),
                    ("location", raw(Value::Null, text("Central Park"))),
                    ("description", resolved(SON, MOM)),
                ],
            ),
            (
                "son",
                "daughter",
                vec![
                    ("day", raw(day(19), day(20))),
                    ("location", raw(Value::Null, text("Central Park"))),
                ],
            ),
            (
                "daughter",
                "dad",
                vec![
                    ("time", raw(text("All Day"), text("11:00 AM"))),
                    ("description", raw(Value::Null, text(DAD))),
                ],
            ),
            (
                "daughter",
                "mom",
                vec![
                    ("time", raw(text("All Day"), text("12:00 PM"))),
                    ("description", raw(Value::Null, text(MOM))),
                ],
            ),
            (
                "daughter",
                "son",
                vec![
                    ("time", raw(text("All Day"), text("12:00 PM"))),
                    ("description", raw(Value::Null, text(SON))),
                ],
            ),
        ];

        for (baseline, target, expected) in cases {
            let mut left = entry(baseline);
            let right = entry(target);
            let mut change_set =
                ChangeSet::with_resolver(&mut left, &right, EventResolver).unwrap();
            change_set.resolve_preferences().unwrap();

            let actual: Vec<(&str, (Value, Proposal<Value>))> = change_set
                .iter()
                .map(|c| (c.field(), (c.baseline().clone(), c.proposal().clone())))
                .collect();
            assert_eq!(actual, expected, "{} => {}", baseline, target);
        }
    }

    #[test]
    fn test_event_conflict_without_resolver() {
        let mut left = entry("dad");
        let right = entry("mom");
        let err = ChangeSet::new(&mut left, &right)
            .unwrap()
            .resolve_preferences()
            .err()
            .unwrap();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_merge_edits_onto_baseline() {
        let mut baseline = entry("son");
        let target = entry("dad");
        let mut change_set =
            ChangeSet::with_resolver(&mut baseline, &target, EventResolver).unwrap();
        change_set.resolve_preferences().unwrap().apply().unwrap();

        assert_eq!(baseline.get("day").unwrap(), &Value::from(Date::new(2025, 6, 20)));
        assert_eq!(baseline.get("time").unwrap(), &text("11:00 AM"));
        assert_eq!(baseline.get("location").unwrap(), &text("Central Park"));
        assert_eq!(baseline.get("description").unwrap(), &joined(DAD, SON));
        // target untouched
        assert_eq!(target, entry("dad"));
    }

    #[test]
    fn test_rental_diff_without_identity() {
        let dorm = dorm().unwrap();
        let apartment = apartment("101").unwrap();
        let diff =
            ModelDiff::with_options(&dorm, &apartment, DiffOptions::without_identity()).unwrap();

        assert_eq!(
            diff.fields(),
            vec!["dwelling_type", "sqft", "bedrooms", "garage_parking", "laundry", "cost"]
        );
        assert_eq!(diff.get_left("garage_parking").unwrap(), &Value::from(0));
        assert_eq!(diff.get_right("garage_parking").unwrap(), &Value::from(1));
    }

    #[test]
    fn test_rental_identity_diff() {
        let diff = ModelDiff::new(&apartment("101").unwrap(), &apartment("102").unwrap()).unwrap();
        assert_eq!(diff.fields(), vec!["apt"]);

        let diff = ModelDiff::new(&town_home().unwrap(), &dorm().unwrap()).unwrap();
        assert_eq!(diff.get_left("apt").unwrap(), &Value::Null);
        assert_eq!(diff.get_right("apt").unwrap(), &text("12"));
    }

    #[test]
    fn test_property_matrix() {
        let record = property_record().unwrap();
        let names = |toggles: &[Toggle]| record.property_names(toggles);
        let suffixed = |bases: &[&str]| -> Vec<String> {
            ["_pk", "_fk", ""]
                .iter()
                .flat_map(|suffix| bases.iter().map(move |b| format!("{}{}", b, suffix)))
                .collect()
        };

        use Category::*;
        let inc = Toggle::include;
        let exc = Toggle::exclude;

        assert!(names(&[]).is_empty());
        assert!(names(&[exc(All)]).is_empty());
        assert_eq!(names(&[inc(All)]).len(), 21);
        assert_eq!(names(&[inc(Identity), inc(Reference), inc(Standard)]), names(&[inc(All)]));
        assert_eq!(names(&[inc(Assigned)]), vec!["set_pk", "set_fk", "set"]);
        assert_eq!(
            names(&[inc(All), exc(Unset), exc(DefaultValued), exc(NullValued)]),
            vec!["set_pk", "set_fk", "set"]
        );
        assert_eq!(names(&[inc(Unset)]), suffixed(&["unset", "default", "default_none"]));
        assert_eq!(
            names(&[inc(DefaultValued)]),
            suffixed(&["unset", "default", "set_default", "default_none", "set_default_none"])
        );
        assert_eq!(
            names(&[inc(NullValued)]),
            suffixed(&["unset", "default_none", "set_none", "set_default_none"])
        );
        assert_eq!(
            names(&[inc(NullValued), exc(Unset)]),
            suffixed(&["set_none", "set_default_none"])
        );
        assert_eq!(
            names(&[inc(DefaultValued), exc(Unset), exc(NullValued)]),
            suffixed(&["set_default"])
        );
        assert_eq!(
            names(&[inc(Standard), exc(NullValued)]),
            vec!["set", "default", "set_default"]
        );
        assert_eq!(
            names(&[inc(Unset), exc(Standard), inc(Identity)]),
            vec![
                "set_pk",
                "unset_pk",
                "default_pk",
                "set_default_pk",
                "default_none_pk",
                "set_none_pk",
                "set_default_none_pk",
                "unset_fk",
                "default_fk",
                "default_none_fk",
            ]
        );
    }

    #[test]
    fn test_preference_implies_presence() {
        let mut generator = RecordGenerator::new(GeneratorConfig::light());
        let records = generator.records(24).unwrap();
        let assigned = |r: &Record| r.property_names(&[Toggle::include(Category::Assigned)]);

        for left in &records {
            for right in &records {
                let (left_assigned, right_assigned) = (assigned(left), assigned(right));
                let mut baseline = left.clone();
                let change_set = ChangeSet::new(&mut baseline, right).unwrap();

                for field in change_set.fields() {
                    let in_left = left_assigned.iter().any(|f| f == field);
                    let in_right = right_assigned.iter().any(|f| f == field);
                    match change_set.get_preferred(field).unwrap() {
                        Preference::Right => assert!(in_right && !in_left),
                        Preference::Left => assert!(
                            !change_set.has_target_value(field).unwrap() || (in_left && !in_right)
                        ),
                        Preference::Both => assert!(in_left && in_right),
                        Preference::Neither => assert!(!in_left && !in_right),
                        Preference::NotApplicable => unreachable!("identity excluded"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_apply_correctness() {
        let mut generator = RecordGenerator::new(GeneratorConfig::default());
        let records = generator.records(16).unwrap();

        for left in &records {
            for right in &records {
                let mut baseline = left.clone();
                let mut change_set = ChangeSet::with_resolver(
                    &mut baseline,
                    right,
                    ResolverTable::new().fallback(Strategy::Literal(Value::Int(-1))),
                )
                .unwrap();
                change_set.resolve_preferences().unwrap();
                let proposals: Vec<(String, Proposal<Value>)> = change_set
                    .iter()
                    .map(|c| (c.field().to_string(), c.proposal().clone()))
                    .collect();
                change_set.apply().unwrap();

                for name in left.schema().field_names() {
                    let expected = match proposals.iter().find(|(f, _)| f == name) {
                        Some((_, Proposal::Raw(target))) => target.clone(),
                        Some((_, Proposal::Resolved { resolution, .. })) => resolution.clone(),
                        Some((_, Proposal::Unresolved(_))) | None => {
                            left.get(name).unwrap().clone()
                        }
                    };
                    assert_eq!(baseline.get(name).unwrap(), &expected, "field {}", name);
                }
            }
        }
    }

    #[test]
    fn test_merge_scenario_costs() {
        let costed = |cost: i64| -> Record {
            let mut record = apartment("101").unwrap();
            record.assign("cost", cost).unwrap();
            record
        };
        let mut baseline = costed(0);
        let (a, b, c) = (costed(10), costed(0), costed(20));

        let mut merge_set = MergeSet::with_resolver(
            &mut baseline,
            &[&a, &b, &c],
            ResolverTable::new().field("cost", Strategy::max()),
        )
        .unwrap();
        assert_eq!(merge_set.fields(), vec!["cost"]);
        assert_eq!(
            merge_set.get_targets("cost").unwrap(),
            &[Value::from(10), Value::from(0), Value::from(20)]
        );
        assert!(merge_set.has_target_value("cost").unwrap());

        merge_set.resolve_preferences().unwrap().apply().unwrap();
        assert_eq!(baseline.get("cost").unwrap(), &Value::from(20));
    }

    #[test]
    fn test_merge_matches_change_set_for_single_target() {
        let mut generator = RecordGenerator::new(GeneratorConfig::light());
        let records = generator.records(12).unwrap();

        for left in &records {
            for right in &records {
                let mut one = left.clone();
                let mut many = left.clone();
                let change_set = ChangeSet::new(&mut one, right).unwrap();
                let merge_set = MergeSet::new(&mut many, &[right]).unwrap();

                assert_eq!(change_set.fields(), merge_set.fields());
                for field in change_set.fields() {
                    assert_eq!(
                        change_set.get_preferred(field).unwrap(),
                        merge_set.get_preferred(field).unwrap()
                    );
                }
            }
        }
    }

    mod props {
        use fieldmerge_reconcile::Strategy;
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn test_applied_fields_match_target(seed in any::<u64>()) {
                let mut generator = RecordGenerator::new(GeneratorConfig {
                    seed,
                    ..GeneratorConfig::default()
                });
                let left = generator.next_record().unwrap();
                let right = generator.next_record().unwrap();

                let mut baseline = left.clone();
                let mut change_set = ChangeSet::with_resolver(
                    &mut baseline,
                    &right,
                    ResolverTable::new().fallback(Strategy::Prefer(Preference::Right)),
                )
                .unwrap();
                change_set.resolve_preferences().unwrap();
                prop_assert!(change_set.iter().all(|c| !c.proposal().is_resolved()));
                let raw: Vec<String> = change_set
                    .iter()
                    .filter(|c| c.proposal().is_raw())
                    .map(|c| c.field().to_string())
                    .collect();
                change_set.apply().unwrap();

                let diff =
                    ModelDiff::with_options(&baseline, &right, DiffOptions::without_identity())
                        .unwrap();
                for field in &raw {
                    prop_assert!(!diff.contains(field));
                }
            }
        }
    }
}
