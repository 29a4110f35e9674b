//! Property-based tests for configurations.

use std::collections::BTreeSet;

use super::{parser, writer, PackageConfig};
use crate::error::ErrorCollector;
use crate::package::{LanguageVersion, Package};
use proptest::prelude::*;
use serde_json::{Map, Value};
use url::Url;

// Directory paths over a small alphabet so roots nest often.
fn directory_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 1..5)
        .prop_map(|parts| parts.into_iter().map(String::from).collect())
}

fn root_url(parts: &[String]) -> Url {
    Url::parse(&format!("file:///{}/", parts.join("/"))).unwrap()
}

// Packages with distinct roots; resolution roots sit under `lib/`, which
// the alphabet never produces, so no root lands inside another's.
fn packages_strategy() -> impl Strategy<Value = Vec<Package>> {
    prop::collection::btree_set(directory_strategy(), 1..12).prop_map(|roots: BTreeSet<_>| {
        roots
            .into_iter()
            .enumerate()
            .map(|(index, parts)| {
                let root = root_url(&parts);
                Package::builder(format!("p{index}"), root.clone())
                    .package_uri_root(root.join("lib/").unwrap())
                    .build()
                    .unwrap()
            })
            .collect()
    })
}

fn extra_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("x[a-z]{1,8}", any::<i64>(), 0..3).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // The owner of a location is the package with the longest root above it
    #[test]
    fn package_of_is_longest_ancestor(
        packages in packages_strategy(),
        query in directory_strategy(),
    ) {
        let config = PackageConfig::new(2, packages.clone(), Map::new()).unwrap();
        let location = root_url(&query).join("file.dart").unwrap();

        let expected = packages
            .iter()
            .filter(|p| location.as_str().starts_with(p.root().as_str()))
            .max_by_key(|p| p.root().as_str().len())
            .map(Package::name);
        prop_assert_eq!(config.package_of(&location).map(Package::name), expected);
    }

    // Construction does not depend on input order
    #[test]
    fn package_of_ignores_input_order(
        packages in packages_strategy(),
        query in directory_strategy(),
    ) {
        let forward = PackageConfig::new(2, packages.clone(), Map::new()).unwrap();
        let mut reversed_packages = packages;
        reversed_packages.reverse();
        let reversed = PackageConfig::new(2, reversed_packages, Map::new()).unwrap();

        let location = root_url(&query).join("lib/x.dart").unwrap();
        prop_assert_eq!(
            forward.package_of(&location).map(Package::name),
            reversed.package_of(&location).map(Package::name)
        );
    }

    // Reverse resolution followed by resolution returns the location
    #[test]
    fn to_package_uri_then_resolve(
        packages in packages_strategy(),
        query in directory_strategy(),
    ) {
        let config = PackageConfig::new(2, packages, Map::new()).unwrap();
        let location = root_url(&query).join("lib/src/x.dart").unwrap();

        if let Some(package_uri) = config.to_package_uri(&location).unwrap() {
            prop_assert_eq!(config.resolve(&package_uri).unwrap(), location);
        }
    }

    // Writing and re-reading keeps every package attribute
    #[test]
    fn json_round_trip(
        packages in packages_strategy(),
        versions in prop::collection::vec(prop::option::of((0u32..100, 0u32..100)), 12),
        extras in prop::collection::vec(extra_strategy(), 12),
        top_extra in extra_strategy(),
    ) {
        let packages: Vec<Package> = packages
            .into_iter()
            .zip(versions)
            .zip(extras)
            .map(|((package, version), extra)| {
                Package::builder(package.name(), package.root().clone())
                    .package_uri_root(package.package_uri_root().clone())
                    .language_version(version.map(|(major, minor)| {
                        LanguageVersion::new(major, minor).unwrap()
                    }))
                    .extra_data(extra)
                    .build()
                    .unwrap()
            })
            .collect();
        let config = PackageConfig::new(2, packages, top_extra).unwrap();

        let base = Url::parse("file:///a/.dart_tool/package_config.json").unwrap();
        let text = writer::to_json_string(&config, Some(&base)).unwrap();
        let mut errors = ErrorCollector::new();
        let reread = parser::parse(text.as_bytes(), &base, &mut errors);

        prop_assert!(errors.is_empty());
        prop_assert_eq!(reread, config);
    }
}
