//! Behaviour-driven coverage for display-name resolution.
//!
//! Scenarios pin the structural derivation rule and the precedence of
//! configured overrides.

use highlight_pack_common::NameResolver;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::collections::BTreeMap;

#[derive(Default)]
struct NamingWorld {
    overrides: BTreeMap<String, String>,
    resolved: Option<String>,
}

#[fixture]
fn world() -> NamingWorld {
    NamingWorld::default()
}

#[given("no display name overrides")]
fn given_no_overrides(world: &mut NamingWorld) {
    world.overrides.clear();
}

#[given("the override \"{identifier}\" displays as \"{display}\"")]
fn given_override(world: &mut NamingWorld, identifier: String, display: String) {
    world.overrides.insert(identifier, display);
}

#[when("the display name for \"{identifier}\" is resolved")]
fn when_resolved(world: &mut NamingWorld, identifier: String) {
    let resolver = NameResolver::new(&world.overrides);
    world.resolved = Some(resolver.resolve(&identifier));
}

#[then("the display name is \"{expected}\"")]
fn then_display_name(world: &mut NamingWorld, expected: String) {
    assert_eq!(world.resolved.as_deref(), Some(expected.as_str()));
}

#[scenario(
    path = "tests/features/naming.feature",
    name = "Structural derivation title-cases each word"
)]
fn scenario_structural(world: NamingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/naming.feature",
    name = "Dotted and underscored identifiers split into words"
)]
fn scenario_delimiters(world: NamingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/naming.feature",
    name = "Overrides win over structural derivation"
)]
fn scenario_overrides(world: NamingWorld) {
    let _ = world;
}
