use crate::features::world::{list, AccessWorld};
use accessgraph_core::access::{has_access, DerivedAccess};
use cucumber::{given, then, when};

#[given(expr = "app instance {string} of app {string} in section {string} requires {string}")]
async fn given_app_instance(world: &mut AccessWorld, instance: String, app: String, section: String, requires: String) {
    world
        .apps
        .entry(section)
        .or_default()
        .entry(app)
        .or_default()
        .insert(instance, list(&requires).into_iter().collect());
}

#[when(expr = "I compute access for the groups {string}")]
async fn when_compute_access(world: &mut AccessWorld, groups: String) {
    world.derived = Some(DerivedAccess::compute(&list(&groups), &world.structure()));
}

#[when(expr = "I evaluate groups {string} against requirements {string}")]
async fn when_evaluate(world: &mut AccessWorld, groups: String, requires: String) {
    world.decision = Some(has_access(&list(&groups), &list(&requires)));
}

#[then(expr = "the decision is {string}")]
async fn then_decision(world: &mut AccessWorld, expected: String) {
    let allowed = world.decision.expect("no decision evaluated");
    assert_eq!(if allowed { "allowed" } else { "denied" }, expected);
}

fn derived(world: &AccessWorld) -> &DerivedAccess {
    world.derived.as_ref().expect("access not computed")
}

#[then(expr = "instance {string} is accessible")]
async fn then_instance_accessible(world: &mut AccessWorld, instance: String) {
    assert!(derived(world).access.can_open(&instance), "{instance} should be accessible");
}

#[then(expr = "instance {string} is not accessible")]
async fn then_instance_not_accessible(world: &mut AccessWorld, instance: String) {
    assert!(!derived(world).access.can_open(&instance), "{instance} should not be accessible");
}

#[then(expr = "app {string} is accessible")]
async fn then_app_accessible(world: &mut AccessWorld, app: String) {
    assert!(derived(world).access.apps.contains(&app));
}

#[then(expr = "section {string} is accessible")]
async fn then_section_accessible(world: &mut AccessWorld, section: String) {
    assert!(derived(world).access.sections.contains(&section));
}

#[then(expr = "section {string} is not accessible")]
async fn then_section_not_accessible(world: &mut AccessWorld, section: String) {
    assert!(!derived(world).access.sections.contains(&section));
}
