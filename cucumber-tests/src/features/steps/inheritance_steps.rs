use crate::features::world::{list, AccessWorld};
use accessgraph_core::access::propagate_inheritance_in;
use cucumber::{given, then, when};

// ==================== STRUCTURE ====================

#[given(expr = "group {string} inherits {string}")]
async fn given_group_inherits(world: &mut AccessWorld, parent: String, children: String) {
    world.user_groups.entry(parent).or_default().extend(list(&children));
}

#[given(expr = "AD group {string} inherits {string}")]
async fn given_ad_group_inherits(world: &mut AccessWorld, parent: String, children: String) {
    world.ad_groups.entry(parent).or_default().extend(list(&children));
}

// ==================== RESOLUTION ====================

#[when(expr = "I resolve the groups {string}")]
async fn when_resolve(world: &mut AccessWorld, groups: String) {
    world.inherited = propagate_inheritance_in(&list(&groups), &world.user_groups, &world.ad_groups);
}

#[then(expr = "the inherited groups are {string}")]
async fn then_inherited_groups_are(world: &mut AccessWorld, expected: String) {
    assert_eq!(world.inherited, list(&expected));
}

#[then(expr = "no groups are inherited")]
async fn then_no_groups_inherited(world: &mut AccessWorld) {
    assert!(world.inherited.is_empty(), "unexpected inherited groups: {:?}", world.inherited);
}
