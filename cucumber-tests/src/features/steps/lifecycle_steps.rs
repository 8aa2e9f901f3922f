use crate::features::world::{list, AccessWorld};
use accessgraph_core::access::access_check;
use accessgraph_core::identity::{Identity, SessionKeys};
use accessgraph_core::store::SessionStore;
use cucumber::{then, when};
use std::time::Duration;

// ==================== LOGIN / LOGOUT ====================

#[when(expr = "{string} logs in as {string} with groups {string}")]
async fn when_logs_in(world: &mut AccessWorld, username: String, uid: String, groups: String) {
    let identities = world.identities();
    identities.login(&uid, &username, None, list(&groups)).await.expect("login failed");
}

#[when(expr = "{string} logs out")]
async fn when_logs_out(world: &mut AccessWorld, uid: String) {
    let identities = world.identities();
    let identity = identities.load(&uid).await;
    let user = identity.user().expect("cannot log out an anonymous identity");
    identities.logout(user).await.expect("logout failed");
}

// ==================== TIME ====================

#[when(expr = "{int} seconds pass")]
async fn when_seconds_pass(world: &mut AccessWorld, seconds: u64) {
    world.clock.advance(Duration::from_secs(seconds));
}

// ==================== LOOKUPS ====================

#[when(expr = "the identity {string} is loaded")]
async fn when_identity_loaded(world: &mut AccessWorld, uid: String) {
    let identities = world.identities();
    world.identity = Some(identities.load(&uid).await);
}

#[then(expr = "the identity {string} is authenticated")]
async fn then_authenticated(world: &mut AccessWorld, uid: String) {
    let identities = world.identities();
    assert!(identities.load(&uid).await.is_authenticated(), "{uid} should be authenticated");
}

#[then(expr = "the identity {string} is anonymous")]
async fn then_anonymous(world: &mut AccessWorld, uid: String) {
    let identities = world.identities();
    assert_eq!(identities.load(&uid).await, Identity::Anonymous);
}

#[then(expr = "the identity {string} has the direct groups {string}")]
async fn then_direct_groups(world: &mut AccessWorld, uid: String, groups: String) {
    let identities = world.identities();
    let identity = identities.load(&uid).await;
    assert_eq!(identity.user().expect("anonymous").groups, list(&groups));
}

#[then(expr = "every key of {string} expires in {int} seconds")]
async fn then_keys_expire(world: &mut AccessWorld, uid: String, seconds: u64) {
    let username = world.store.get(&format!("{uid}_username")).await.unwrap().expect("no username key");
    for key in SessionKeys::new(&uid, &username).all() {
        let ttl = world.store.ttl(key).await.unwrap();
        assert_eq!(ttl, Some(Duration::from_secs(seconds)), "ttl of {key}");
    }
}

// ==================== ADMIN MUTATIONS ====================

#[when(expr = "the groups {string} are injected for {string}")]
async fn when_groups_injected(world: &mut AccessWorld, groups: String, username: String) {
    let identities = world.identities();
    identities.inject_groups(&username, &list(&groups)).await.expect("injection failed");
}

#[when(expr = "the groups {string} are removed for {string}")]
async fn when_groups_removed(world: &mut AccessWorld, groups: String, username: String) {
    let identities = world.identities();
    identities.deject_groups(&username, &list(&groups)).await.expect("removal failed");
}

#[when(expr = "the identity {string} is re-enriched")]
async fn when_reenriched(world: &mut AccessWorld, uid: String) {
    let identities = world.identities();
    identities.reenrich(&uid).await.expect("re-enrichment failed").expect("no live identity");
}

#[then(expr = "the stored groups of {string} are {string}")]
async fn then_stored_groups(world: &mut AccessWorld, uid: String, groups: String) {
    let identities = world.identities();
    assert_eq!(identities.stored_groups(&uid).await.unwrap(), list(&groups));
}

#[then(expr = "the identity {string} can open {string}")]
async fn then_can_open(world: &mut AccessWorld, uid: String, instance: String) {
    let identities = world.identities();
    assert!(access_check(&identities.load(&uid).await, &instance));
}

#[then(expr = "the identity {string} cannot open {string}")]
async fn then_cannot_open(world: &mut AccessWorld, uid: String, instance: String) {
    let identities = world.identities();
    assert!(!access_check(&identities.load(&uid).await, &instance));
}
