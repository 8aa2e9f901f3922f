use cucumber::World;

// Steps register themselves at link time, so they are compiled into this binary.
#[path = "../src/features/mod.rs"]
mod features;

#[tokio::main]
async fn main() {
    features::AccessWorld::cucumber().run_and_exit(concat!(env!("CARGO_MANIFEST_DIR"), "/features/")).await;
}
