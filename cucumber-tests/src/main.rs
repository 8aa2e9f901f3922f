use cucumber::{cli, World};
mod features;

#[tokio::main]
async fn main() {
    features::AccessWorld::cucumber()
        .with_cli::<()>(cli::Opts::parsed())
        .run_and_exit(concat!(env!("CARGO_MANIFEST_DIR"), "/features/"))
        .await;
}
