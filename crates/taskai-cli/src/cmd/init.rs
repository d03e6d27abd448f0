use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use taskai_core::store::Store;

pub fn run(root: &Path, demo: bool) -> anyhow::Result<()> {
    let store = Store::init(root).context("failed to initialize taskai")?;
    println!("Initialized taskai in {}", store.root().display());

    if demo {
        let added = store
            .seed_demo(Utc::now())
            .context("failed to load demo data")?;
        if added == 0 {
            println!("Demo data skipped: tasks already exist");
        } else {
            println!("Loaded {added} demo tasks");
        }
    }
    Ok(())
}
