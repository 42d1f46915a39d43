use std::io;

use anyhow::Context;
use stockroom_cli::Console;
use stockroom_infra::{JsonFileStorage, StockroomConfig, load_inventory, save_inventory};

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = StockroomConfig::from_env();
    tracing::info!(path = %config.data_file.display(), "using inventory file");

    let storage = JsonFileStorage::new(&config.data_file);
    let mut inventory = load_inventory(&storage);

    let session = {
        let stdin = io::stdin();
        let mut console = Console::new(stdin.lock(), io::stdout());
        console.run(&mut inventory)
    };

    // Save even if the console failed, so accepted changes are not lost.
    save_inventory(&storage, &inventory).with_context(|| {
        format!("failed to save inventory to {}", config.data_file.display())
    })?;
    session.context("console session failed")?;

    Ok(())
}
