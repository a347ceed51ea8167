use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let app = alcove::default()?;
    app.run();
    Ok(())
}
