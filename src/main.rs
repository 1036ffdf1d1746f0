use anyhow::Result;
use sight_lipa::app::App;
use sight_lipa::cli::Options;

#[tokio::main]
async fn main() -> Result<()> {
    let options = Options::parse();
    let config = options.load_config()?;
    App::start(config, options.initial_route).await
}
