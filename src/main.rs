mod assets;
mod cli;
mod layout;
mod logging;
mod runner;
mod scaffold;
mod util;

fn main() -> anyhow::Result<()> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app)
}
