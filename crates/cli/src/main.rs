fn main() -> anyhow::Result<()> {
    lootbag_observability::init();

    let config = lootbag_cli::CliConfig::from_env()?;
    let stdout = std::io::stdout();
    lootbag_cli::run(&config, &mut stdout.lock())
}
