fn main() -> anyhow::Result<()> {
    apimap::cli::run_cli()
}
