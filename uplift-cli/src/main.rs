fn main() -> anyhow::Result<()> {
    uplift_cli::run()
}
