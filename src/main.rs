fn main() -> anyhow::Result<()> {
    pollster::block_on(stereograph::run())
}
