fn main() -> anyhow::Result<()> {
    opcompare::run()
}
