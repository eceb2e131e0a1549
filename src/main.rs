use anyhow::Context;

fn main() -> anyhow::Result<()> {
    pixlens::run().context("pixlens exited with an error")
}
