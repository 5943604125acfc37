use anyhow::Result;
use vergen::EmitBuilder;

// Short commit SHA for `mission_assistant --version`; outside a git checkout
// vergen emits a placeholder and the binary falls back to "unknown commit".
fn main() -> Result<()> {
    EmitBuilder::builder().git_sha(true).emit()?;
    Ok(())
}
