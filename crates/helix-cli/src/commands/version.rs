use anyhow::Result;

pub fn run() -> Result<()> {
    println!("helix {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
