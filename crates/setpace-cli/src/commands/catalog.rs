use clap::Subcommand;
use setpace_core::Catalog;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Print the catalog file path
    Path,
    /// Write the starter catalog
    Init {
        /// Overwrite an existing catalog
        #[arg(long)]
        force: bool,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::Path => {
            println!("{}", Catalog::path()?.display());
        }
        CatalogAction::Init { force } => {
            let path = Catalog::path()?;
            if path.exists() && !force {
                return Err(format!(
                    "catalog already exists at {} (use --force to overwrite)",
                    path.display()
                )
                .into());
            }
            Catalog::starter().save_to(&path)?;
            println!("catalog written to {}", path.display());
        }
    }
    Ok(())
}
