use clap::{Parser, Subcommand};
use spry_site::content::Site;
use spry_site::{config, generate, output, serve};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spry-site")]
#[command(about = "Static site generator and dev server for the Spry website")]
#[command(long_about = "\
Static site generator and dev server for the Spry website

Pages are listed in content/pages.toml. Each page names a template kind
(index, guide, demo, reference) and the options that template needs.

Project structure:

  .
  ├── config.toml                  # Site config (optional, overrides defaults)
  ├── content/
  │   ├── pages.toml               # Ordered page list (order = nav order)
  │   ├── guides/*.md              # Guide articles
  │   └── reference.toml           # API reference entries
  └── static/                      # Copied to <output>/static, served raw

Run 'spry-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory (overrides build.output_dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page and copy static assets (default)
    Build,
    /// Serve pages rendered on request
    Serve {
        /// Port to bind (overrides serve.port)
        #[arg(long)]
        port: Option<u16>,
        /// Interface address to bind (overrides serve.interface)
        #[arg(long)]
        interface: Option<String>,
    },
    /// Validate content without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::Build => {
            let site = Site::load(&cli.root, load_site_config(&cli)?)?;
            println!("==> Building {}", cli.root.display());
            let report = generate::generate(&site)?;
            output::print_build_output(&report, &site.config.build.static_dir);
        }
        Command::Serve { port, interface } => {
            let mut site_config = load_site_config(&cli)?;
            if let Some(port) = port {
                site_config.serve.port = *port;
            }
            if let Some(interface) = interface {
                site_config.serve.interface = interface.clone();
            }
            let site = Site::load(&cli.root, site_config)?;
            serve::serve(&site)?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            let site = Site::load(&cli.root, load_site_config(&cli)?)?;
            output::print_check_output(&site);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` from the project root and apply global overrides.
fn load_site_config(cli: &Cli) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(&cli.root)?;
    if let Some(output) = &cli.output {
        site_config.build.output_dir = output.to_string_lossy().into_owned();
        site_config.validate()?;
    }
    Ok(site_config)
}
