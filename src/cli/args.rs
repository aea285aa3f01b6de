//! Command line argument parsing.
//!
//! The builder deliberately exposes a minimal surface: a single optional
//! iteration flag. Anything else (unknown flags, positional arguments) is a
//! usage error and never reaches the assembly loop.

use clap::Parser;

/// Self-extracting Linux installer builder for the Kestrel server
#[derive(Parser, Debug)]
#[command(
    name = "kestrel_installer",
    version,
    about = "Builds self-extracting Linux installers for the Kestrel server",
    long_about = "Packages the prebuilt Kestrel binary distribution together with a \
generated interactive setup script into makeself .run installers for x64 and arm64.

Run from the top of the Kestrel source tree:
  kestrel_installer
  kestrel_installer -i 2

The release version is derived from the nearest git tag. Input tarballs are
expected as kestrel-<version>-linux-<arch>.tar.gz and built via make when
missing. Output installers are written to the current directory as
kestrel-<version>-<iteration>-linux-<arch>.run."
)]
pub struct Args {
    /// Package iteration number, embedded verbatim in installer filenames
    ///
    /// Distinguishes re-packaged installers for the same release version.
    #[arg(short = 'i', long, value_name = "ITERATION", default_value = "1")]
    pub iteration: String,
}

impl Args {
    /// Parse command line arguments without exiting on error
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
