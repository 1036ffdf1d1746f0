//! Command line options.

use crate::config::Config;
use crate::error::AppError;
use crate::state::Route;
use clap::{App as ClapApp, Arg, ArgMatches};
use std::ffi::OsString;

/// Options given on the command line.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options {
    pub config_dir: Option<String>,
    pub initial_route: Option<Route>,
    pub offline: bool,
}

fn command() -> ClapApp<'static, 'static> {
    ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("route")
                .short("r")
                .long("route")
                .value_name("ROUTE")
                .help("Route to open after login (e.g. landmarks, touristForm)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("offline")
                .long("offline")
                .help("Use the built-in user table and the in-memory landmark store"),
        )
}

impl Options {
    /// Parse the process arguments. Exits with usage on bad input.
    ///
    pub fn parse() -> Options {
        Options::from_matches(&command().get_matches())
    }

    pub fn from_args<I, T>(args: I) -> Result<Options, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().get_matches_from_safe(args)?;
        Ok(Options::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Options {
        Options {
            config_dir: matches.value_of("config").map(str::to_owned),
            initial_route: matches.value_of("route").map(Route::parse),
            offline: matches.is_present("offline"),
        }
    }

    /// Load the configuration these options point at.
    ///
    pub fn load_config(&self) -> Result<Config, AppError> {
        let mut config = Config::new();
        config.load(self.config_dir.as_deref())?;
        if self.offline {
            config.force_offline();
        }
        Ok(config)
    }
}
