pub mod cli;
pub mod config;
pub mod datastore;
pub mod http;
pub mod service;
pub mod task;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    command = ?cli.command(),
    "starting taskboard"
  );

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_env();
  cfg.apply_overrides(
    cli.data.as_deref(),
    cli.bind.as_deref()
  );
  debug!(?cfg, "effective config");

  let data_dir =
    config::resolve_data_dir(&cfg)
      .context(
        "failed to resolve data \
         directory"
      )?;

  let store =
    datastore::DataStore::open(
      &data_dir,
      &cfg.data_file
    )
    .with_context(|| {
      format!(
        "failed to open datastore at \
         {}",
        data_dir.display()
      )
    })?;

  match cli.command() {
    | cli::Command::Init => {
      let path =
        store.tasks_path.display();
      if store.init()? {
        println!(
          "Database initialized: {path}"
        );
      } else {
        println!(
          "Database already exists: \
           {path}"
        );
      }
    }
    | cli::Command::Serve => {
      let runtime =
        tokio::runtime::Builder::new_multi_thread()
          .enable_all()
          .build()
          .context(
            "failed to start async \
             runtime"
          )?;
      runtime.block_on(http::serve(
        store, &cfg.bind
      ))?;
    }
  }

  info!("done");
  Ok(())
}
