#![deny(missing_docs)]
//! Standardized initialization for the lambda entrypoints in this workspace.
//! Every binary calls [Entrypoint::init] first so tracing output looks the same everywhere.

use datalake_env::Environment;
use tracing_subscriber::EnvFilter;

/// Describes how a binary initializes for the [Environment] it runs in
#[derive(Debug)]
pub struct Entrypoint {
    env: Environment,
}

impl Default for Entrypoint {
    fn default() -> Self {
        Entrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [Entrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl Entrypoint {
    /// create a new instance of [Self] from an input [Environment]
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            // cloudwatch does not render ansi and we want to be able to query the fields
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        tracing::trace!(environment=%self.env, "initialized entrypoint");

        InitializedEntrypoint(())
    }
}
