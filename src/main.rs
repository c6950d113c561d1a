#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("`jsonschema-lite` CLI is only available with the `cli` feature");
    std::process::exit(1);
}

#[cfg(feature = "cli")]
fn main() -> std::process::ExitCode {
    cli::run()
}

#[cfg(feature = "cli")]
#[allow(clippy::print_stdout)]
mod cli {
    use std::{
        fs,
        io::{self, Read},
        path::{Path, PathBuf},
        process::ExitCode,
    };

    use clap::{Parser, Subcommand};
    use jsonschema_lite::{ExpansionOptions, Pointer, SchemaValidator};
    use serde_json::Value;
    use tracing_subscriber::EnvFilter;

    const STDIN: &str = "<stdin>";

    #[derive(Parser)]
    #[command(name = "jsonschema-lite", version)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Print the part of a JSON document addressed by a JSON Pointer.
        Pointer {
            /// The JSON Pointer, e.g. `/a/0`.
            pointer: String,
            /// The document to read. Standard input is used when omitted.
            #[arg(short = 'f', long = "file")]
            file: Option<PathBuf>,
        },
        /// Validate a JSON document against a JSON Schema.
        Validate {
            /// The JSON Schema to validate with (i.e. schema.json).
            schema: PathBuf,
            /// The instance to validate. Standard input is used when omitted.
            instance: Option<PathBuf>,
            /// Use the sub-schema at this JSON Pointer instead of the whole document.
            #[arg(short = 'p', long = "pointer")]
            pointer: Option<String>,
            /// Print the instance with `default` values filled in.
            #[arg(short = 'D', long = "defaults")]
            defaults: bool,
        },
    }

    type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

    fn read_input(path: Option<&Path>) -> Result<(String, String)> {
        match path {
            Some(path) => Ok((path.to_string_lossy().to_string(), fs::read_to_string(path)?)),
            None => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok((STDIN.to_string(), content))
            }
        }
    }

    fn lookup(pointer: &str, file: Option<&Path>) -> Result<bool> {
        let (name, content) = read_input(file)?;
        let document: Value = serde_json::from_str(&content)?;
        let pointer = match Pointer::parse(pointer) {
            Ok(pointer) => pointer,
            Err(error) => {
                eprintln!("{}: {}", name, error);
                return Ok(false);
            }
        };
        match pointer.get(&document) {
            Ok(value) => {
                println!("{}", serde_json::to_string_pretty(value)?);
                Ok(true)
            }
            Err(error) => {
                eprintln!("{}:{}: {}", name, pointer, error);
                Ok(false)
            }
        }
    }

    fn validate(
        schema_path: &Path,
        instance_path: Option<&Path>,
        pointer: Option<&str>,
        defaults: bool,
    ) -> Result<bool> {
        let schema = fs::read_to_string(schema_path)?;
        let mut options = SchemaValidator::options();
        if let Some(pointer) = pointer {
            options.with_schema_pointer(pointer);
        }
        let validator = match options.build_str(&schema) {
            Ok(validator) => validator,
            Err(error) => {
                eprintln!("{}: {}", schema_path.display(), error);
                return Ok(false);
            }
        };
        let (name, content) = read_input(instance_path)?;
        let mut instance: Value = serde_json::from_str(&content)?;
        let expansion = ExpansionOptions {
            add_defaults: defaults,
        };
        match validator.validate_and_expand(&mut instance, expansion) {
            Ok(()) => {
                tracing::debug!(instance = %name, "instance is valid");
                if defaults {
                    println!("{}", serde_json::to_string_pretty(&instance)?);
                }
                Ok(true)
            }
            Err(errors) => {
                for error in errors {
                    eprintln!("{}:{}: {}", name, error.path, error);
                }
                Ok(false)
            }
        }
    }

    pub(crate) fn run() -> ExitCode {
        let config = Cli::parse();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();

        let outcome = match &config.command {
            Command::Pointer { pointer, file } => lookup(pointer, file.as_deref()),
            Command::Validate {
                schema,
                instance,
                pointer,
                defaults,
            } => validate(schema, instance.as_deref(), pointer.as_deref(), *defaults),
        };
        match outcome {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(error) => {
                eprintln!("Error: {}", error);
                ExitCode::FAILURE
            }
        }
    }
}
