use clap::{Args, Parser, Subcommand};
use envbind::{
    Bind, ConfigSource, EnvSource, FieldDescriptor, OutcomeKind, PrefixSource, StaticSource,
    bind, define_config, docs, summarize,
};
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Used when no --field is given
define_config!(
    #[derive(Debug)]
    #[allow(dead_code)]
    pub struct ExampleConfig {
        #[field(example = "localhost")]
        pub host: String,

        #[field(example = 9000)]
        pub port: u16,

        #[field(example = false)]
        pub debug: bool,
    }
);

#[derive(Parser)]
#[command(name = "envbind")]
#[command(about = "Check environment variables against a typed field list", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:
  envbind check
  envbind check --prefix KAMTA_ -f host:string=localhost -f port:int=9000
  envbind check --env-file test.env
  envbind docs --output CONFIG.md
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bind every field and report missing or malformed variables
    Check {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Read variables from a dotenv file instead of the process environment
        #[arg(short, long)]
        env_file: Option<PathBuf>,
    },
    /// Print a Markdown table of the variables the fields read
    Docs {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Write the table to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SchemaArgs {
    /// Prefix prepended to every key, e.g. APP_
    #[arg(short, long, default_value = "")]
    prefix: String,

    /// Field to bind, repeatable
    #[arg(short, long = "field", value_name = "NAME:KIND[=EXAMPLE]")]
    fields: Vec<FieldDescriptor>,
}

impl SchemaArgs {
    fn fields(&self) -> Vec<FieldDescriptor> {
        if self.fields.is_empty() {
            ExampleConfig::fields()
        } else {
            self.fields.clone()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check { schema, env_file } => check(&schema, env_file),
        Command::Docs { schema, output } => generate_docs(&schema, output),
    }
}

fn check(schema: &SchemaArgs, env_file: Option<PathBuf>) -> ExitCode {
    let source: Box<dyn ConfigSource> = match env_file {
        Some(path) => match StaticSource::from_env_file(&path) {
            Ok(source) => Box::new(source),
            Err(e) => {
                eprintln!("✗ {}", e);
                return ExitCode::from(2);
            }
        },
        None => Box::new(EnvSource::snapshot()),
    };
    let source = PrefixSource::new(schema.prefix.as_str(), source);

    let fields = schema.fields();
    tracing::info!(fields = fields.len(), prefix = %schema.prefix, "binding configuration");

    let result = match bind(&fields, &source) {
        Ok(result) => result,
        Err(e) => {
            eprint!("{}", e);
            return ExitCode::from(2);
        }
    };

    for outcome in result.iter().filter(|o| o.kind == OutcomeKind::Ok) {
        if let Some(value) = &outcome.value {
            println!("  {}={}", outcome.key, value);
        }
    }

    let summary = summarize(&result);
    if summary.ok {
        println!("✓ {}", summary);
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", summary);
        ExitCode::FAILURE
    }
}

fn generate_docs(schema: &SchemaArgs, output: Option<PathBuf>) -> ExitCode {
    let fields = schema.fields();
    let prefix = Some(schema.prefix.as_str()).filter(|p| !p.is_empty());

    match output {
        Some(path) => match docs::write_docs(&fields, prefix, &path) {
            Ok(()) => {
                println!("✓ Documentation written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("✗ Failed to write documentation: {}", e);
                ExitCode::FAILURE
            }
        },
        None => {
            print!("{}", docs::render_markdown(&fields, prefix));
            ExitCode::SUCCESS
        }
    }
}
