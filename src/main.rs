use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use scaffold_cli::bindings::{Answers, Defaults, build_symbol_table};
use scaffold_cli::config::{CONFIG_FILE_NAME, MergedConfig, load_config_at, load_merged_config};
use scaffold_cli::materialize::Materializer;
use scaffold_cli::policy::{Pattern, PatternSet, Policy};
use scaffold_cli::symbols::{Symbol, SymbolTable};

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(
	author,
	version,
	about = "CLI tool for materializing project templates with symbol substitution"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Directory to create the new project in
	#[arg(required_unless_present = "show_config")]
	destination: Option<PathBuf>,

	/// Template directory to copy from
	#[arg(short, long, value_name = "DIR")]
	template: PathBuf,

	/// Product name, e.g. MyAwesomeProject (CamelCase, no whitespace)
	#[arg(short, long, value_name = "NAME")]
	product_name: Option<String>,

	/// Organization name used in copyright headers
	#[arg(long, value_name = "NAME")]
	organization_name: Option<String>,

	/// Organization ID in reverse domain notation, e.g. com.example
	#[arg(long, value_name = "ID")]
	organization_id: Option<String>,

	/// Your name
	#[arg(long, value_name = "NAME")]
	author: Option<String>,

	/// Bind any symbol by name; wins over every other source
	#[arg(long = "set", value_name = "SYMBOL=VALUE")]
	assignments: Vec<String>,

	/// Use this config file instead of discovering one
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Print the effective policy and defaults, then exit
	#[arg(long)]
	show_config: bool,
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	let config = match cli.config {
		Some(ref path) => load_config_at(path)
			.with_context(|| format!("Failed to load config {}", path.display()))?,
		None => load_merged_config(&cli.template).context("Failed to load configuration")?,
	};

	let mut policy = Policy::from_config(&config.policy).context("Invalid policy")?;
	policy
		.skip_files
		.push(Pattern::Exact(CONFIG_FILE_NAME.to_string()));

	let defaults = Defaults {
		author: author_from_env(),
		..Defaults::builtin()
	}
	.overridden_by(&config.defaults);

	if cli.show_config {
		return handle_show_config(&config, &policy, &defaults);
	}

	let Some(destination) = cli.destination else {
		anyhow::bail!("A destination directory is required");
	};

	let answers = Answers {
		product_name: cli.product_name,
		organization_name: cli.organization_name,
		organization_id: cli.organization_id,
		author: cli.author,
		assignments: cli.assignments,
	};
	let today = chrono::Local::now().date_naive();
	let symbols =
		build_symbol_table(&answers, &defaults, today).context("Invalid project values")?;

	handle_materialize(&cli.template, &destination, &symbols, &policy)
}

/// Login name of the current user, used when no author is configured.
fn author_from_env() -> Option<String> {
	["USER", "USERNAME"]
		.iter()
		.filter_map(|var| std::env::var(var).ok())
		.find(|value| !value.trim().is_empty())
}

fn handle_materialize(
	template: &Path,
	destination: &Path,
	symbols: &SymbolTable,
	policy: &Policy,
) -> Result<ExitCode> {
	println!(
		"Copying the template at {} to {} with:",
		template.display(),
		destination.display()
	);
	for (symbol, value) in symbols.iter() {
		println!("  {symbol} = {value:?}");
	}
	println!();

	let report = Materializer::new(template, destination, symbols, policy)
		.run()
		.with_context(|| format!("Failed to materialize {}", template.display()))?;

	let product_name = symbols.value_of(Symbol::ProductName).unwrap_or_default();
	println!(
		"Generated {} files ({} copied verbatim, {} entries skipped).",
		report.written.len(),
		report.verbatim.len(),
		report.skipped.len()
	);
	println!();
	println!("Your new project has been generated. You should now do the following:");
	println!();
	println!("  cd {}", destination.display());
	println!("  open {}.xcodeproj", product_name);
	println!();
	println!("Then, in Xcode, you should verify that you can build and run the project.");

	Ok(ExitCode::SUCCESS)
}

fn handle_show_config(
	config: &MergedConfig,
	policy: &Policy,
	defaults: &Defaults,
) -> Result<ExitCode> {
	if config.sources.is_empty() {
		println!("No configuration files found; using built-in policy.");
	} else {
		println!("Configuration files (in cascade order):");
		for source in &config.sources {
			println!("  {}", source.display());
		}
	}
	println!();

	println!("[policy]");
	print_patterns("skip-dirs", &policy.skip_dirs);
	print_patterns("skip-files", &policy.skip_files);
	print_patterns("quote-values-in", &policy.quote_values_in);
	print_patterns("verbatim", &policy.verbatim);
	println!();

	println!("[defaults]");
	let entries = [
		("organization-name", &defaults.organization_name),
		("organization-id", &defaults.organization_id),
		("author", &defaults.author),
	];
	for (key, value) in entries {
		match value {
			Some(value) => println!("{key} = {value:?}"),
			None => println!("# {key} is not set"),
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn print_patterns(key: &str, patterns: &PatternSet) {
	let rendered: Vec<String> = patterns
		.iter()
		.map(|pattern| format!("{:?}", pattern.as_source()))
		.collect();
	println!("{key} = [{}]", rendered.join(", "));
}
