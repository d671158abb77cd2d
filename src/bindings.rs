//! Building a populated symbol table from user-supplied values.
//!
//! Values come from three places, later ones winning:
//! 1. the clock (`date`, `year`) and configured defaults
//! 2. dedicated command-line options
//! 3. `SYMBOL=VALUE` assignments
//!
//! Every value is trimmed and validated before it is bound. The engine itself
//! never looks at the environment; callers inject defaults here.

use crate::config::DefaultsConfig;
use crate::error::{Result, ScaffoldError};
use crate::symbols::{Symbol, SymbolTable};
use chrono::{Datelike, NaiveDate};

pub const DEFAULT_ORGANIZATION_NAME: &str = "Rocket Insights, Inc.";
pub const DEFAULT_ORGANIZATION_ID: &str = "com.rocketinsights";

/// Symbols that must end up with a value.
const REQUIRED: [Symbol; 4] = [
	Symbol::OrganizationName,
	Symbol::OrganizationId,
	Symbol::ProductName,
	Symbol::Author,
];

/// Values given explicitly for this run.
#[derive(Debug, Clone, Default)]
pub struct Answers {
	pub product_name: Option<String>,
	pub organization_name: Option<String>,
	pub organization_id: Option<String>,
	pub author: Option<String>,

	/// Raw `SYMBOL=VALUE` assignments, applied in order.
	pub assignments: Vec<String>,
}

/// Fallback values for symbols the user did not answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Defaults {
	pub organization_name: Option<String>,
	pub organization_id: Option<String>,
	pub author: Option<String>,
}

impl Defaults {
	/// Defaults shipped with the tool. There is no built-in author.
	pub fn builtin() -> Self {
		Self {
			organization_name: Some(DEFAULT_ORGANIZATION_NAME.to_string()),
			organization_id: Some(DEFAULT_ORGANIZATION_ID.to_string()),
			author: None,
		}
	}

	/// Configured defaults, falling back to `self` for anything unset.
	pub fn overridden_by(self, config: &DefaultsConfig) -> Self {
		Self {
			organization_name: config.organization_name.clone().or(self.organization_name),
			organization_id: config.organization_id.clone().or(self.organization_id),
			author: config.author.clone().or(self.author),
		}
	}
}

/// Split a `SYMBOL=VALUE` assignment.
pub fn parse_assignment(input: &str) -> Result<(&str, &str)> {
	input
		.split_once('=')
		.map(|(name, value)| (name.trim(), value))
		.ok_or_else(|| ScaffoldError::InvalidAssignment {
			input: input.to_string(),
		})
}

/// Check a single value against the rules for its symbol.
pub fn validate_value(symbol: Symbol, value: &str) -> Result<()> {
	let invalid = |reason: &str| ScaffoldError::InvalidValue {
		symbol: symbol.to_string(),
		reason: reason.to_string(),
	};

	if value.is_empty() {
		return Err(invalid("value must not be empty"));
	}

	match symbol {
		Symbol::OrganizationId => {
			if !value
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
			{
				return Err(invalid(
					"the organization ID must only use alphanumeric characters",
				));
			}
		}
		Symbol::ProductName => {
			if value.chars().any(char::is_whitespace) {
				return Err(invalid("the product name should not contain whitespace"));
			}
			if value.contains('_') {
				return Err(invalid(
					"the product name should use CamelCase instead of snake_case",
				));
			}
		}
		_ => {}
	}

	Ok(())
}

/// Bind every symbol from answers, defaults and `today`, then validate.
pub fn build_symbol_table(
	answers: &Answers,
	defaults: &Defaults,
	today: NaiveDate,
) -> Result<SymbolTable> {
	let mut table = SymbolTable::new();

	table.bind(Symbol::Date, today.format("%Y-%m-%d").to_string());
	table.bind(Symbol::Year, today.year().to_string());

	let chosen = [
		(
			Symbol::OrganizationName,
			&answers.organization_name,
			&defaults.organization_name,
		),
		(
			Symbol::OrganizationId,
			&answers.organization_id,
			&defaults.organization_id,
		),
		(Symbol::ProductName, &answers.product_name, &None),
		(Symbol::Author, &answers.author, &defaults.author),
	];
	for (symbol, answer, default) in chosen {
		if let Some(value) = answer.as_ref().or(default.as_ref()) {
			bind_checked(&mut table, symbol, value)?;
		}
	}

	for assignment in &answers.assignments {
		let (name, value) = parse_assignment(assignment)?;
		let symbol = name.parse::<Symbol>()?;
		bind_checked(&mut table, symbol, value)?;
	}

	if let Some(missing) = REQUIRED.into_iter().find(|s| table.value_of(*s).is_none()) {
		return Err(ScaffoldError::MissingValue {
			symbol: missing.to_string(),
		});
	}

	Ok(table)
}

fn bind_checked(table: &mut SymbolTable, symbol: Symbol, value: &str) -> Result<()> {
	let value = value.trim();
	validate_value(symbol, value)?;
	log::debug!("{symbol} = {value:?}");
	table.bind(symbol, value);
	Ok(())
}
