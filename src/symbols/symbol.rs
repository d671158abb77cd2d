use crate::error::ScaffoldError;
use std::fmt;
use std::str::FromStr;

/// A placeholder the engine knows how to substitute.
///
/// The vocabulary is closed: every marker spelling that can appear in a
/// template belongs to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
	ProductName,
	OrganizationId,
	OrganizationName,
	Author,
	Date,
	Year,
}

impl Symbol {
	/// Every symbol, in declaration order.
	pub const ALL: [Symbol; 6] = [
		Symbol::ProductName,
		Symbol::OrganizationId,
		Symbol::OrganizationName,
		Symbol::Author,
		Symbol::Date,
		Symbol::Year,
	];

	/// The identifier used by the string-keyed binding API (`--set`).
	pub fn name(self) -> &'static str {
		match self {
			Symbol::ProductName => "product_name",
			Symbol::OrganizationId => "organization_id",
			Symbol::OrganizationName => "organization_name",
			Symbol::Author => "author",
			Symbol::Date => "date",
			Symbol::Year => "year",
		}
	}

	/// Marker spellings that denote this symbol in template text.
	pub fn markers(self) -> &'static [&'static str] {
		match self {
			Symbol::ProductName => &["--PRODUCT-NAME--", "__PRODUCT_NAME__"],
			Symbol::OrganizationId => &["--ORGANIZATION-ID--", "__ORGANIZATION_ID__"],
			Symbol::OrganizationName => &["__ORGANIZATION_NAME__"],
			Symbol::Author => &["__AUTHOR__"],
			Symbol::Date => &["__DATE__"],
			Symbol::Year => &["__YEAR__"],
		}
	}

	/// Find the symbol owning an exact marker spelling.
	pub fn for_marker(marker: &[u8]) -> Option<Symbol> {
		Symbol::ALL
			.into_iter()
			.find(|symbol| symbol.markers().iter().any(|m| m.as_bytes() == marker))
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Symbol {
	type Err = ScaffoldError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Symbol::ALL
			.into_iter()
			.find(|symbol| symbol.name() == s)
			.ok_or_else(|| ScaffoldError::UnknownSymbol {
				name: s.to_string(),
			})
	}
}
