use crate::error::Result;
use crate::symbols::Symbol;
use std::collections::BTreeMap;

/// The substitution rules of the bound symbols, compiled into one alternation
/// so a text is scanned once.
#[derive(Debug, Clone)]
struct Matchers {
	text: regex::Regex,
	bytes: regex::bytes::Regex,
}

impl Matchers {
	/// Alternation of the given symbols' markers, longest first.
	fn for_symbols(symbols: impl Iterator<Item = Symbol>) -> Self {
		let mut markers: Vec<&str> = symbols
			.flat_map(|symbol| symbol.markers().iter().copied())
			.collect();
		markers.sort_by_key(|m| std::cmp::Reverse(m.len()));
		let pattern = markers
			.iter()
			.map(|m| regex::escape(m))
			.collect::<Vec<_>>()
			.join("|");

		Self {
			text: regex::Regex::new(&pattern).expect("escaped marker literals always compile"),
			bytes: regex::bytes::Regex::new(&pattern)
				.expect("escaped marker literals always compile"),
		}
	}
}

/// Bound values for the symbol vocabulary, plus the rewrite primitive.
///
/// A table is populated once and then only read while a template is
/// materialized. Symbols without a value contribute no substitution rule: their
/// markers are left in the output exactly as written.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
	values: BTreeMap<Symbol, String>,
	matchers: Option<Matchers>,
}

impl SymbolTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind a value to a symbol. Binding twice keeps the last value.
	pub fn bind(&mut self, symbol: Symbol, value: impl Into<String>) {
		self.values.insert(symbol, value.into());
		self.matchers = Some(Matchers::for_symbols(self.values.keys().copied()));
	}

	/// Bind a value by symbol identifier, e.g. `"product_name"`.
	pub fn bind_named(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
		let symbol = name.parse::<Symbol>()?;
		self.bind(symbol, value);
		Ok(())
	}

	pub fn value_of(&self, symbol: Symbol) -> Option<&str> {
		self.values.get(&symbol).map(String::as_str)
	}

	/// Bound symbols and their values, in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
		self.values.iter().map(|(symbol, value)| (*symbol, value.as_str()))
	}

	/// Replace every marker of every bound symbol in `text`.
	///
	/// The text is scanned once, so a value containing another symbol's marker
	/// is inserted as-is and never substituted again. With
	/// `quote_if_contains_whitespace`, values containing a space are wrapped in
	/// double quotes.
	pub fn rewrite(&self, text: &str, quote_if_contains_whitespace: bool) -> String {
		let Some(matchers) = &self.matchers else {
			return text.to_string();
		};

		matchers
			.text
			.replace_all(text, |caps: &regex::Captures| {
				self.replacement(caps[0].as_bytes(), quote_if_contains_whitespace)
					.unwrap_or_else(|| caps[0].to_string())
			})
			.into_owned()
	}

	/// Byte-oriented [`SymbolTable::rewrite`] for file content that need not be UTF-8.
	pub fn rewrite_bytes(&self, text: &[u8], quote_if_contains_whitespace: bool) -> Vec<u8> {
		let Some(matchers) = &self.matchers else {
			return text.to_vec();
		};

		matchers
			.bytes
			.replace_all(text, |caps: &regex::bytes::Captures| {
				self.replacement(&caps[0], quote_if_contains_whitespace)
					.map(String::into_bytes)
					.unwrap_or_else(|| caps[0].to_vec())
			})
			.into_owned()
	}

	fn replacement(&self, marker: &[u8], quote_if_contains_whitespace: bool) -> Option<String> {
		let value = self.value_of(Symbol::for_marker(marker)?)?;
		if quote_if_contains_whitespace && value.contains(' ') {
			Some(format!("\"{value}\""))
		} else {
			Some(value.to_string())
		}
	}
}
